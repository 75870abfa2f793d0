use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result};

use crate::{common, types::MunicipalityCode};
use super::{wire::MetricsFile, DatasetMeta, MunicipalityMetrics};

/// A fully decoded metrics file. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct MetricsDataset {
    pub(super) meta: Option<DatasetMeta>,
    pub(super) municipalities: AHashMap<MunicipalityCode, MunicipalityMetrics>,
}

impl MetricsDataset {
    /// Build a dataset from already-assembled records (keyed by their own code).
    pub fn new(meta: Option<DatasetMeta>, records: impl IntoIterator<Item = MunicipalityMetrics>) -> Self {
        let municipalities = records.into_iter()
            .map(|record| (record.code.clone(), record))
            .collect();
        Self { meta, municipalities }
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let file: MetricsFile = serde_json::from_slice(bytes)
            .context("[metrics::read] failed to parse metrics JSON")?;
        Ok(file.into_dataset())
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_json_bytes(text.as_bytes())
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let bytes = common::read_file_bytes(path)?;
        Self::from_json_bytes(&bytes)
            .with_context(|| format!("[metrics::read] failed to load {}", path.display()))
    }

    #[cfg(feature = "download")]
    pub fn fetch(url: &str) -> Result<Self> {
        let bytes = common::fetch_bytes(url)?;
        Self::from_json_bytes(&bytes)
            .with_context(|| format!("[metrics::fetch] failed to load {url}"))
    }

    pub fn meta(&self) -> Option<&DatasetMeta> { self.meta.as_ref() }

    pub fn get(&self, code: &str) -> Option<&MunicipalityMetrics> {
        self.municipalities.get(code.trim())
    }

    #[inline] pub fn len(&self) -> usize { self.municipalities.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.municipalities.is_empty() }

    /// Records in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &MunicipalityMetrics> { self.municipalities.values() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FilterContext, Office, Round};
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "meta": { "status": "ok", "year": 2022 },
            "municipios": {
                "2704302": {
                    "nome": "Maceió", "abst": 0.21, "secoes": 1500,
                    "zonas": {
                        "1": { "zona": 1, "secoes": 300, "abst": 0.2, "brancos": 0.02, "nulos": 0.03,
                               "top": { "GOV": { "1": [ { "nome": "A", "partido": "MDB", "pct": 0.5 },
                                                        { "nome": "B", "partido": null, "pct": 0.3 } ] } } }
                    },
                    "winner": { "GOV": { "1": { "nome": "A", "partido": "MDB" } }, "PRES": { "1": { "nome": "X" } } }
                },
                "2700102": { "nome": null, "abst": null, "secoes": 0, "zonas": {}, "winner": {} }
            }
        })
    }

    #[test]
    fn decodes_wire_schema() {
        let ds = MetricsDataset::from_json_str(&sample().to_string()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.meta().and_then(|m| m.year), Some(2022));

        let m = ds.get("2704302").unwrap();
        assert_eq!(m.name, "Maceió");
        assert_eq!(m.abstention_rate, Some(0.21));
        assert_eq!(m.section_count, Some(1500));

        let gov1 = FilterContext::new(Office::Governor, Round::First);
        assert_eq!(m.winner(&gov1).and_then(|w| w.party.as_deref()), Some("MDB"));
        // unknown office is skipped, not fatal
        assert_eq!(m.winners.len(), 1);

        let zone = m.zone("1").unwrap();
        assert_eq!(zone.blank_vote_rate, Some(0.02));
        let ranking = zone.ranking(&gov1).unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[1].party, None);
    }

    #[test]
    fn missing_name_falls_back_to_code() {
        let ds = MetricsDataset::from_json_str(&sample().to_string()).unwrap();
        let m = ds.get("2700102").unwrap();
        assert_eq!(m.name, "2700102");
        assert_eq!(m.abstention_rate, None);
        assert!(m.zones.is_empty());
    }

    #[test]
    fn malformed_values_decode_as_absent() {
        let doc = json!({
            "municipios": {
                "2704302": {
                    "nome": "Maceió", "abst": 0.21, "secoes": 12.0,
                    "zonas": {
                        "1": { "secoes": 3.5, "abst": "n/a",
                               "top": { "GOV": { "1": [ { "nome": null, "partido": "MDB", "pct": 0.5 },
                                                        { "nome": "B", "partido": 7, "pct": null } ] } } }
                    },
                    "winner": { "GOV": { "1": { "nome": "A", "partido": null } } }
                },
                "2700102": { "nome": "Água Branca", "abst": 0.4 }
            }
        });
        let ds = MetricsDataset::from_json_str(&doc.to_string()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get("2700102").unwrap().abstention_rate, Some(0.4));

        let m = ds.get("2704302").unwrap();
        assert_eq!(m.section_count, Some(12));

        let zone = m.zone("1").unwrap();
        assert_eq!(zone.section_count, None);
        assert_eq!(zone.abstention_rate, None);

        let gov1 = FilterContext::new(Office::Governor, Round::First);
        let ranking = zone.ranking(&gov1).unwrap();
        assert_eq!(ranking[0].name, "");
        assert_eq!(ranking[0].percentage, Some(0.5));
        assert_eq!(ranking[1].party, None);
        assert_eq!(ranking[1].percentage, None);
        assert_eq!(m.winner(&gov1).and_then(|w| w.name.as_deref()), Some("A"));
    }

    #[test]
    fn empty_dataset_is_valid() {
        let ds = MetricsDataset::from_json_str(r#"{ "municipios": {} }"#).unwrap();
        assert!(ds.is_empty());
        assert!(ds.meta().is_none());
    }

    #[test]
    fn rejects_non_metrics_documents() {
        assert!(MetricsDataset::from_json_str("{}").is_err());
        assert!(MetricsDataset::from_json_str("[1, 2]").is_err());
        assert!(MetricsDataset::from_json_str("<html>404</html>").is_err());
    }
}
