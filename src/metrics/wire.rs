//! On-disk shape of the metrics dataset, as written by the build step.
//!
//! Office and round keys are strings on disk; they are converted to typed
//! contexts here. Keys this engine doesn't know are skipped with a warning so a
//! newer dataset never fails the whole load. Scalar values of the wrong shape
//! (null names, null shares, counts written as `12.0`) decode as absent.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::{FilterContext, MunicipalityCode, Office, Round, ZoneCode};
use super::{CandidateResult, DatasetMeta, MetricsDataset, MunicipalityMetrics, WinnerSummary, ZoneMetrics};

type ByContext<T> = BTreeMap<String, BTreeMap<String, T>>;

#[derive(Debug, Deserialize)]
pub(super) struct MetricsFile {
    #[serde(default)]
    meta: Option<WireMeta>,
    municipios: BTreeMap<String, WireMunicipality>,
}

#[derive(Debug, Deserialize)]
struct WireMeta {
    #[serde(default, deserialize_with = "lenient_text")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    year: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct WireMunicipality {
    #[serde(default, deserialize_with = "lenient_text")]
    nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_rate")]
    abst: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    secoes: Option<u32>,
    #[serde(default)]
    zonas: BTreeMap<String, WireZone>,
    #[serde(default)]
    winner: ByContext<WireWinner>,
}

#[derive(Debug, Deserialize)]
struct WireZone {
    #[serde(default, deserialize_with = "lenient_count")]
    secoes: Option<u32>,
    #[serde(default, deserialize_with = "lenient_rate")]
    abst: Option<f64>,
    #[serde(default, deserialize_with = "lenient_rate")]
    brancos: Option<f64>,
    #[serde(default, deserialize_with = "lenient_rate")]
    nulos: Option<f64>,
    #[serde(default)]
    top: ByContext<Vec<WireCandidate>>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    #[serde(default, deserialize_with = "lenient_text")]
    nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    partido: Option<String>,
    #[serde(default, deserialize_with = "lenient_rate")]
    pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireWinner {
    #[serde(default, deserialize_with = "lenient_text")]
    nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    partido: Option<String>,
}

impl MetricsFile {
    pub(super) fn into_dataset(self) -> MetricsDataset {
        let meta = self.meta.map(|m| DatasetMeta { status: m.status, year: m.year });

        let mut municipalities = AHashMap::with_capacity(self.municipios.len());
        for (key, raw) in self.municipios {
            let Some(code) = MunicipalityCode::new(&key) else {
                tracing::warn!(key = %key, "metrics.skip_municipality: blank code");
                continue;
            };
            municipalities.insert(code.clone(), raw.into_metrics(code));
        }

        MetricsDataset { meta, municipalities }
    }
}

impl WireMunicipality {
    fn into_metrics(self, code: MunicipalityCode) -> MunicipalityMetrics {
        let name = self.nome
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| code.to_string());

        let mut zones = BTreeMap::new();
        for (key, raw) in self.zonas {
            let Some(zone) = ZoneCode::new(&key) else {
                tracing::warn!(municipality = %code, key = %key, "metrics.skip_zone: blank code");
                continue;
            };
            zones.insert(zone.clone(), raw.into_metrics(zone));
        }

        let winners = by_context(self.winner, &code)
            .into_iter()
            .map(|(ctx, w)| (ctx, WinnerSummary { name: w.nome, party: w.partido }))
            .collect();

        MunicipalityMetrics {
            code,
            name,
            abstention_rate: self.abst,
            section_count: self.secoes,
            zones,
            winners,
        }
    }
}

impl WireZone {
    fn into_metrics(self, zone: ZoneCode) -> ZoneMetrics {
        let top = by_context(self.top, &zone)
            .into_iter()
            .map(|(ctx, rows)| {
                let rows = rows.into_iter()
                    .map(|c| CandidateResult {
                        name: c.nome.unwrap_or_default(),
                        party: c.partido,
                        percentage: c.pct,
                    })
                    .collect();
                (ctx, rows)
            })
            .collect();

        ZoneMetrics {
            zone: Some(zone),
            abstention_rate: self.abst,
            blank_vote_rate: self.brancos,
            null_vote_rate: self.nulos,
            section_count: self.secoes,
            top,
        }
    }
}

/// Any JSON text; other values are absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Any finite JSON number; other values are absent.
fn lenient_rate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64().filter(|v| v.is_finite()))
}

/// A non-negative integral JSON number, including integral floats (`12.0`).
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return Ok(u32::try_from(n).ok());
    }
    Ok(value.as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
        .map(|f| f as u32))
}

/// Flatten an office -> round -> value mapping into typed contexts.
fn by_context<T>(raw: ByContext<T>, owner: &dyn std::fmt::Display) -> Vec<(FilterContext, T)> {
    let mut out = Vec::new();
    for (office_key, rounds) in raw {
        let Some(office) = Office::from_key(&office_key) else {
            tracing::warn!(owner = %owner, office = %office_key, "metrics.skip_office: unknown key");
            continue;
        };
        for (round_key, value) in rounds {
            match Round::from_key(&round_key) {
                Some(round) => out.push((FilterContext::new(office, round), value)),
                None => tracing::warn!(owner = %owner, round = %round_key, "metrics.skip_round: unknown key"),
            }
        }
    }
    out
}
