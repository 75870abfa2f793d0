//! Join key extraction from loosely-shaped feature properties.
//!
//! Boundary files from different providers name the municipality code and the
//! display name differently. Each is looked up through a fixed, ordered list of
//! candidate property names; the first usable value wins.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde_json::{Map, Value};

use crate::types::MunicipalityCode;

/// Property names that may hold the municipality code, in lookup order.
pub const CODE_PROPERTIES: [&str; 4] = ["CD_MUN", "cod_mun", "code_muni", "id"];

/// Property names that may hold the municipality display name, in lookup order.
pub const NAME_PROPERTIES: [&str; 3] = ["NM_MUN", "nome", "name"];

/// Display name for features that carry none.
pub const FALLBACK_NAME: &str = "Município";

/// Any string-keyed property mapping.
pub trait Properties {
    fn property(&self, key: &str) -> Option<&Value>;
}

impl Properties for Map<String, Value> {
    fn property(&self, key: &str) -> Option<&Value> { self.get(key) }
}

impl<S: BuildHasher> Properties for HashMap<String, Value, S> {
    fn property(&self, key: &str) -> Option<&Value> { self.get(key) }
}

impl Properties for BTreeMap<String, Value> {
    fn property(&self, key: &str) -> Option<&Value> { self.get(key) }
}

/// Extract the canonical municipality code, or `None` for an unjoinable feature.
pub fn normalize<P: Properties + ?Sized>(properties: &P) -> Option<MunicipalityCode> {
    first_text(properties, &CODE_PROPERTIES).and_then(|code| MunicipalityCode::new(&code))
}

/// Extract the display name, if the feature carries one.
pub fn display_name<P: Properties + ?Sized>(properties: &P) -> Option<String> {
    first_text(properties, &NAME_PROPERTIES)
}

fn first_text<P: Properties + ?Sized>(properties: &P, candidates: &[&str]) -> Option<String> {
    candidates.iter().find_map(|key| properties.property(key).and_then(value_to_text))
}

/// Coerce a property value to non-empty text. Integral numbers print without
/// a fractional part; null, booleans, arrays and objects are not usable.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() { return Some(i.to_string()) }
            if let Some(u) = n.as_u64() { return Some(u.to_string()) }
            let f = n.as_f64().filter(|f| f.is_finite())?;
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", f as i64))
            } else {
                Some(f.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn first_candidate_wins() {
        let p = props(json!({ "id": "9", "code_muni": "7", "CD_MUN": "2704302" }));
        assert_eq!(normalize(&p).unwrap().as_str(), "2704302");
    }

    #[test]
    fn skips_empty_and_unusable_values() {
        let p = props(json!({ "CD_MUN": "", "cod_mun": null, "code_muni": [1], "id": "  2700102 " }));
        assert_eq!(normalize(&p).unwrap().as_str(), "2700102");
    }

    #[test]
    fn numbers_are_coerced() {
        assert_eq!(normalize(&props(json!({ "CD_MUN": 2704302 }))).unwrap().as_str(), "2704302");
        assert_eq!(normalize(&props(json!({ "cod_mun": 2704302.0 }))).unwrap().as_str(), "2704302");
        assert_eq!(normalize(&props(json!({ "id": 12.5 }))).unwrap().as_str(), "12.5");
    }

    #[test]
    fn unjoinable_feature_has_no_code() {
        assert!(normalize(&props(json!({}))).is_none());
        assert!(normalize(&props(json!({ "CD_MUN": "   ", "other": "1" }))).is_none());
        assert!(normalize(&props(json!({ "id": true }))).is_none());
    }

    #[test]
    fn never_returns_empty_text() {
        let samples = [
            json!({}),
            json!({ "CD_MUN": "" }),
            json!({ "CD_MUN": " " }),
            json!({ "CD_MUN": {}, "id": "" }),
            json!({ "code_muni": 0 }),
            json!({ "cod_mun": "x" }),
        ];
        for sample in samples {
            if let Some(code) = normalize(&props(sample)) {
                assert!(!code.as_str().is_empty());
            }
        }
    }

    #[test]
    fn name_candidates() {
        assert_eq!(display_name(&props(json!({ "name": "b", "nome": "Maceió" }))).as_deref(), Some("Maceió"));
        assert_eq!(display_name(&props(json!({ "NM_MUN": "Arapiraca", "nome": "x" }))).as_deref(), Some("Arapiraca"));
        assert_eq!(display_name(&props(json!({ "CD_MUN": "1" }))), None);
    }

    #[test]
    fn works_over_other_maps() {
        let mut p: HashMap<String, Value> = HashMap::new();
        p.insert("code_muni".into(), json!("2700300"));
        assert_eq!(normalize(&p).unwrap().as_str(), "2700300");

        let mut p: BTreeMap<String, Value> = BTreeMap::new();
        p.insert("nome".into(), json!("Penedo"));
        assert_eq!(display_name(&p).as_deref(), Some("Penedo"));
    }
}
