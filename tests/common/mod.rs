#![allow(dead_code)]

use serde_json::{json, Value};

fn square(x: f64) -> Value {
    json!([[[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0], [x, 0.0]]])
}

/// Three unit squares side by side: AL001, AL002, and one without a code.
pub fn boundaries() -> String {
    json!({
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "CD_MUN": "AL001", "NM_MUN": "Alfa" },
              "geometry": { "type": "Polygon", "coordinates": square(0.0) } },
            { "type": "Feature", "properties": { "cod_mun": 2, "nome": "Beta" },
              "geometry": { "type": "MultiPolygon", "coordinates": [square(1.0)] } },
            { "type": "Feature", "properties": { "name": "Lagoa" },
              "geometry": { "type": "Polygon", "coordinates": square(2.0) } }
        ]
    })
    .to_string()
}

pub fn metrics() -> String {
    let top: Vec<Value> = (1..=8)
        .map(|i| json!({ "nome": format!("Candidato {i}"), "partido": "P", "pct": 0.5 / i as f64 }))
        .collect();
    json!({
        "meta": { "status": "ok", "year": 2022 },
        "municipios": {
            "AL001": {
                "nome": "Alfa", "abst": 0.36, "secoes": 90,
                "zonas": {
                    "5": { "zona": 5, "secoes": 30, "abst": 0.3, "brancos": 0.02, "nulos": 0.04,
                           "top": { "GOV": { "1": top } } },
                    "10": { "zona": 10, "secoes": 30, "abst": 0.4, "top": {} },
                    "2": { "zona": 2, "secoes": 30, "abst": 0.38 }
                },
                "winner": { "GOV": { "1": { "nome": "Candidato 1", "partido": "P" } } }
            },
            "2": {
                "nome": "Beta", "abst": 0.1, "secoes": 12, "zonas": {},
                "winner": { "GOV": { "1": { "nome": "Fulana", "partido": "Q" } } }
            }
        }
    })
    .to_string()
}
