use serde::Serialize;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use votomap_core::{
    FeatureCollection, FeatureStyle, MetricsDataset, MunicipalityCode, Office, Round, StyleBuffer,
    SyncController,
};

use crate::common::*;

/// Leaflet path options for one feature, plus its tooltip text.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeafletStyle<'a> {
    feature: usize,
    key: Option<&'a MunicipalityCode>,
    color: String,
    weight: f64,
    fill_color: String,
    fill_opacity: f64,
    tooltip: String,
}

impl<'a> From<&'a FeatureStyle> for LeafletStyle<'a> {
    fn from(style: &'a FeatureStyle) -> Self {
        Self {
            feature: style.feature,
            key: style.key.as_ref(),
            color: style.class.stroke_color.to_string(),
            weight: style.class.stroke_weight,
            fill_color: style.class.fill_color.to_string(),
            fill_opacity: style.class.fill_opacity,
            tooltip: style.tooltip.to_string(),
        }
    }
}

#[derive(Serialize)]
struct MunicipalityEntry<'a> {
    code: &'a MunicipalityCode,
    name: &'a str,
}

/// The dashboard session: both datasets, the filter, and the selection.
///
/// The page fetches `municipios_al.geojson` and `metrics_2022.json`, hands the
/// text (or the failure) over, then reads `styles()` after every event.
#[wasm_bindgen]
pub struct WasmDashboard {
    inner: SyncController<StyleBuffer>,
}

#[wasm_bindgen]
impl WasmDashboard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmDashboard {
        WasmDashboard { inner: SyncController::new(StyleBuffer::new()) }
    }

    /// Hand over the boundary collection. A parse failure leaves the map
    /// unavailable and is also thrown.
    pub fn load_geojson(&mut self, text: &str) -> Result<(), JsValue> {
        match FeatureCollection::from_geojson_str(text) {
            Ok(features) => {
                self.inner.on_geometry_loaded(features);
                Ok(())
            }
            Err(err) => {
                let reason = format!("{err:#}");
                self.inner.on_geometry_failed(&reason);
                Err(js_err(reason))
            }
        }
    }

    /// The boundary request failed (network error, 404, ...).
    pub fn geometry_failed(&mut self, reason: &str) {
        console_warn(reason);
        self.inner.on_geometry_failed(reason);
    }

    /// Hand over the metrics dataset. A parse failure is not thrown: the
    /// panel switches to its "data not found" view instead.
    pub fn load_metrics(&mut self, text: &str) {
        self.inner.on_metrics_result(MetricsDataset::from_json_str(text));
    }

    /// The metrics request failed (network error, 404, ...).
    pub fn metrics_failed(&mut self, reason: &str) {
        console_warn(reason);
        self.inner.on_metrics_failed(reason);
    }

    /// Office key: GOV, SEN, DF or DE. Returns whether the map changed.
    pub fn set_office(&mut self, key: &str) -> Result<bool, JsValue> {
        let office = Office::from_key(key).ok_or_else(|| js_err(format!("Unknown office {key:?}")))?;
        Ok(self.inner.set_office(office))
    }

    /// Round: 1 or 2. Returns whether the map changed.
    pub fn set_round(&mut self, round: u8) -> Result<bool, JsValue> {
        let round = Round::from_number(round).ok_or_else(|| js_err(format!("Unknown round {round}")))?;
        Ok(self.inner.set_round(round))
    }

    pub fn click_feature(&mut self, feature: usize) -> bool {
        self.inner.click_feature(feature)
    }

    pub fn click_at(&mut self, lon: f64, lat: f64) -> bool {
        self.inner.click_at(lon, lat)
    }

    pub fn select_municipality(&mut self, code: &str) -> bool {
        self.inner.select_municipality(code)
    }

    pub fn select_zone(&mut self, zone: &str) -> bool {
        self.inner.select_zone(zone)
    }

    /// Whether both datasets have resolved and the map is interactive.
    pub fn is_ready(&self) -> bool {
        self.inner.is_initialized()
    }

    /// Latest per-feature Leaflet styles, in feature order.
    pub fn styles(&self) -> Result<JsValue, JsValue> {
        let out: Vec<LeafletStyle> = self.inner.sink().styles().map(LeafletStyle::from).collect();
        to_js(&out)
    }

    /// Detail panel view for the current filter and selection.
    pub fn detail(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.detail())
    }

    /// Same as `detail()`, rendered as plain text.
    pub fn detail_text(&self) -> String {
        self.inner.detail().to_string()
    }

    /// Current selection as `{ kind, code?, zone? }`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.selection())
    }

    /// Municipalities with metrics, ordered by name, for the list selector.
    pub fn municipalities(&self) -> Result<JsValue, JsValue> {
        let out: Vec<MunicipalityEntry> = self.inner.repository().municipalities().into_iter()
            .map(|m| MunicipalityEntry { code: &m.code, name: &m.name })
            .collect();
        to_js(&out)
    }
}

impl Default for WasmDashboard {
    fn default() -> Self { Self::new() }
}
