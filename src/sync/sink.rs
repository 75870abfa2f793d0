use serde::Serialize;

use crate::{
    classify::{Tooltip, VisualClass},
    types::MunicipalityCode,
};

/// The rendering layer, as seen by the sync controller.
///
/// Features are addressed by their index in the loaded collection. Geometry is
/// never re-sent: a pass only pushes styles and tooltips.
pub trait RenderSink {
    /// Called once per feature when the map becomes interactive.
    fn attach(&mut self, _feature: usize, _key: Option<&MunicipalityCode>) {}

    /// Called before every full classification pass.
    fn begin_pass(&mut self, _features: usize) {}

    fn restyle(&mut self, feature: usize, class: &VisualClass, tooltip: &Tooltip);

    /// Called after every full classification pass.
    fn end_pass(&mut self) {}
}

/// Style and tooltip last pushed for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub feature: usize,
    pub key: Option<MunicipalityCode>,
    #[serde(flatten)]
    pub class: VisualClass,
    pub tooltip: Tooltip,
}

/// A sink that keeps the latest style of every feature in memory.
#[derive(Debug, Clone, Default)]
pub struct StyleBuffer {
    keys: Vec<Option<MunicipalityCode>>,
    styles: Vec<Option<FeatureStyle>>,
    passes: usize,
}

impl StyleBuffer {
    pub fn new() -> Self { Self::default() }

    /// Number of completed classification passes.
    #[inline] pub fn passes(&self) -> usize { self.passes }

    pub fn get(&self, feature: usize) -> Option<&FeatureStyle> {
        self.styles.get(feature).and_then(Option::as_ref)
    }

    /// Latest styles, in feature order.
    pub fn styles(&self) -> impl Iterator<Item = &FeatureStyle> {
        self.styles.iter().flatten()
    }
}

impl RenderSink for StyleBuffer {
    fn attach(&mut self, feature: usize, key: Option<&MunicipalityCode>) {
        if self.keys.len() <= feature {
            self.keys.resize(feature + 1, None);
        }
        self.keys[feature] = key.cloned();
    }

    fn begin_pass(&mut self, features: usize) {
        self.styles.resize(features, None);
    }

    fn restyle(&mut self, feature: usize, class: &VisualClass, tooltip: &Tooltip) {
        if self.styles.len() <= feature {
            self.styles.resize(feature + 1, None);
        }
        self.styles[feature] = Some(FeatureStyle {
            feature,
            key: self.keys.get(feature).cloned().flatten(),
            class: *class,
            tooltip: tooltip.clone(),
        });
    }

    fn end_pass(&mut self) {
        self.passes += 1;
    }
}
