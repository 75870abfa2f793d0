use serde::Serialize;

use crate::{metrics::MunicipalityMetrics, types::FilterContext};
use super::Rgb;

/// Abstention rate at or above which a municipality is flagged as elevated.
pub const ELEVATED_ABSTENTION: f64 = 0.25;
/// Abstention rate at or above which a municipality is flagged as high.
pub const HIGH_ABSTENTION: f64 = 0.35;

/// Fill opacity of features outside the current selection.
pub const DIMMED_OPACITY: f64 = 0.25;
/// Fill opacity of every other feature.
pub const DEFAULT_OPACITY: f64 = 0.65;

pub const STROKE_COLOR: Rgb = Rgb::new(0x11, 0x18, 0x27);
pub const STROKE_WEIGHT: f64 = 1.0;

/// Data class a feature's fill communicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tone {
    NoData,
    HasData,
    Elevated,
    High,
}

impl Tone {
    pub fn color(&self) -> Rgb {
        match self {
            Tone::NoData => Rgb::new(0x1f, 0x29, 0x37),
            Tone::HasData => Rgb::new(0x0e, 0xa5, 0xe9),
            Tone::Elevated => Rgb::new(0xf5, 0x9e, 0x0b),
            Tone::High => Rgb::new(0xef, 0x44, 0x44),
        }
    }
}

/// Style of one map feature. Only the fill carries data; the stroke is constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualClass {
    pub tone: Tone,
    pub fill_color: Rgb,
    pub fill_opacity: f64,
    pub stroke_color: Rgb,
    pub stroke_weight: f64,
}

impl VisualClass {
    pub fn new(tone: Tone, dimmed: bool) -> Self {
        Self {
            tone,
            fill_color: tone.color(),
            fill_opacity: if dimmed { DIMMED_OPACITY } else { DEFAULT_OPACITY },
            stroke_color: STROKE_COLOR,
            stroke_weight: STROKE_WEIGHT,
        }
    }
}

/// Pick the tone of a municipality under a filter context.
///
/// The winner check runs first and the abstention thresholds run after it in
/// ascending order, so the most severe matching threshold always wins.
pub fn tone(metrics: Option<&MunicipalityMetrics>, ctx: &FilterContext) -> Tone {
    let Some(metrics) = metrics else { return Tone::NoData };

    let mut tone = Tone::NoData;
    if metrics.winner(ctx).is_some_and(|w| w.has_party()) {
        tone = Tone::HasData;
    }
    if let Some(rate) = metrics.abstention_rate {
        if rate >= ELEVATED_ABSTENTION { tone = Tone::Elevated }
        if rate >= HIGH_ABSTENTION { tone = Tone::High }
    }
    tone
}

/// Derive the visual class of one feature. Pure: same inputs, same class.
pub fn classify(metrics: Option<&MunicipalityMetrics>, ctx: &FilterContext, dimmed: bool) -> VisualClass {
    VisualClass::new(tone(metrics, ctx), dimmed)
}
