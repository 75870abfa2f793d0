//! Classification engine: metrics record + filter context -> feature style.

mod color;
mod tooltip;
mod visual;

pub use color::Rgb;
pub use tooltip::{fmt_pct, summarize, Tooltip, ABSENT};
pub use visual::{
    classify, tone, Tone, VisualClass, DEFAULT_OPACITY, DIMMED_OPACITY, ELEVATED_ABSTENTION,
    HIGH_ABSTENTION, STROKE_COLOR, STROKE_WEIGHT,
};
