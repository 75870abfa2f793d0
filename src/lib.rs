#![doc = "VotoMap public API"]
mod classify;
mod common;
mod config;
mod detail;
mod features;
mod metrics;
mod ranking;
mod render;
mod selection;
mod sync;
mod types;

#[doc(inline)]
pub use types::{FilterContext, MunicipalityCode, Office, Round, ZoneCode};

#[doc(inline)]
pub use features::{key, FeatureCollection, FeatureIndex, GeoFeature};

#[doc(inline)]
pub use metrics::{
    CandidateResult, DatasetMeta, MetricsDataset, MetricsRepository, MunicipalityMetrics,
    RepositoryStatus, WinnerSummary, ZoneMetrics,
};

#[doc(inline)]
pub use classify::{
    classify, fmt_pct, summarize, tone, Rgb, Tone, Tooltip, VisualClass, ABSENT, DEFAULT_OPACITY,
    DIMMED_OPACITY, ELEVATED_ABSTENTION, HIGH_ABSTENTION, STROKE_COLOR, STROKE_WEIGHT,
};

#[doc(inline)]
pub use selection::SelectionState;

#[doc(inline)]
pub use ranking::{top_candidates, TOP_N};

#[doc(inline)]
pub use detail::{DetailView, MunicipalityDetail, ZoneDetail, ZoneRow};

pub use detail::resolve as resolve_detail;

#[doc(inline)]
pub use sync::{FeatureStyle, GeometryStatus, RenderSink, StyleBuffer, SyncController};

#[doc(inline)]
pub use render::SvgSink;

#[doc(inline)]
pub use config::DataSources;
