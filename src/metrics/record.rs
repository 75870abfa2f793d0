use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Serialize;

use crate::types::{FilterContext, MunicipalityCode, ZoneCode};

/// One row of a zone ranking. Shares are fractions in [0, 1]; an unreadable
/// share is `None` and an unreadable name is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResult {
    pub name: String,
    pub party: Option<String>,
    pub percentage: Option<f64>,
}

/// Identity of the leading candidate of a municipality, used only for map coloring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WinnerSummary {
    pub name: Option<String>,
    pub party: Option<String>,
}

impl WinnerSummary {
    /// A winner only counts as data when its party is known.
    pub fn has_party(&self) -> bool {
        self.party.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Aggregates of one electoral zone within a municipality.
#[derive(Debug, Clone, Default)]
pub struct ZoneMetrics {
    pub zone: Option<ZoneCode>,
    pub abstention_rate: Option<f64>,
    pub blank_vote_rate: Option<f64>,
    pub null_vote_rate: Option<f64>,
    pub section_count: Option<u32>,
    /// Ranked candidates per (office, round), in upstream (descending share) order.
    pub top: AHashMap<FilterContext, Vec<CandidateResult>>,
}

impl ZoneMetrics {
    /// Full upstream ranking for a context, if one was produced.
    pub fn ranking(&self, ctx: &FilterContext) -> Option<&[CandidateResult]> {
        self.top.get(ctx).map(Vec::as_slice)
    }
}

/// Aggregates of one municipality: the record a map feature joins against.
#[derive(Debug, Clone)]
pub struct MunicipalityMetrics {
    pub code: MunicipalityCode,
    pub name: String,
    pub abstention_rate: Option<f64>,
    pub section_count: Option<u32>,
    /// Zones in numeric order.
    pub zones: BTreeMap<ZoneCode, ZoneMetrics>,
    pub winners: AHashMap<FilterContext, WinnerSummary>,
}

impl MunicipalityMetrics {
    pub fn new(code: MunicipalityCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            abstention_rate: None,
            section_count: None,
            zones: BTreeMap::new(),
            winners: AHashMap::new(),
        }
    }

    pub fn winner(&self, ctx: &FilterContext) -> Option<&WinnerSummary> {
        self.winners.get(ctx)
    }

    pub fn zone(&self, zone: &str) -> Option<&ZoneMetrics> {
        self.zones.get(&ZoneCode::new(zone)?)
    }
}

/// The `meta` block written by the build step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetMeta {
    pub status: Option<String>,
    pub year: Option<u32>,
}
