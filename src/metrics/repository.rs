use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::{DatasetMeta, MetricsDataset, MunicipalityMetrics, ZoneMetrics};

/// Where the repository stands in its single load step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RepositoryStatus {
    /// The load has not resolved yet.
    Pending,
    /// The dataset loaded (it may still be empty).
    Loaded,
    /// The load failed; every lookup answers `None`.
    Unavailable,
}

#[derive(Debug, Clone)]
enum State {
    Pending,
    Loaded(MetricsDataset),
    Unavailable { reason: String },
}

/// Read-only view over the metrics dataset of one session.
///
/// Lookups never fail: a pending or unavailable repository, an unknown code, or
/// an unknown zone all answer `None`.
#[derive(Debug, Clone)]
pub struct MetricsRepository {
    state: State,
}

impl Default for MetricsRepository {
    fn default() -> Self { Self::pending() }
}

impl MetricsRepository {
    pub fn pending() -> Self {
        Self { state: State::Pending }
    }

    pub fn loaded(dataset: MetricsDataset) -> Self {
        Self { state: State::Loaded(dataset) }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { state: State::Unavailable { reason: reason.into() } }
    }

    /// Turn the outcome of a load into a repository; errors become `Unavailable`.
    pub fn from_load_result(result: Result<MetricsDataset>) -> Self {
        match result {
            Ok(dataset) => {
                tracing::info!(
                    municipalities = dataset.len(),
                    year = ?dataset.meta().and_then(|m| m.year),
                    "metrics.loaded"
                );
                Self::loaded(dataset)
            }
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(error = %reason, "metrics.unavailable");
                Self::unavailable(reason)
            }
        }
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Self {
        Self::from_load_result(MetricsDataset::from_json_bytes(bytes))
    }

    pub fn read_from_file(path: &Path) -> Self {
        Self::from_load_result(MetricsDataset::read_from_file(path))
    }

    #[cfg(feature = "download")]
    pub fn fetch(url: &str) -> Self {
        Self::from_load_result(MetricsDataset::fetch(url))
    }

    pub fn status(&self) -> RepositoryStatus {
        match self.state {
            State::Pending => RepositoryStatus::Pending,
            State::Loaded(_) => RepositoryStatus::Loaded,
            State::Unavailable { .. } => RepositoryStatus::Unavailable,
        }
    }

    #[inline] pub fn is_loaded(&self) -> bool { matches!(self.state, State::Loaded(_)) }

    #[inline] pub fn is_resolved(&self) -> bool { !matches!(self.state, State::Pending) }

    /// Why the load failed, when it did.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            State::Unavailable { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn dataset(&self) -> Option<&MetricsDataset> {
        match &self.state {
            State::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn meta(&self) -> Option<&DatasetMeta> {
        self.dataset().and_then(MetricsDataset::meta)
    }

    pub fn lookup(&self, code: &str) -> Option<&MunicipalityMetrics> {
        self.dataset()?.get(code)
    }

    pub fn lookup_zone(&self, code: &str, zone: &str) -> Option<&ZoneMetrics> {
        self.lookup(code)?.zone(zone)
    }

    /// Every municipality, sorted by display name (accent-insensitive), then code.
    pub fn municipalities(&self) -> Vec<&MunicipalityMetrics> {
        let Some(dataset) = self.dataset() else { return Vec::new() };
        let mut out: Vec<_> = dataset.iter().collect();
        out.sort_by_cached_key(|m| (collation_key(&m.name), m.code.clone()));
        out
    }

    /// Zones of a municipality in numeric order; empty when unknown.
    pub fn zones(&self, code: &str) -> Vec<&ZoneMetrics> {
        self.lookup(code)
            .map(|m| m.zones.values().collect())
            .unwrap_or_default()
    }
}

/// Lowercase and strip the Portuguese diacritics so "Água Branca" sorts with the A's.
fn collation_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            c => c,
        })
        .collect()
}
