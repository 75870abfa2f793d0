mod dataset;
mod record;
mod repository;
mod wire;

pub use dataset::MetricsDataset;
pub use record::{CandidateResult, DatasetMeta, MunicipalityMetrics, WinnerSummary, ZoneMetrics};
pub use repository::{MetricsRepository, RepositoryStatus};
