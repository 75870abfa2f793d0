use std::{env, path::PathBuf};

/// Environment variable overriding the metrics dataset location.
pub const METRICS_PATH_ENV: &str = "VOTOMAP_METRICS_PATH";
/// Environment variable overriding the boundary collection location.
pub const GEOJSON_PATH_ENV: &str = "VOTOMAP_GEOJSON_PATH";

pub const DEFAULT_METRICS_PATH: &str = "public/data/metrics_2022.json";
pub const DEFAULT_GEOJSON_PATH: &str = "public/data/municipios_al.geojson";

/// Where the two datasets are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub metrics: PathBuf,
    pub geojson: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            metrics: PathBuf::from(DEFAULT_METRICS_PATH),
            geojson: PathBuf::from(DEFAULT_GEOJSON_PATH),
        }
    }
}

impl DataSources {
    /// Defaults, with any location set in the environment taking precedence.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |key: &str, default: &str| -> PathBuf {
            match lookup(key).filter(|value| !value.trim().is_empty()) {
                Some(value) => {
                    tracing::info!(key, path = %value, "config.source=env");
                    PathBuf::from(value)
                }
                None => PathBuf::from(default),
            }
        };

        Self {
            metrics: resolve(METRICS_PATH_ENV, DEFAULT_METRICS_PATH),
            geojson: resolve(GEOJSON_PATH_ENV, DEFAULT_GEOJSON_PATH),
        }
    }

    /// Apply explicit overrides (e.g. command-line flags) on top.
    pub fn with_overrides(mut self, metrics: Option<PathBuf>, geojson: Option<PathBuf>) -> Self {
        if let Some(path) = metrics { self.metrics = path; }
        if let Some(path) = geojson { self.geojson = path; }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let sources = DataSources::from_lookup(|_| None);
        assert_eq!(sources, DataSources::default());
        assert_eq!(sources.metrics, PathBuf::from("public/data/metrics_2022.json"));
    }

    #[test]
    fn environment_overrides_one_source() {
        let sources = DataSources::from_lookup(|key| {
            (key == METRICS_PATH_ENV).then(|| "/tmp/m.json".to_string())
        });
        assert_eq!(sources.metrics, PathBuf::from("/tmp/m.json"));
        assert_eq!(sources.geojson, PathBuf::from(DEFAULT_GEOJSON_PATH));
    }

    #[test]
    fn blank_environment_value_is_ignored() {
        let sources = DataSources::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(sources, DataSources::default());
    }

    #[test]
    fn flags_win_over_environment() {
        let sources = DataSources::from_lookup(|_| Some("/env/path".to_string()))
            .with_overrides(Some(PathBuf::from("flag.json")), None);
        assert_eq!(sources.metrics, PathBuf::from("flag.json"));
        assert_eq!(sources.geojson, PathBuf::from("/env/path"));
    }
}
