use std::fmt;

use serde::Serialize;

use crate::{
    features::key::FALLBACK_NAME,
    metrics::{MunicipalityMetrics, WinnerSummary},
    types::{FilterContext, MunicipalityCode},
};

/// Placeholder shown for absent values.
pub const ABSENT: &str = "—";

/// Format a fraction as a percentage with one decimal, or the absent marker.
pub fn fmt_pct(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => ABSENT.to_string(),
    }
}

/// Hover summary of one map feature under the current filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub name: String,
    pub code: Option<MunicipalityCode>,
    pub abstention: Option<f64>,
    pub winner: Option<WinnerSummary>,
}

/// Build the tooltip of a feature from its own name and its joined record.
pub fn summarize(
    feature_name: Option<&str>,
    code: Option<&MunicipalityCode>,
    metrics: Option<&MunicipalityMetrics>,
    ctx: &FilterContext,
) -> Tooltip {
    Tooltip {
        name: feature_name.unwrap_or(FALLBACK_NAME).to_string(),
        code: code.cloned(),
        abstention: metrics.and_then(|m| m.abstention_rate),
        winner: metrics.and_then(|m| m.winner(ctx)).cloned(),
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code.as_ref().map(MunicipalityCode::as_str).unwrap_or_default();
        let winner = self.winner.as_ref();
        let name = winner.and_then(|w| w.name.as_deref()).unwrap_or(ABSENT);
        let party = winner.and_then(|w| w.party.as_deref()).unwrap_or(ABSENT);

        writeln!(f, "{}", self.name)?;
        writeln!(f, "Código: {code}")?;
        writeln!(f, "Abstenção: {}", fmt_pct(self.abstention))?;
        write!(f, "Vencedor: {name} ({party})")
    }
}
