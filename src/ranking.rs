//! Candidate rankings of a zone under the current filter.

use crate::{
    metrics::{CandidateResult, ZoneMetrics},
    types::FilterContext,
};

/// Rows the detail panel shows per zone ranking.
pub const TOP_N: usize = 5;

/// The first `limit` candidates of a zone for `ctx`, in upstream order.
/// An absent zone or an absent (office, round) ranking is an empty slice.
pub fn top_candidates<'a>(zone: Option<&'a ZoneMetrics>, ctx: &FilterContext, limit: usize) -> &'a [CandidateResult] {
    let Some(ranking) = zone.and_then(|z| z.ranking(ctx)) else { return &[] };
    &ranking[..ranking.len().min(limit)]
}
