use std::fmt::Display;

use anyhow::Result;
use geo::Point;
use serde::Serialize;

use crate::{
    classify::{classify, summarize},
    detail::{self, DetailView},
    features::{FeatureCollection, FeatureIndex},
    metrics::{MetricsDataset, MetricsRepository},
    selection::SelectionState,
    types::{FilterContext, MunicipalityCode, Office, Round, ZoneCode},
};
use super::RenderSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug)]
enum Geometry {
    Pending,
    Ready { features: FeatureCollection, index: FeatureIndex },
    Failed { reason: String },
}

/// Join keys and display names, computed once both datasets have resolved.
#[derive(Debug, Default)]
struct Joins {
    keys: Vec<Option<MunicipalityCode>>,
    names: Vec<Option<String>>,
}

/// Owns the session state (datasets, filter, selection) and keeps the
/// rendering layer in sync with it.
///
/// Every event is handled to completion on the caller's thread. Each change of
/// filter or selection triggers one full classification pass over all features.
#[derive(Debug)]
pub struct SyncController<S: RenderSink> {
    geometry: Geometry,
    repo: MetricsRepository,
    ctx: FilterContext,
    selection: SelectionState,
    joins: Option<Joins>,
    sink: S,
}

impl<S: RenderSink> SyncController<S> {
    pub fn new(sink: S) -> Self {
        Self::with_filter(sink, FilterContext::default())
    }

    pub fn with_filter(sink: S, ctx: FilterContext) -> Self {
        Self {
            geometry: Geometry::Pending,
            repo: MetricsRepository::pending(),
            ctx,
            selection: SelectionState::Unselected,
            joins: None,
            sink,
        }
    }

    // ----------------------------------------------------------------------
    // Load events
    // ----------------------------------------------------------------------

    /// Returns whether the collection was taken; a second load is ignored.
    pub fn on_geometry_loaded(&mut self, features: FeatureCollection) -> bool {
        if !self.accepts_geometry() { return false }
        let index = FeatureIndex::new(&features);
        self.geometry = Geometry::Ready { features, index };
        self.try_initialize();
        true
    }

    pub fn on_geometry_failed(&mut self, err: impl Display) -> bool {
        if !self.accepts_geometry() { return false }
        let reason = err.to_string();
        tracing::warn!(error = %reason, "geometry.unavailable");
        self.geometry = Geometry::Failed { reason };
        self.try_initialize();
        true
    }

    pub fn on_geometry_result(&mut self, result: Result<FeatureCollection>) -> bool {
        match result {
            Ok(features) => self.on_geometry_loaded(features),
            Err(err) => self.on_geometry_failed(format!("{err:#}")),
        }
    }

    pub fn on_metrics_loaded(&mut self, dataset: MetricsDataset) -> bool {
        self.on_metrics_result(Ok(dataset))
    }

    pub fn on_metrics_failed(&mut self, err: impl Display) -> bool {
        self.on_metrics_result(Err(anyhow::anyhow!("{err}")))
    }

    /// Returns whether the result was taken. Once metrics have resolved, later
    /// results are dropped before they are turned into a repository.
    pub fn on_metrics_result(&mut self, result: Result<MetricsDataset>) -> bool {
        if !self.accepts_metrics() { return false }
        self.install_repository(MetricsRepository::from_load_result(result));
        true
    }

    /// Install an already-resolved repository.
    pub fn set_repository(&mut self, repo: MetricsRepository) -> bool {
        if !self.accepts_metrics() { return false }
        self.install_repository(repo);
        true
    }

    fn accepts_geometry(&self) -> bool {
        let pending = matches!(self.geometry, Geometry::Pending);
        if !pending {
            tracing::warn!("sync.geometry_ignored: already resolved");
        }
        pending
    }

    fn accepts_metrics(&self) -> bool {
        let pending = !self.repo.is_resolved();
        if !pending {
            tracing::warn!("sync.metrics_ignored: already resolved");
        }
        pending
    }

    fn install_repository(&mut self, repo: MetricsRepository) {
        self.repo = repo;
        self.try_initialize();
    }

    /// First moment both loads have resolved: compute join keys, attach
    /// handlers and run the initial pass.
    fn try_initialize(&mut self) {
        if self.joins.is_some() || !self.repo.is_resolved() {
            return;
        }

        let joins = match &self.geometry {
            Geometry::Pending => return,
            Geometry::Failed { .. } => Joins::default(),
            Geometry::Ready { features, .. } => Joins {
                keys: features.iter().map(|f| f.key()).collect(),
                names: features.iter().map(|f| f.name()).collect(),
            },
        };

        for (idx, key) in joins.keys.iter().enumerate() {
            self.sink.attach(idx, key.as_ref());
        }

        let unjoinable = joins.keys.iter().filter(|k| k.is_none()).count();
        let unmatched = joins.keys.iter().flatten()
            .filter(|k| self.repo.is_loaded() && self.repo.lookup(k.as_str()).is_none())
            .count();
        tracing::info!(
            features = joins.keys.len(),
            unjoinable,
            unmatched,
            metrics = ?self.repo.status(),
            "sync.initialized"
        );

        self.joins = Some(joins);
        self.refresh();
    }

    // ----------------------------------------------------------------------
    // User events
    // ----------------------------------------------------------------------

    /// Change office and round. Returns whether anything changed.
    pub fn set_filter(&mut self, ctx: FilterContext) -> bool {
        if ctx == self.ctx { return false }
        tracing::debug!(office = ctx.office.key(), round = ctx.round.number(), "sync.filter");
        self.ctx = ctx;
        self.refresh();
        true
    }

    pub fn set_office(&mut self, office: Office) -> bool {
        self.set_filter(FilterContext { office, ..self.ctx })
    }

    pub fn set_round(&mut self, round: Round) -> bool {
        self.set_filter(FilterContext { round, ..self.ctx })
    }

    /// A map feature was clicked. Unjoinable features, unknown indices, and
    /// clicks before the map is interactive or without metrics are ignored.
    pub fn click_feature(&mut self, feature: usize) -> bool {
        if !self.repo.is_loaded() {
            tracing::debug!(feature, "sync.click_ignored: metrics not loaded");
            return false;
        }
        let Some(code) = self.join_key(feature).cloned() else {
            tracing::debug!(feature, "sync.click_ignored: no join key");
            return false;
        };
        self.transition(self.selection.click(code))
    }

    /// A pointer click at a lon/lat position. Clicking outside every feature
    /// does nothing (in particular, it does not deselect).
    pub fn click_at(&mut self, lon: f64, lat: f64) -> bool {
        if self.joins.is_none() { return false }
        let Geometry::Ready { features, index } = &self.geometry else { return false };
        match index.hit_test(features, Point::new(lon, lat)) {
            Some(feature) => self.click_feature(feature),
            None => false,
        }
    }

    /// Pick a municipality from a list rather than the map; same transition as a click.
    pub fn select_municipality(&mut self, code: &str) -> bool {
        if !self.repo.is_loaded() { return false }
        let Some(code) = MunicipalityCode::new(code) else { return false };
        self.transition(self.selection.click(code))
    }

    /// A zone row was clicked.
    pub fn select_zone(&mut self, zone: &str) -> bool {
        let Some(zone) = ZoneCode::new(zone) else { return false };
        self.transition(self.selection.select_zone(zone))
    }

    fn transition(&mut self, next: SelectionState) -> bool {
        if next == self.selection { return false }
        tracing::debug!(from = ?self.selection, to = ?next, "sync.selection");
        self.selection = next;
        self.refresh();
        true
    }

    /// Full classification pass: every feature's class is recomputed and pushed.
    fn refresh(&mut self) {
        let Some(joins) = &self.joins else { return };

        self.sink.begin_pass(joins.keys.len());
        for (idx, key) in joins.keys.iter().enumerate() {
            let key = key.as_ref();
            let metrics = key.and_then(|k| self.repo.lookup(k.as_str()));
            let class = classify(metrics, &self.ctx, self.selection.dims(key));
            let tooltip = summarize(joins.names[idx].as_deref(), key, metrics, &self.ctx);
            self.sink.restyle(idx, &class, &tooltip);
        }
        self.sink.end_pass();

        tracing::debug!(features = joins.keys.len(), "sync.pass");
    }

    // ----------------------------------------------------------------------
    // Accessors
    // ----------------------------------------------------------------------

    #[inline] pub fn filter(&self) -> &FilterContext { &self.ctx }

    #[inline] pub fn selection(&self) -> &SelectionState { &self.selection }

    #[inline] pub fn repository(&self) -> &MetricsRepository { &self.repo }

    /// Whether the initial pass has run (both loads resolved).
    #[inline] pub fn is_initialized(&self) -> bool { self.joins.is_some() }

    pub fn geometry_status(&self) -> GeometryStatus {
        match self.geometry {
            Geometry::Pending => GeometryStatus::Pending,
            Geometry::Ready { .. } => GeometryStatus::Ready,
            Geometry::Failed { .. } => GeometryStatus::Failed,
        }
    }

    pub fn geometry_failure(&self) -> Option<&str> {
        match &self.geometry {
            Geometry::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn features(&self) -> Option<&FeatureCollection> {
        match &self.geometry {
            Geometry::Ready { features, .. } => Some(features),
            _ => None,
        }
    }

    /// Join key of a feature, once the map is interactive.
    pub fn join_key(&self, feature: usize) -> Option<&MunicipalityCode> {
        self.joins.as_ref()?.keys.get(feature)?.as_ref()
    }

    /// Detail panel for the current state.
    pub fn detail(&self) -> DetailView {
        detail::resolve(&self.repo, &self.ctx, &self.selection)
    }

    #[inline] pub fn sink(&self) -> &S { &self.sink }

    #[inline] pub fn sink_mut(&mut self) -> &mut S { &mut self.sink }

    pub fn into_sink(self) -> S { self.sink }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::StyleBuffer;

    #[test]
    fn no_pass_until_both_resolved() {
        let mut sc = SyncController::new(StyleBuffer::new());
        sc.on_geometry_loaded(FeatureCollection::default());
        assert!(!sc.is_initialized());
        assert_eq!(sc.sink().passes(), 0);

        sc.on_metrics_loaded(MetricsDataset::default());
        assert!(sc.is_initialized());
        assert_eq!(sc.sink().passes(), 1);
    }

    #[test]
    fn second_load_is_ignored() {
        let mut sc = SyncController::new(StyleBuffer::new());
        assert!(sc.on_metrics_failed("404"));
        assert!(!sc.on_metrics_loaded(MetricsDataset::default()));
        assert!(!sc.on_metrics_result(Err(anyhow::anyhow!("late failure"))));
        assert!(!sc.set_repository(MetricsRepository::loaded(MetricsDataset::default())));
        assert!(!sc.repository().is_loaded());
        assert_eq!(sc.repository().unavailable_reason(), Some("404"));

        assert!(sc.on_geometry_loaded(FeatureCollection::default()));
        assert!(!sc.on_geometry_failed("late"));
        assert_eq!(sc.geometry_status(), GeometryStatus::Ready);
        assert_eq!(sc.sink().passes(), 1);
    }

    #[test]
    fn unchanged_filter_is_not_a_change() {
        let mut sc = SyncController::new(StyleBuffer::new());
        assert!(!sc.set_filter(FilterContext::default()));
        assert!(sc.set_office(Office::Senator));
        assert!(!sc.set_office(Office::Senator));
        assert!(sc.set_round(Round::Second));
        assert_eq!(*sc.filter(), FilterContext::new(Office::Senator, Round::Second));
    }

    #[test]
    fn geometry_failure_still_initializes() {
        let mut sc = SyncController::new(StyleBuffer::new());
        sc.on_geometry_failed("no such file");
        sc.on_metrics_loaded(MetricsDataset::default());
        assert!(sc.is_initialized());
        assert_eq!(sc.geometry_status(), GeometryStatus::Failed);
        assert_eq!(sc.geometry_failure(), Some("no such file"));
        assert!(sc.features().is_none());
        assert!(!sc.click_at(0.0, 0.0));
    }
}
