use std::path::Path;

use anyhow::{Context, Result};
use geo::{BoundingRect, MultiPolygon, Rect};
use serde_json::{Map, Value};

use crate::{common, types::MunicipalityCode};
use super::key;

/// A boundary shape plus the provider's property bag.
#[derive(Debug, Clone)]
pub struct GeoFeature {
    pub geometry: MultiPolygon<f64>,
    pub properties: Map<String, Value>,
}

impl GeoFeature {
    pub fn new(geometry: MultiPolygon<f64>, properties: Map<String, Value>) -> Self {
        Self { geometry, properties }
    }

    /// Canonical join key, if the properties carry one.
    pub fn key(&self) -> Option<MunicipalityCode> { key::normalize(&self.properties) }

    /// Display name, if the properties carry one.
    pub fn name(&self) -> Option<String> { key::display_name(&self.properties) }
}

/// The boundary dataset: every municipality shape of the state, in file order.
/// Feature indices are stable for the lifetime of the collection.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<GeoFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self { features }
    }

    /// Parse a GeoJSON FeatureCollection.
    pub fn from_geojson_bytes(bytes: &[u8]) -> Result<Self> {
        let features = common::read_features_from_geojson_bytes(bytes)?
            .into_iter()
            .map(|(geometry, properties)| GeoFeature::new(geometry, properties))
            .collect::<Vec<_>>();

        tracing::info!(features = features.len(), "geometry.loaded");
        Ok(Self { features })
    }

    pub fn from_geojson_str(text: &str) -> Result<Self> {
        Self::from_geojson_bytes(text.as_bytes())
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let bytes = common::read_file_bytes(path)?;
        Self::from_geojson_bytes(&bytes)
            .with_context(|| format!("[features::read] failed to load {}", path.display()))
    }

    #[cfg(feature = "download")]
    pub fn fetch(url: &str) -> Result<Self> {
        let bytes = common::fetch_bytes(url)?;
        Self::from_geojson_bytes(&bytes)
            .with_context(|| format!("[features::fetch] failed to load {url}"))
    }

    #[inline] pub fn len(&self) -> usize { self.features.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.features.is_empty() }

    #[inline] pub fn get(&self, idx: usize) -> Option<&GeoFeature> { self.features.get(idx) }

    #[inline] pub fn features(&self) -> &[GeoFeature] { &self.features }

    pub fn iter(&self) -> impl Iterator<Item = &GeoFeature> { self.features.iter() }

    /// Bounding box over every non-empty shape.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.features.iter()
            .filter_map(|feature| feature.geometry.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            })
    }
}
