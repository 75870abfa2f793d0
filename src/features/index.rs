use geo::{BoundingRect, Intersects, Point, Rect};
use rstar::{RTree, RTreeObject, AABB};

use super::FeatureCollection;

#[derive(Debug, Clone)]
struct FeatureBox {
    idx: usize, // Index of the feature in its collection
    bbox: Rect<f64>,
}

impl RTreeObject for FeatureBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Spatial index resolving a pointer position (lon/lat) to the feature under it.
#[derive(Debug, Clone)]
pub struct FeatureIndex {
    rtree: RTree<FeatureBox>,
}

impl FeatureIndex {
    /// Index every feature with a non-empty shape.
    pub fn new(features: &FeatureCollection) -> Self {
        Self {
            rtree: RTree::bulk_load(features.iter().enumerate()
                .filter_map(|(idx, feature)| {
                    feature.geometry.bounding_rect().map(|bbox| FeatureBox { idx, bbox })
                })
                .collect()),
        }
    }

    /// Index of the feature containing `point` (boundary included).
    /// Overlapping shapes resolve to the lowest index.
    pub fn hit_test(&self, features: &FeatureCollection, point: Point<f64>) -> Option<usize> {
        let envelope = AABB::from_point([point.x(), point.y()]);
        self.rtree.locate_in_envelope_intersecting(&envelope)
            .map(|candidate| candidate.idx)
            .filter(|&idx| features.get(idx).is_some_and(|f| f.geometry.intersects(&point)))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::GeoFeature;
    use geo::{polygon, MultiPolygon};
    use serde_json::Map;

    fn collection() -> FeatureCollection {
        let triangle = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 0.0, y: 2.0)];
        let square = polygon![(x: 2.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 1.0), (x: 2.0, y: 1.0)];
        FeatureCollection::new(vec![
            GeoFeature::new(MultiPolygon(vec![triangle]), Map::new()),
            GeoFeature::new(MultiPolygon(Vec::new()), Map::new()),
            GeoFeature::new(MultiPolygon(vec![square]), Map::new()),
        ])
    }

    #[test]
    fn resolves_points_inside_shapes() {
        let fc = collection();
        let index = FeatureIndex::new(&fc);
        assert_eq!(index.hit_test(&fc, Point::new(0.5, 0.5)), Some(0));
        assert_eq!(index.hit_test(&fc, Point::new(2.5, 0.5)), Some(2));
    }

    #[test]
    fn misses_outside_shapes() {
        let fc = collection();
        let index = FeatureIndex::new(&fc);
        // inside the triangle's bounding box but outside the triangle
        assert_eq!(index.hit_test(&fc, Point::new(1.8, 1.8)), None);
        assert_eq!(index.hit_test(&fc, Point::new(-5.0, 0.0)), None);
    }

    #[test]
    fn shared_edge_resolves_to_lowest_index() {
        let fc = collection();
        let index = FeatureIndex::new(&fc);
        assert_eq!(index.hit_test(&fc, Point::new(2.0, 0.0)), Some(0));
    }
}
