mod feature;
mod index;
pub mod key;

pub use feature::{FeatureCollection, GeoFeature};
pub use index::FeatureIndex;
