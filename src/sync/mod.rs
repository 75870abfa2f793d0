mod controller;
mod sink;

pub use controller::{GeometryStatus, SyncController};
pub use sink::{FeatureStyle, RenderSink, StyleBuffer};
