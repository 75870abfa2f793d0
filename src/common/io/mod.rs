mod geojson;
mod svg;

pub(crate) use geojson::*;
pub(crate) use svg::*;
