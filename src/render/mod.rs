//! Static renderings of the choropleth.

mod svg;

pub use svg::SvgSink;
