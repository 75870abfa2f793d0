use std::{io::Write, path::Path};

use anyhow::{anyhow, Result};

use crate::{
    classify::{Tooltip, VisualClass},
    common,
    features::FeatureCollection,
    sync::RenderSink,
};

/// A render sink that draws the latest classification pass as an SVG choropleth.
///
/// Each feature becomes one `<path>` filled with its class color, carrying its
/// tooltip text as a `<title>`.
#[derive(Debug, Clone, Default)]
pub struct SvgSink {
    styles: Vec<Option<(VisualClass, String)>>,
}

impl SvgSink {
    pub fn new() -> Self { Self::default() }

    /// Number of features styled by the last pass.
    pub fn styled(&self) -> usize { self.styles.iter().flatten().count() }

    /// Small wrapper with defaults.
    pub fn write_svg(&self, features: &FeatureCollection, path: &Path) -> Result<()> {
        self.write_svg_with_size(features, path, 1200, 10)
    }

    pub fn write_svg_with_size(&self, features: &FeatureCollection, path: &Path, width: u32, margin: u32) -> Result<()> {
        common::ensure_parent_dir(path)?;
        let mut writer = common::SvgWriter::new(path)?;
        self.draw(&mut writer, features, width as f64, margin as f64)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), features = features.len(), "render.svg_written");
        Ok(())
    }

    pub fn to_svg_string(&self, features: &FeatureCollection) -> Result<String> {
        self.to_svg_string_with_size(features, 1200, 10)
    }

    pub fn to_svg_string_with_size(&self, features: &FeatureCollection, width: u32, margin: u32) -> Result<String> {
        let mut writer = common::SvgStringWriter::new();
        self.draw(&mut writer, features, width as f64, margin as f64)?;
        writer.into_string()
    }

    fn draw<W: Write>(&self, writer: &mut W, features: &FeatureCollection, width: f64, margin: f64) -> Result<()> {
        let bounds = features.bounds()
            .ok_or_else(|| anyhow!("[render::svg] Could not determine bounds; nothing to draw."))?;
        let (project, height) = common::fit_projection(bounds, width, margin);

        common::write_svg_header(writer, width, height, &bounds)?;
        common::write_svg_styles(writer)?;

        for (idx, feature) in features.iter().enumerate() {
            // Features never styled (no pass yet) are skipped.
            let Some(Some((class, title))) = self.styles.get(idx) else { continue };
            let d = common::multipolygon_to_path(&feature.geometry, project.as_ref());
            if d.is_empty() { continue }

            writeln!(
                writer,
                r#"<path class="mun" data-feature="{idx}" fill-rule="evenodd" style="fill:{fill};fill-opacity:{opacity};stroke:{stroke};stroke-width:{weight}" d="{d}"><title>{title}</title></path>"#,
                fill = class.fill_color,
                opacity = class.fill_opacity,
                stroke = class.stroke_color,
                weight = class.stroke_weight,
                title = common::escape_xml(title),
            )?;
        }

        common::write_svg_footer(writer)?;
        Ok(())
    }
}

impl RenderSink for SvgSink {
    fn begin_pass(&mut self, features: usize) {
        self.styles.clear();
        self.styles.resize(features, None);
    }

    fn restyle(&mut self, feature: usize, class: &VisualClass, tooltip: &Tooltip) {
        if self.styles.len() <= feature {
            self.styles.resize(feature + 1, None);
        }
        self.styles[feature] = Some((*class, tooltip.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, MultiPolygon};
    use serde_json::{json, Map, Value};

    use crate::{
        classify::{classify, summarize},
        features::GeoFeature,
        types::FilterContext,
    };

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn two_squares() -> FeatureCollection {
        let a = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
        let b = polygon![(x: 1.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 1.0), (x: 1.0, y: 1.0)];
        FeatureCollection::new(vec![
            GeoFeature::new(MultiPolygon(vec![a]), props(json!({ "CD_MUN": "1", "NM_MUN": "A & B" }))),
            GeoFeature::new(MultiPolygon(vec![b]), props(json!({ "NM_MUN": "Sem código" }))),
        ])
    }

    #[test]
    fn one_path_per_styled_feature() {
        let features = two_squares();
        let ctx = FilterContext::default();
        let mut sink = SvgSink::new();

        sink.begin_pass(features.len());
        for (idx, f) in features.iter().enumerate() {
            let key = f.key();
            let class = classify(None, &ctx, false);
            let tooltip = summarize(f.name().as_deref(), key.as_ref(), None, &ctx);
            sink.restyle(idx, &class, &tooltip);
        }
        sink.end_pass();

        let svg = sink.to_svg_string_with_size(&features, 220, 10).unwrap();
        assert_eq!(sink.styled(), 2);
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.contains("fill:#1f2937"));
        assert!(svg.contains("<title>A &amp; B"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn unstyled_features_are_not_drawn() {
        let features = two_squares();
        let svg = SvgSink::new().to_svg_string(&features).unwrap();
        assert_eq!(svg.matches("<path ").count(), 0);
    }

    #[test]
    fn empty_collection_has_no_bounds() {
        assert!(SvgSink::new().to_svg_string(&FeatureCollection::default()).is_err());
    }
}
