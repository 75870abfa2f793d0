use geo::{Coord, CoordsIter, LineString, MultiPolygon, Rect};

/// Projection function: lon/lat -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Fit `bounds` into a canvas `width` wide with `margin` on every side,
/// preserving aspect ratio with Y pointing down. Returns the projection and canvas height.
pub(crate) fn fit_projection(bounds: Rect<f64>, width: f64, margin: f64) -> (Box<Projection>, f64) {
    // A degenerate (zero-width) extent still gets a finite scale.
    let lon_span = if bounds.width() > 0.0 { bounds.width() } else { 1.0 };
    let scale = (width - 2.0 * margin) / lon_span;
    let height = bounds.height() * scale + 2.0 * margin;

    let project = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = margin + (coord.x - bounds.min().x) * scale;
        let y = margin + (bounds.max().y - coord.y) * scale; // invert vertically
        (x, y)
    };
    (Box::new(project), height)
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString (ring).
fn ring_to_path(ring: &LineString<f64>, project: &Projection) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}
