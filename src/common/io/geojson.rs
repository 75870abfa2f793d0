use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Map, Value};

/// Geometry and raw properties of one GeoJSON feature.
pub(crate) type RawFeature = (MultiPolygon<f64>, Map<String, Value>);

/// Read features from GeoJSON FeatureCollection bytes.
/// `Polygon` and `MultiPolygon` geometries are decoded; any other (or null)
/// geometry yields an empty shape so the feature keeps its place in the collection.
pub(crate) fn read_features_from_geojson_bytes(bytes: &[u8]) -> Result<Vec<RawFeature>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;

    if value["type"].as_str() != Some("FeatureCollection") {
        bail!("[geojson] expected a FeatureCollection, found {:?}", value["type"]);
    }
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[geojson] FeatureCollection has no features array"))?;

    features.iter().enumerate()
        .map(|(idx, feature)| {
            let geometry = match feature.get("geometry") {
                Some(geometry) => parse_geometry(geometry)
                    .with_context(|| format!("[geojson] invalid geometry for feature {idx}"))?,
                None => MultiPolygon(Vec::new()),
            };
            let properties = feature.get("properties")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            Ok((geometry, properties))
        })
        .collect()
}

/// Decode a GeoJSON geometry object into a MultiPolygon.
fn parse_geometry(geometry: &Value) -> Result<MultiPolygon<f64>> {
    let coords = geometry["coordinates"].as_array();
    match (geometry["type"].as_str(), coords) {
        (Some("Polygon"), Some(rings)) => Ok(MultiPolygon(vec![parse_polygon_coords(rings)?])),
        (Some("MultiPolygon"), Some(polygons)) => {
            let polygons = polygons.iter()
                .filter_map(Value::as_array)
                .filter(|rings| !rings.is_empty())
                .map(|rings| parse_polygon_coords(rings))
                .collect::<Result<Vec<_>>>()?;
            Ok(MultiPolygon(polygons))
        }
        _ => Ok(MultiPolygon(Vec::new())),
    }
}

/// Parse polygon rings: the first ring is the exterior, the rest are holes.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let exterior = rings.first()
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("Invalid Polygon: missing exterior ring"))?;

    let interiors = rings[1..].iter()
        .filter_map(Value::as_array)
        .map(|ring| parse_ring_coords(ring))
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(parse_ring_coords(exterior)?, interiors))
}

/// Parse a ring (exterior or interior) from GeoJSON coordinates.
/// Format: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for coord_pair in coords {
        if let Some(coord_array) = coord_pair.as_array() {
            if coord_array.len() >= 2 {
                let x = coord_array[0].as_f64()
                    .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
                let y = coord_array[1].as_f64()
                    .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
                points.push(Coord { x, y });
            }
        }
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<Vec<RawFeature>> {
        read_features_from_geojson_bytes(&serde_json::to_vec(&value).unwrap())
    }

    #[test]
    fn reads_polygon_and_multipolygon() {
        let features = parse(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "CD_MUN": "1" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]] } },
                { "type": "Feature", "properties": { "CD_MUN": "2" },
                  "geometry": { "type": "MultiPolygon", "coordinates": [
                      [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                      [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]]
                  ] } }
            ]
        })).unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].0.0.len(), 1);
        // open ring gets closed
        assert_eq!(features[0].0.0[0].exterior().0.len(), 4);
        assert_eq!(features[1].0.0.len(), 2);
        assert_eq!(features[1].1["CD_MUN"], json!("2"));
    }

    #[test]
    fn null_or_point_geometry_is_empty() {
        let features = parse(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": null, "geometry": null },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Point", "coordinates": [1.0, 2.0] } }
            ]
        })).unwrap();

        assert_eq!(features.len(), 2);
        assert!(features.iter().all(|(mp, _)| mp.0.is_empty()));
        assert!(features[0].1.is_empty());
    }

    #[test]
    fn rejects_non_collections() {
        assert!(parse(json!({ "type": "Feature" })).is_err());
        assert!(read_features_from_geojson_bytes(b"not json").is_err());
    }

    #[test]
    fn rejects_bad_coordinates() {
        let result = parse(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Polygon", "coordinates": [[["a", 0.0], [1.0, 0.0]]] } }
            ]
        }));
        assert!(result.is_err());
    }
}
