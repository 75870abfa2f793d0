mod common;

use std::fs;

use votomap::{
    FeatureCollection, MetricsRepository, RepositoryStatus, SvgSink, SyncController,
};

#[test]
fn datasets_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let geojson = dir.path().join("municipios_al.geojson");
    let metrics = dir.path().join("metrics_2022.json");
    fs::write(&geojson, common::boundaries()).unwrap();
    fs::write(&metrics, common::metrics()).unwrap();

    let features = FeatureCollection::read_from_file(&geojson).unwrap();
    assert_eq!(features.len(), 3);

    let repo = MetricsRepository::read_from_file(&metrics);
    assert_eq!(repo.status(), RepositoryStatus::Loaded);
    assert_eq!(repo.meta().and_then(|m| m.year), Some(2022));
    let names: Vec<&str> = repo.municipalities().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Alfa", "Beta"]);
}

#[test]
fn missing_or_broken_metrics_are_unavailable() {
    let dir = tempfile::tempdir().unwrap();

    let missing = MetricsRepository::read_from_file(&dir.path().join("metrics_2022.json"));
    assert_eq!(missing.status(), RepositoryStatus::Unavailable);
    assert!(missing.unavailable_reason().is_some_and(|r| r.contains("metrics_2022.json")));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ \"municipios\": ").unwrap();
    let repo = MetricsRepository::read_from_file(&broken);
    assert_eq!(repo.status(), RepositoryStatus::Unavailable);
    assert!(repo.lookup("AL001").is_none());
    assert!(repo.municipalities().is_empty());
}

#[test]
fn missing_boundaries_fail_the_map_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut sc = SyncController::new(SvgSink::new());
    sc.on_geometry_result(FeatureCollection::read_from_file(&dir.path().join("none.geojson")));
    sc.set_repository(MetricsRepository::from_json_bytes(common::metrics().as_bytes()));

    assert!(sc.is_initialized());
    assert!(sc.features().is_none());
    assert!(sc.geometry_failure().is_some());
    // list selection keeps the panel working
    assert!(sc.select_municipality("AL001"));
    assert!(matches!(sc.detail(), votomap::DetailView::Municipality(_)));
}

#[test]
fn svg_choropleth_is_written_after_a_pass() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out").join("map.svg");

    let mut sc = SyncController::new(SvgSink::new());
    sc.on_geometry_loaded(FeatureCollection::from_geojson_str(&common::boundaries()).unwrap());
    sc.set_repository(MetricsRepository::from_json_bytes(common::metrics().as_bytes()));
    sc.select_municipality("2");

    let features = sc.features().unwrap();
    sc.sink().write_svg(features, &out).unwrap();

    let svg = fs::read_to_string(&out).unwrap();
    assert_eq!(svg.matches("<path ").count(), 3);
    assert!(svg.contains("fill:#ef4444;fill-opacity:0.25"));
    assert!(svg.contains("fill:#0ea5e9;fill-opacity:0.65"));
    assert!(svg.contains("<title>Lagoa"));
}
