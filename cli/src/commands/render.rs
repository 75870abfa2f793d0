use anyhow::{anyhow, Result};
use votomap::{DataSources, FeatureCollection, FilterContext, MetricsRepository, SvgSink, SyncController};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let sources = DataSources::from_env()
        .with_overrides(args.metrics.clone(), args.geojson.clone());
    let ctx = FilterContext::new(args.filter.office, args.filter.round);

    let mut controller = SyncController::with_filter(SvgSink::new(), ctx);

    println!("[render] loading boundaries from {}", sources.geojson.display());
    controller.on_geometry_result(FeatureCollection::read_from_file(&sources.geojson));

    println!("[render] loading metrics from {}", sources.metrics.display());
    controller.set_repository(MetricsRepository::read_from_file(&sources.metrics));
    if let Some(reason) = controller.repository().unavailable_reason() {
        eprintln!("[render] metrics unavailable, drawing without data: {reason}");
    }

    if let Some(code) = &args.select {
        if !controller.select_municipality(code) {
            eprintln!("[render] could not select municipality {code}");
        }
    }
    if let Some(zone) = &args.zone {
        if !controller.select_zone(zone) {
            eprintln!("[render] could not select zone {zone}");
        }
    }

    let features = controller.features()
        .ok_or_else(|| anyhow!("[render] boundaries unavailable: {}", controller.geometry_failure().unwrap_or("not loaded")))?;

    println!("[render] writing {} features for {} {} to {}",
        features.len(), ctx.office.label(), ctx.round.label(), args.output.display());
    controller.sink().write_svg_with_size(features, &args.output, args.width, 10)?;

    Ok(())
}
