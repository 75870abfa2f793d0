use anyhow::{bail, Result};
use votomap::{
    DataSources, DetailView, FilterContext, MetricsRepository, MunicipalityCode, SelectionState, ZoneCode,
    resolve_detail,
};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::InspectArgs) -> Result<()> {
    let sources = DataSources::from_env().with_overrides(args.metrics.clone(), None);
    let ctx = FilterContext::new(args.filter.office, args.filter.round);

    let repo = MetricsRepository::read_from_file(&sources.metrics);

    let Some(code) = MunicipalityCode::new(&args.code) else {
        bail!("[inspect] municipality code must not be blank");
    };
    let mut selection = SelectionState::Unselected.click(code);
    if let Some(zone) = args.zone.as_deref().and_then(ZoneCode::new) {
        selection = selection.select_zone(zone);
    }

    let view = resolve_detail(&repo, &ctx, &selection);
    println!("{view}");

    if let DetailView::Unavailable { .. } = view {
        bail!("[inspect] metrics unavailable at {}", sources.metrics.display());
    }
    Ok(())
}
