use std::path::PathBuf;

use votomap::{Office, Round};

/// Territorial electoral results map (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "votomap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Draw the choropleth for a filter and selection as SVG
    Render(RenderArgs),

    /// Print the detail panel of a municipality (and optionally a zone)
    Inspect(InspectArgs),
}

/// Office and round, shared by every command.
#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    /// Office key: GOV, SEN, DF or DE
    #[arg(long, default_value = "GOV", value_parser = parse_office)]
    pub office: Office,

    /// Round: 1 or 2
    #[arg(long, default_value = "1", value_parser = parse_round)]
    pub round: Round,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Boundary collection (GeoJSON), defaults to $VOTOMAP_GEOJSON_PATH or public/data/municipios_al.geojson
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub geojson: Option<PathBuf>,

    /// Metrics dataset (JSON), defaults to $VOTOMAP_METRICS_PATH or public/data/metrics_2022.json
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub metrics: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Municipality code to select (dims every other feature)
    #[arg(long)]
    pub select: Option<String>,

    /// Zone to select within the selected municipality
    #[arg(long, requires = "select")]
    pub zone: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Municipality code
    pub code: String,

    /// Metrics dataset (JSON), defaults to $VOTOMAP_METRICS_PATH or public/data/metrics_2022.json
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub metrics: Option<PathBuf>,

    /// Zone to open
    #[arg(long)]
    pub zone: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

fn parse_office(value: &str) -> Result<Office, String> {
    Office::from_key(value).ok_or_else(|| format!("unknown office '{value}' (expected GOV, SEN, DF or DE)"))
}

fn parse_round(value: &str) -> Result<Round, String> {
    Round::from_key(value).ok_or_else(|| format!("unknown round '{value}' (expected 1 or 2)"))
}
