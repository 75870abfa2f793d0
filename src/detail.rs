//! Detail panel: what the side panel shows for the current state.

use std::fmt;

use serde::Serialize;

use crate::{
    classify::{fmt_pct, ABSENT},
    features::key::FALLBACK_NAME,
    metrics::{CandidateResult, MetricsRepository, RepositoryStatus},
    ranking::{top_candidates, TOP_N},
    selection::SelectionState,
    types::{FilterContext, MunicipalityCode, Office, Round, ZoneCode},
};

pub const MISSING_DATA_MESSAGE: &str = "Não encontrei os dados de métricas (metrics_2022.json).";
pub const MISSING_DATA_HINT: &str =
    "Coloque os ZIPs em raw_data/ e rode o passo de build dos dados (workflow \"Build data\") antes de abrir o painel.";
pub const SELECT_PROMPT: &str = "Clique em um município no mapa para abrir as zonas e os indicadores.";
pub const EMPTY_RANKING: &str = "Sem dados ainda (rode o workflow de build).";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DetailView {
    /// Metrics have not resolved yet.
    Loading,
    /// Metrics failed to load; the panel shows guidance instead.
    Unavailable { message: String, hint: String, reason: Option<String> },
    /// Nothing selected yet.
    Prompt { message: String },
    Municipality(MunicipalityDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityDetail {
    pub code: MunicipalityCode,
    pub name: String,
    pub abstention: Option<f64>,
    pub section_count: Option<u32>,
    pub zone_count: usize,
    /// Zone rows in numeric order.
    pub zones: Vec<ZoneRow>,
    pub zone: Option<ZoneDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRow {
    pub zone: ZoneCode,
    pub section_count: Option<u32>,
    pub abstention: Option<f64>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDetail {
    pub zone: ZoneCode,
    pub municipality_name: String,
    pub abstention: Option<f64>,
    pub blank: Option<f64>,
    pub null: Option<f64>,
    pub office: Office,
    pub office_label: &'static str,
    pub round: Round,
    pub round_label: &'static str,
    /// At most `TOP_N` rows; empty means "no data yet", not an error.
    pub top: Vec<CandidateResult>,
}

/// Resolve the panel from the repository, filter and selection. Pure.
pub fn resolve(repo: &MetricsRepository, ctx: &FilterContext, selection: &SelectionState) -> DetailView {
    match repo.status() {
        RepositoryStatus::Pending => return DetailView::Loading,
        RepositoryStatus::Unavailable => {
            return DetailView::Unavailable {
                message: MISSING_DATA_MESSAGE.to_string(),
                hint: MISSING_DATA_HINT.to_string(),
                reason: repo.unavailable_reason().map(str::to_string),
            }
        }
        RepositoryStatus::Loaded => {}
    }

    let Some(code) = selection.municipality() else {
        return DetailView::Prompt { message: SELECT_PROMPT.to_string() };
    };

    let record = repo.lookup(code.as_str());
    let name = record.map(|m| m.name.clone()).unwrap_or_else(|| FALLBACK_NAME.to_string());
    let selected_zone = selection.zone();

    let zones = repo.zones(code.as_str()).into_iter()
        .filter_map(|z| {
            let zone = z.zone.clone()?;
            Some(ZoneRow {
                selected: selected_zone == Some(&zone),
                zone,
                section_count: z.section_count,
                abstention: z.abstention_rate,
            })
        })
        .collect::<Vec<_>>();

    let zone = selected_zone.and_then(|zone| {
        let metrics = repo.lookup_zone(code.as_str(), zone.as_str())?;
        Some(ZoneDetail {
            zone: zone.clone(),
            municipality_name: name.clone(),
            abstention: metrics.abstention_rate,
            blank: metrics.blank_vote_rate,
            null: metrics.null_vote_rate,
            office: ctx.office,
            office_label: ctx.office.label(),
            round: ctx.round,
            round_label: ctx.round.label(),
            top: top_candidates(Some(metrics), ctx, TOP_N).to_vec(),
        })
    });

    DetailView::Municipality(MunicipalityDetail {
        code: code.clone(),
        name,
        abstention: record.and_then(|m| m.abstention_rate),
        section_count: record.and_then(|m| m.section_count),
        zone_count: record.map_or(0, |m| m.zones.len()),
        zones,
        zone,
    })
}

fn fmt_count(value: Option<u32>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

/// Plain-text rendering of the panel, for terminals and logs.
impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailView::Loading => write!(f, "Carregando…"),
            DetailView::Unavailable { message, hint, .. } => write!(f, "{message}\n{hint}"),
            DetailView::Prompt { message } => write!(f, "{message}"),
            DetailView::Municipality(m) => {
                writeln!(f, "{} (Código IBGE: {})", m.name, m.code)?;
                writeln!(f, "Abstenção: {}  Seções (com dados): {}  Zonas: {}",
                    fmt_pct(m.abstention), fmt_count(m.section_count), m.zone_count)?;
                writeln!(f)?;
                writeln!(f, "{:<8} {:>8} {:>10}", "Zona", "Seções", "Abstenção")?;
                for row in &m.zones {
                    let marker = if row.selected { '>' } else { ' ' };
                    writeln!(f, "{marker}#{:<6} {:>8} {:>10}",
                        row.zone, fmt_count(row.section_count), fmt_pct(row.abstention))?;
                }

                if let Some(z) = &m.zone {
                    writeln!(f)?;
                    writeln!(f, "Zona #{} • Município: {}", z.zone, z.municipality_name)?;
                    writeln!(f, "Abstenção: {}  Brancos: {}  Nulos: {}",
                        fmt_pct(z.abstention), fmt_pct(z.blank), fmt_pct(z.null))?;
                    writeln!(f, "Top {TOP_N} (zona) • {} • {}", z.office_label, z.round_label)?;
                    if z.top.is_empty() {
                        writeln!(f, "  {EMPTY_RANKING}")?;
                    }
                    for c in &z.top {
                        let name = if c.name.is_empty() { ABSENT } else { c.name.as_str() };
                        writeln!(f, "  {:<32} {:<10} {:>7}",
                            name, c.party.as_deref().unwrap_or(ABSENT), fmt_pct(c.percentage))?;
                    }
                }
                Ok(())
            }
        }
    }
}
