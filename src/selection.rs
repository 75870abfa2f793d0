//! Drill-down cursor: nothing -> municipality -> zone.
//!
//! `Unselected` is only ever the initial state. There is no transition back
//! to it; clicking outside every feature leaves the selection untouched.

use serde::Serialize;

use crate::types::{MunicipalityCode, ZoneCode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionState {
    #[default]
    Unselected,
    MunicipalitySelected { code: MunicipalityCode },
    ZoneSelected { code: MunicipalityCode, zone: ZoneCode },
}

impl SelectionState {
    /// A feature was clicked: select its municipality, discarding any zone.
    /// Re-clicking the selected municipality only clears the zone.
    pub fn click(&self, code: MunicipalityCode) -> SelectionState {
        SelectionState::MunicipalitySelected { code }
    }

    /// A zone row was clicked. Without a selected municipality nothing changes.
    pub fn select_zone(&self, zone: ZoneCode) -> SelectionState {
        match self {
            SelectionState::Unselected => SelectionState::Unselected,
            SelectionState::MunicipalitySelected { code } | SelectionState::ZoneSelected { code, .. } => {
                SelectionState::ZoneSelected { code: code.clone(), zone }
            }
        }
    }

    pub fn municipality(&self) -> Option<&MunicipalityCode> {
        match self {
            SelectionState::Unselected => None,
            SelectionState::MunicipalitySelected { code } | SelectionState::ZoneSelected { code, .. } => Some(code),
        }
    }

    pub fn zone(&self) -> Option<&ZoneCode> {
        match self {
            SelectionState::ZoneSelected { zone, .. } => Some(zone),
            _ => None,
        }
    }

    /// Whether a feature with this join key renders dimmed: some other
    /// municipality is selected. Unjoinable features dim whenever anything is.
    pub fn dims(&self, feature: Option<&MunicipalityCode>) -> bool {
        match self.municipality() {
            Some(selected) => feature != Some(selected),
            None => false,
        }
    }
}
