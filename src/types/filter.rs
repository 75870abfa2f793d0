use serde::Serialize;

use super::{office::Office, round::Round};

/// Office and round the map and rankings are currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FilterContext {
    pub office: Office,
    pub round: Round,
}

impl FilterContext {
    pub fn new(office: Office, round: Round) -> Self {
        Self { office, round }
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self { office: Office::Governor, round: Round::First }
    }
}
