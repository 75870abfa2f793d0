use serde::{Serialize, Serializer};

/// Voting round of a two-round election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Round {
    First,
    Second,
}

impl Round {
    pub const ALL: [Round; 2] = [Round::First, Round::Second];

    pub fn number(&self) -> u8 {
        match self {
            Round::First => 1,
            Round::Second => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Round> {
        match n {
            1 => Some(Round::First),
            2 => Some(Round::Second),
            _ => None,
        }
    }

    /// Key used by the metrics dataset ("1" or "2").
    pub fn key(&self) -> &'static str {
        match self {
            Round::First => "1",
            Round::Second => "2",
        }
    }

    pub fn from_key(key: &str) -> Option<Round> {
        key.trim().parse().ok().and_then(Round::from_number)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Round::First => "1º turno",
            Round::Second => "2º turno",
        }
    }
}

impl Serialize for Round {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}
