use std::{cmp::Ordering, fmt, sync::Arc};

use serde::{Serialize, Serializer};

/// Electoral zone identifier, unique within a municipality.
///
/// Zones are ordered numerically ("2" < "10"). Codes that do not parse as
/// numbers sort after all numeric codes, lexicographically among themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneCode(Arc<str>);

impl ZoneCode {
    pub fn new(zone: &str) -> Option<Self> {
        let zone = zone.trim();
        if zone.is_empty() { return None }
        Some(Self(Arc::from(zone)))
    }

    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Numeric value of the code, if it has one.
    pub fn number(&self) -> Option<u64> { self.0.parse().ok() }
}

impl Ord for ZoneCode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number(), other.number()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ZoneCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ZoneCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
