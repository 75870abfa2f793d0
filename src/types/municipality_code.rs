use std::{borrow::Borrow, fmt, sync::Arc};

use serde::{Serialize, Serializer};

/// Canonical municipality join key (state + municipality numeric code).
/// Keeps the original text (with leading zeros) but avoids repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MunicipalityCode(Arc<str>);

impl MunicipalityCode {
    /// Build a code from raw text. Blank input has no code.
    pub fn new(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() { return None }
        Some(Self(Arc::from(code)))
    }

    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Borrow<str> for MunicipalityCode {
    fn borrow(&self) -> &str { &self.0 }
}

impl fmt::Display for MunicipalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MunicipalityCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::MunicipalityCode;

    #[test]
    fn trims_and_rejects_blank() {
        assert_eq!(MunicipalityCode::new(" 2704302 ").unwrap().as_str(), "2704302");
        assert!(MunicipalityCode::new("").is_none());
        assert!(MunicipalityCode::new("   ").is_none());
    }

    #[test]
    fn keeps_leading_zeros() {
        assert_eq!(MunicipalityCode::new("0027855").unwrap().to_string(), "0027855");
    }
}
