use serde::Serialize;

/// Elected position a winner or ranking applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Office {
    #[serde(rename = "GOV")]
    Governor,
    #[serde(rename = "SEN")]
    Senator,
    #[serde(rename = "DF")]
    FederalDeputy,
    #[serde(rename = "DE")]
    StateDeputy,
}

impl Office {
    pub const ALL: [Office; 4] = [
        Office::Governor,
        Office::Senator,
        Office::FederalDeputy,
        Office::StateDeputy,
    ];

    /// Key used by the metrics dataset.
    pub fn key(&self) -> &'static str {
        match self {
            Office::Governor => "GOV",
            Office::Senator => "SEN",
            Office::FederalDeputy => "DF",
            Office::StateDeputy => "DE",
        }
    }

    /// Parse a dataset key, case-insensitively.
    pub fn from_key(key: &str) -> Option<Office> {
        Office::ALL.into_iter().find(|office| office.key().eq_ignore_ascii_case(key.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Office::Governor => "Governador",
            Office::Senator => "Senador",
            Office::FederalDeputy => "Dep. Federal",
            Office::StateDeputy => "Dep. Estadual",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Office;

    #[test]
    fn keys_roundtrip() {
        for office in Office::ALL {
            assert_eq!(Office::from_key(office.key()), Some(office));
        }
        assert_eq!(Office::from_key("sen"), Some(Office::Senator));
        assert_eq!(Office::from_key("PRES"), None);
    }
}
