use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sport a match belongs to, stored as its SMALLINT ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[repr(i16)]
pub enum Sport {
    Football = 0,
    Basketball = 1,
}

impl Sport {
    /// Parse a sport from its enumerated name, e.g. `"Football"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Football" => Some(Self::Football),
            "Basketball" => Some(Self::Basketball),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Football => "Football",
            Self::Basketball => "Basketball",
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!(Sport::from_name("Football"), Some(Sport::Football));
        assert_eq!(Sport::from_name("Basketball"), Some(Sport::Basketball));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(Sport::from_name("football"), None);
        assert_eq!(Sport::from_name("Cricket"), None);
        assert_eq!(Sport::from_name(""), None);
    }
}
