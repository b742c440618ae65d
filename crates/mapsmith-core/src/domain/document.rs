//! Document kinds and file format detection.

use serde::{Deserialize, Serialize};

/// The source document kinds the generator can produce. Each kind selects
/// one template set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Map,
    MockMap,
    PreparedMap,
    PreparedTest,
}

impl DocumentKind {
    /// Every kind, in the order generation commands process them.
    pub const ALL: [DocumentKind; 4] = [
        Self::Map,
        Self::MockMap,
        Self::PreparedMap,
        Self::PreparedTest,
    ];

    /// File extension of the produced document.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Map | Self::MockMap | Self::PreparedMap => "suma",
            Self::PreparedTest => "test.ts",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Map => write!(f, "map"),
            Self::MockMap => write!(f, "mock-map"),
            Self::PreparedMap => write!(f, "prepared-map"),
            Self::PreparedTest => write!(f, "prepared-test"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(Self::Map),
            "mock-map" => Ok(Self::MockMap),
            "prepared-map" => Ok(Self::PreparedMap),
            "prepared-test" => Ok(Self::PreparedTest),
            other => Err(format!(
                "unknown document kind '{other}' (expected map, mock-map, prepared-map or prepared-test)"
            )),
        }
    }
}

/// Classification of an existing file by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Map,
    Profile,
    Unknown,
}

impl DocumentFormat {
    /// Classify a file name by extension, case-insensitive:
    /// `.suma` is a map, `.supr` a profile, anything else unknown.
    pub fn detect(file_name: &str) -> Self {
        let Some((stem, extension)) = file_name.rsplit_once('.') else {
            return Self::Unknown;
        };
        if stem.is_empty() {
            return Self::Unknown;
        }
        match extension.to_ascii_lowercase().as_str() {
            "suma" => Self::Map,
            "supr" => Self::Profile,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Map => write!(f, "map"),
            Self::Profile => write!(f, "profile"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_map_case_insensitively() {
        assert_eq!(DocumentFormat::detect("api.SUMA"), DocumentFormat::Map);
        assert_eq!(DocumentFormat::detect("api.suma"), DocumentFormat::Map);
    }

    #[test]
    fn detects_profile() {
        assert_eq!(DocumentFormat::detect("api.supr"), DocumentFormat::Profile);
    }

    #[test]
    fn kind_round_trips_through_display_and_from_str() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.to_string().parse::<DocumentKind>(), Ok(kind));
        }
        assert!("mock".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(DocumentFormat::detect("api.s"), DocumentFormat::Unknown);
        assert_eq!(DocumentFormat::detect("api"), DocumentFormat::Unknown);
        assert_eq!(DocumentFormat::detect(".suma"), DocumentFormat::Unknown);
    }
}
