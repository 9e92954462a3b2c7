//! Board geometry per game mode

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Supported board variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// 3×3, three in a row
    #[default]
    Classic,
    /// 9×9, five in a row
    Large,
}

impl GameMode {
    pub fn side(self) -> usize {
        match self {
            GameMode::Classic => 3,
            GameMode::Large => 9,
        }
    }

    pub fn cell_count(self) -> usize {
        self.side() * self.side()
    }

    pub fn winning_length(self) -> usize {
        match self {
            GameMode::Classic => 3,
            GameMode::Large => 5,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Classic => write!(f, "classic"),
            GameMode::Large => write!(f, "large"),
        }
    }
}

impl FromStr for GameMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "3x3" => Ok(GameMode::Classic),
            "large" | "9x9" => Ok(GameMode::Large),
            _ => Err(crate::Error::InvalidConfiguration {
                message: format!("unknown game mode '{s}' (expected classic or large)"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_geometry() {
        assert_eq!(GameMode::Classic.cell_count(), 9);
        assert_eq!(GameMode::Classic.winning_length(), 3);
        assert_eq!(GameMode::Large.cell_count(), 81);
        assert_eq!(GameMode::Large.winning_length(), 5);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Classic".parse::<GameMode>().unwrap(), GameMode::Classic);
        assert_eq!("9x9".parse::<GameMode>().unwrap(), GameMode::Large);
        assert!("huge".parse::<GameMode>().is_err());
    }
}
