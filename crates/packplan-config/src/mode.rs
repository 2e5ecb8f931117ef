//! Build mode selection.

use serde::{Deserialize, Serialize};

/// Build mode the configuration is composed for.
///
/// Development builds carry live-reload bootstrap entries, skip
/// minification, and publish assets from the host's network address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    pub fn is_dev(&self) -> bool {
        matches!(self, Mode::Development)
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" | "debug" => Ok(Mode::Development),
            "prod" | "production" | "release" => Ok(Mode::Production),
            other => Err(format!("invalid mode: {}", other)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}
