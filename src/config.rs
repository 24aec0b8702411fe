//! Configuration types.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::onboarding::flow::DEFAULT_JPEG_QUALITY;

/// Environment variable holding the database file path.
pub const ENV_DB_PATH: &str = "ASPAS_DB_PATH";
/// Environment variable holding the JPEG quality used for stored pictures.
pub const ENV_JPEG_QUALITY: &str = "ASPAS_JPEG_QUALITY";

/// Onboarding configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingConfig {
    /// Location of the on-device profile database.
    pub db_path: PathBuf,
    /// JPEG quality (1-100) applied before base64-encoding the picture.
    pub jpeg_quality: u8,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/aspas.db"),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl OnboardingConfig {
    /// Build a config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_JPEG_QUALITY) {
            config.jpeg_quality = parse_quality(&raw)?;
        }

        Ok(config)
    }
}

fn parse_quality(raw: &str) -> Result<u8, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: ENV_JPEG_QUALITY.to_string(),
        message,
    };
    let quality: u8 = raw
        .trim()
        .parse()
        .map_err(|e| invalid(format!("'{raw}' is not an integer: {e}")))?;
    if !(1..=100).contains(&quality) {
        return Err(invalid(format!("{quality} is outside 1-100")));
    }
    Ok(quality)
}
