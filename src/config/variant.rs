//! Deployment variant selection.

use std::{env, fmt, str::FromStr};

use super::ConfigError;

/// Environment variable that selects the variant at startup.
pub const VARIANT_ENV: &str = "DEPLOY_ENV";

/// A named configuration profile selected at build or startup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Development,
    Production,
}

impl Variant {
    /// Variant for a record's production flag.
    pub fn from_production(production: bool) -> Self {
        if production {
            Variant::Production
        } else {
            Variant::Development
        }
    }

    /// Read the variant from `DEPLOY_ENV`. Unset or empty means development.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(VARIANT_ENV) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Variant::Development),
        }
    }

    /// File stem used for this variant's config file.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Development => "development",
            Variant::Production => "production",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Variant::Development),
            "production" | "prod" => Ok(Variant::Production),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}
