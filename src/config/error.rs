//! Configuration error types.

use thiserror::Error;

use super::Variant;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("missing required setting: {0} is not set")]
    Missing(String),
    #[error("unknown deployment variant: {0:?} (expected \"development\" or \"production\")")]
    UnknownVariant(String),
    #[error("variant mismatch: requested {expected} but config file is {found}")]
    VariantMismatch { expected: Variant, found: Variant },
}
