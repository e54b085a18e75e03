//! Deployment configuration for the coffee shop client.
//!
//! One typed record shared by every deployment variant. Values come from a
//! per-variant YAML file (or the committed development defaults), can be
//! overridden from environment variables, and are validated once at startup.

mod defaults;
mod error;
mod identity;
mod variant;

pub use defaults::CONFIG_DIR;
pub use error::ConfigError;
pub use identity::IdentityProviderConfig;
pub use variant::{VARIANT_ENV, Variant};

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path};
use tracing::{debug, info, warn};
use url::{Host, Url};

pub const API_SERVER_URL_ENV: &str = "API_SERVER_URL";
pub const AUTH_DOMAIN_ENV: &str = "AUTH_DOMAIN";
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";
pub const AUTH_CLIENT_ID_ENV: &str = "AUTH_CLIENT_ID";
pub const AUTH_CALLBACK_URL_ENV: &str = "AUTH_CALLBACK_URL";

/// Deployment-specific settings consumed by the client build.
///
/// Built once during startup and shared read-only afterwards. Every field is
/// always present; there is no partial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Distinguishes the production build from development.
    pub production: bool,
    /// Base address of the backend API (e.g., "http://localhost:5000").
    pub api_server_url: String,
    /// Identity provider the client logs in through.
    pub identity_provider: IdentityProviderConfig,
}

impl DeploymentConfig {
    /// The committed development record. No I/O, no validation.
    pub fn development() -> Self {
        Self {
            production: false,
            api_server_url: defaults::API_SERVER_URL.to_string(),
            identity_provider: IdentityProviderConfig {
                domain: defaults::AUTH_DOMAIN.to_string(),
                audience: defaults::AUTH_AUDIENCE.to_string(),
                client_id: defaults::AUTH_CLIENT_ID.to_string(),
                callback_url: defaults::AUTH_CALLBACK_URL.to_string(),
            },
        }
    }

    pub fn variant(&self) -> Variant {
        Variant::from_production(self.production)
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// Parses the file, applies overrides from the process environment and
    /// validates. `.env` files are loaded by the binary, not here:
    /// - `API_SERVER_URL`
    /// - `AUTH_DOMAIN`, `AUTH_AUDIENCE`, `AUTH_CLIENT_ID`, `AUTH_CALLBACK_URL`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::read_file(path.as_ref())?;
        config.load_overrides_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Parse a config from a YAML string without overrides or validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolve the configuration for `variant`.
    ///
    /// Uses `{config_dir}/{variant}.yaml` when present. Without a file,
    /// development starts from [`DeploymentConfig::development`] and
    /// production must be supplied entirely through environment variables.
    pub fn resolve(variant: Variant, config_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = config_dir.as_ref().join(format!("{}.yaml", variant));
        let mut config = if path.is_file() {
            let config = Self::read_file(&path)?;
            if config.variant() != variant {
                return Err(ConfigError::VariantMismatch {
                    expected: variant,
                    found: config.variant(),
                });
            }
            info!(variant = %variant, path = %path.display(), "Loaded config file");
            config
        } else {
            match variant {
                Variant::Development => {
                    info!(path = %path.display(), "No config file, using committed development values");
                    Self::development()
                }
                Variant::Production => {
                    info!(path = %path.display(), "No config file, reading production values from environment");
                    Self::production_from_env()?
                }
            }
        };

        config.load_overrides_from_env();
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn production_from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            production: true,
            api_server_url: require_env(API_SERVER_URL_ENV)?,
            identity_provider: IdentityProviderConfig {
                domain: require_env(AUTH_DOMAIN_ENV)?,
                audience: require_env(AUTH_AUDIENCE_ENV)?,
                client_id: require_env(AUTH_CLIENT_ID_ENV)?,
                callback_url: require_env(AUTH_CALLBACK_URL_ENV)?,
            },
        })
    }

    /// Replace values with environment variables where set. The production
    /// flag is never taken from the environment.
    fn load_overrides_from_env(&mut self) {
        let idp = &mut self.identity_provider;
        let targets: [(&str, &mut String); 5] = [
            (API_SERVER_URL_ENV, &mut self.api_server_url),
            (AUTH_DOMAIN_ENV, &mut idp.domain),
            (AUTH_AUDIENCE_ENV, &mut idp.audience),
            (AUTH_CLIENT_ID_ENV, &mut idp.client_id),
            (AUTH_CALLBACK_URL_ENV, &mut idp.callback_url),
        ];

        for (var, field) in targets {
            if let Some(value) = env_value(var) {
                debug!(var, "Config value overridden from environment");
                *field = value;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let idp = &self.identity_provider;

        for (name, value) in [
            ("api_server_url", &self.api_server_url),
            ("identity_provider.domain", &idp.domain),
            ("identity_provider.audience", &idp.audience),
            ("identity_provider.client_id", &idp.client_id),
            ("identity_provider.callback_url", &idp.callback_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{} is required", name)));
            }
        }

        check_url("api_server_url", &self.api_server_url, self.production)?;
        check_url(
            "identity_provider.callback_url",
            &idp.callback_url,
            self.production,
        )?;

        if idp.domain.contains("://")
            || idp.domain.contains('/')
            || idp.domain.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::Validation(format!(
                "identity_provider.domain must be a bare domain, got {:?}",
                idp.domain
            )));
        }

        if idp.client_id.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "identity_provider.client_id must not contain whitespace".into(),
            ));
        }

        if self.production && idp.client_id == defaults::AUTH_CLIENT_ID {
            warn!(
                client_id = %idp.client_id,
                "Production config uses the committed development client id"
            );
        }

        Ok(())
    }
}

/// Non-empty, trimmed value of an environment variable.
fn env_value(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_env(var: &str) -> Result<String, ConfigError> {
    env_value(var).ok_or_else(|| ConfigError::Missing(var.to_string()))
}

/// Check that `value` is an absolute http(s) URL with a host. Production
/// builds must not point at loopback addresses.
fn check_url(name: &str, value: &str, production: bool) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::Validation(format!("{} is not a valid absolute URL ({}): {:?}", name, e, value))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{} must use http or https, got {:?}",
            name,
            url.scheme()
        )));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::Validation(format!("{} must include a host", name)));
    }

    if production && is_loopback(&url) {
        return Err(ConfigError::Validation(format!(
            "{} points at a loopback host in production: {}",
            name, value
        )));
    }

    Ok(())
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => ip.is_loopback() || ip.is_unspecified(),
        Some(Host::Ipv6(ip)) => {
            ip.is_loopback()
                || ip.is_unspecified()
                || ip
                    .to_ipv4_mapped()
                    .is_some_and(|v4| v4.is_loopback() || v4.is_unspecified())
        }
        None => false,
    }
}
