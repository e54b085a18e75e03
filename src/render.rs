//! Rendering the deployment config into the artifact the client build compiles in.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::config::DeploymentConfig;

/// Render error.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize environment: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unknown output format: {0:?} (expected \"json\" or \"ts\")")]
    UnknownFormat(String),
}

/// Output format of the rendered environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    TypeScript,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::TypeScript => write!(f, "ts"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "ts" | "typescript" => Ok(OutputFormat::TypeScript),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// The record under the field names the client compiles against.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientEnvironment<'a> {
    pub production: bool,
    pub api_server_url: &'a str,
    pub auth0: ClientAuth<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAuth<'a> {
    /// Tenant domain prefix.
    pub url: &'a str,
    pub audience: &'a str,
    pub client_id: &'a str,
    #[serde(rename = "callbackURL")]
    pub callback_url: &'a str,
}

impl<'a> From<&'a DeploymentConfig> for ClientEnvironment<'a> {
    fn from(config: &'a DeploymentConfig) -> Self {
        let idp = &config.identity_provider;
        Self {
            production: config.production,
            api_server_url: &config.api_server_url,
            auth0: ClientAuth {
                url: &idp.domain,
                audience: &idp.audience,
                client_id: &idp.client_id,
                callback_url: &idp.callback_url,
            },
        }
    }
}

/// Render `config` in the requested format.
pub fn render(config: &DeploymentConfig, format: OutputFormat) -> Result<String, RenderError> {
    let json = serde_json::to_string_pretty(&ClientEnvironment::from(config))?;

    Ok(match format {
        OutputFormat::Json => json,
        OutputFormat::TypeScript => format!(
            "// Generated by coffee-shop-env for the {} variant at {}. Do not edit.\n\nexport const environment = {};\n",
            config.variant(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            json
        ),
    })
}
