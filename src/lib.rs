//! Deployment configuration for the coffee shop client.
//!
//! Load the record once at startup and hand out `&DeploymentConfig` (or an
//! `Arc`) to whatever needs it.

pub mod config;
pub mod render;

pub use config::{ConfigError, DeploymentConfig, IdentityProviderConfig, Variant};
pub use render::{OutputFormat, RenderError, render};
