//! Committed development values.
//!
//! Replace these per deployment; production values come from a variant file
//! or the environment.

pub const API_SERVER_URL: &str = "http://localhost:5000";
pub const AUTH_DOMAIN: &str = "dev-lhinybi6.us";
pub const AUTH_AUDIENCE: &str = "drinks";
pub const AUTH_CLIENT_ID: &str = "8jJXIJIDUSOmEiOfCcDsnrXsesPZvX14";
pub const AUTH_CALLBACK_URL: &str = "https://127.0.0.1:8100";

/// Directory searched for `{variant}.yaml` when no explicit file is given.
pub const CONFIG_DIR: &str = "configs";
