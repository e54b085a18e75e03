//! Identity provider configuration.

use serde::{Deserialize, Serialize};

/// Settings the client needs to start a login redirect with the identity provider.
///
/// All four values must match what is registered with the provider, otherwise
/// login fails at runtime. Nothing here is secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    /// Tenant domain prefix of the auth service (e.g., "dev-lhinybi6.us").
    pub domain: String,
    /// Identifier of the protected API that issued tokens are valid for.
    pub audience: String,
    /// Public client identifier issued by the provider for this app registration.
    pub client_id: String,
    /// Where the provider redirects after login. Must be an allowed callback.
    pub callback_url: String,
}
