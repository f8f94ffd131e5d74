//! # Secret Resolver
//!
//! Resolves environment-variable indirections in secret-bearing config
//! fields.
//!
//! A field value beginning with `$` names an environment variable whose
//! value is substituted at load time; anything else passes through as a
//! literal. Resolution is applied only to the fields documented as
//! indirectable (cluster secrets and deployment ids, OIDC client secrets,
//! federation activation secrets, the auth-config client secret) so literal
//! secrets containing `$` elsewhere stay unambiguous.

use crate::constants::ENV_REF_SENTINEL;
use crate::error::SyncError;

/// Resolve a possibly-indirect config value.
///
/// `"$FOO"` resolves to the value of the `FOO` environment variable and
/// fails the run when `FOO` is unset; any other value is returned unchanged.
pub fn resolve_env_ref(value: &str) -> Result<String, SyncError> {
    match value.strip_prefix(ENV_REF_SENTINEL) {
        Some(name) => {
            std::env::var(name).map_err(|_| SyncError::UnresolvedSecret(name.to_string()))
        }
        None => Ok(value.to_string()),
    }
}

/// Resolve an optional field in place, leaving `None` untouched.
pub fn resolve_optional_env_ref(value: Option<String>) -> Result<Option<String>, SyncError> {
    value.map(|v| resolve_env_ref(&v)).transpose()
}
