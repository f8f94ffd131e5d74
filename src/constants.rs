//! # Constants
//!
//! Shared constants used throughout the bootstrap job.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Default mount path for the configuration bundle
pub const DEFAULT_CONFIG_ROOT: &str = "/bootstrapConfig";

/// Default address of the control plane's admin API
pub const DEFAULT_CONTROLPLANE_ADDRESS: &str = "http://controlplane:1650";

/// Environment variable overriding the configuration bundle mount path
pub const CONFIG_ROOT_ENV: &str = "BOOTSTRAP_CONFIG_ROOT";

/// Environment variable overriding the control-plane address
pub const CONTROLPLANE_ADDRESS_ENV: &str = "CONTROLPLANE_ADDRESS";

/// Cluster id registered for the embedded federation-server topology
pub const EMBEDDED_FEDERATION_ID: &str = "localhost";

/// Address the control plane reaches itself at when it doubles as the
/// federation server
pub const EMBEDDED_FEDERATION_ADDRESS: &str = "http://localhost:1650";

/// Namespace of built-in principals that role-binding reconciliation must
/// never remove or modify
pub const SYSTEM_PRINCIPAL_PREFIX: &str = "system:";

/// Principal the root token authenticates as once auth is active
pub const ROOT_PRINCIPAL: &str = "system:root";

/// Sentinel prefix marking a config field as an environment-variable
/// indirection rather than a literal value
pub const ENV_REF_SENTINEL: char = '$';
