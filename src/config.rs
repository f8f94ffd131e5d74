//! # Config Loader
//!
//! Resolves named configuration keys to file contents under the mounted
//! bundle directory.
//!
//! Absence of an entry is a normal condition: every key maps to an optional
//! step, so a missing file surfaces as [`SyncError::Skipped`] and the
//! pipeline moves on. Any other I/O or decode failure is fatal to the run.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::SyncError;

/// Names of the entries the bundle may carry.
///
/// Each entry is either a raw scalar (tokens, license key, shared secrets)
/// or a YAML document (lists and singleton config objects).
pub mod keys {
    pub const ROOT_TOKEN: &str = "rootToken";
    pub const LICENSE_KEY: &str = "licenseKey";
    pub const ENTERPRISE_SECRET: &str = "enterpriseSecret";
    pub const ENTERPRISE_SERVER_ADDRESS: &str = "enterpriseServerAddress";
    pub const ENTERPRISE_ROOT_TOKEN: &str = "enterpriseRootToken";
    pub const ENTERPRISE_CLUSTERS: &str = "enterpriseClusters";
    pub const ENTERPRISE_CONFIG: &str = "enterpriseConfig";
    pub const IDENTITY_SERVICE_CONFIG: &str = "identityServiceConfig";
    pub const OIDC_CLIENTS: &str = "oidcClients";
    pub const AUTH_CONFIG: &str = "authConfig";
    pub const IDPS: &str = "idps";
    pub const CLUSTER_ROLE_BINDINGS: &str = "clusterRoleBindings";
}

/// Handle on the mounted configuration bundle.
///
/// Threaded explicitly through the sync context rather than held in
/// process-wide state so tests can run in parallel against separate roots.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    root: PathBuf,
}

impl ConfigSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the raw contents of a bundle entry.
    ///
    /// A missing file maps to [`SyncError::Skipped`] so callers can
    /// distinguish "no desired state provided" from a real failure.
    pub fn load(&self, key: &str) -> Result<Vec<u8>, SyncError> {
        let path = self.root.join(key);
        match std::fs::read(&path) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(SyncError::Skipped(format!("no file {:?}", path)))
            }
            Err(err) => Err(SyncError::Io {
                key: key.to_string(),
                source: err,
            }),
        }
    }

    /// Load a scalar entry (token, license key, shared secret).
    ///
    /// Trailing whitespace is trimmed: scalar entries are newline-terminated
    /// when mounted from secrets.
    pub fn load_string(&self, key: &str) -> Result<String, SyncError> {
        let data = self.load(key)?;
        let text = String::from_utf8(data).map_err(|err| SyncError::Decode {
            key: key.to_string(),
            reason: err.to_string(),
        })?;
        Ok(text.trim_end().to_string())
    }

    /// Load and decode a structured YAML entry.
    pub fn load_yaml<T: DeserializeOwned>(&self, key: &str) -> Result<T, SyncError> {
        let data = self.load(key)?;
        serde_yaml::from_slice(&data).map_err(|err| SyncError::Decode {
            key: key.to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn source_with(entries: &[(&str, &str)]) -> (tempfile::TempDir, ConfigSource) {
        let dir = tempfile::tempdir().expect("tempdir");
        for (key, data) in entries {
            std::fs::write(dir.path().join(key), data).expect("write entry");
        }
        let source = ConfigSource::new(dir.path());
        (dir, source)
    }

    #[test]
    fn missing_entry_is_skipped() {
        let (_dir, source) = source_with(&[]);
        let err = source.load(keys::LICENSE_KEY).unwrap_err();
        assert!(err.is_skipped());
    }

    #[test]
    fn scalar_entries_are_trimmed() {
        let (_dir, source) = source_with(&[(keys::ROOT_TOKEN, "supersecret\n")]);
        let token = source.load_string(keys::ROOT_TOKEN).expect("load token");
        assert_eq!(token, "supersecret");
    }

    #[test]
    fn yaml_entries_decode() {
        let (_dir, source) = source_with(&[(
            keys::CLUSTER_ROLE_BINDINGS,
            "robot:deployer:\n  - clusterAdmin\n",
        )]);
        let bindings: BTreeMap<String, Vec<String>> = source
            .load_yaml(keys::CLUSTER_ROLE_BINDINGS)
            .expect("load bindings");
        assert_eq!(bindings["robot:deployer"], vec!["clusterAdmin"]);
    }

    #[test]
    fn malformed_yaml_is_fatal_not_skipped() {
        let (_dir, source) = source_with(&[(keys::OIDC_CLIENTS, "[ unclosed")]);
        let err = source
            .load_yaml::<Vec<BTreeMap<String, String>>>(keys::OIDC_CLIENTS)
            .unwrap_err();
        assert!(!err.is_skipped());
        assert!(matches!(err, SyncError::Decode { .. }));
    }
}
