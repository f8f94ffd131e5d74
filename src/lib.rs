//! # Cluster Bootstrap
//!
//! A short-lived job that converges a cluster control plane's
//! administrative state with a mounted configuration bundle.
//!
//! ## Overview
//!
//! The job runs once per pod invocation (every deployment or upgrade) and:
//!
//! 1. **Reads the bundle** - named entries mounted under the config root,
//!    each a raw scalar or a YAML document
//! 2. **Connects to the control plane** - a primary client for the cluster
//!    being bootstrapped and, in the federated topology, a second client
//!    for the external federation server
//! 3. **Runs the sync pipeline** - a fixed, ordered list of idempotent
//!    steps covering license, federation, authentication, identity, OIDC,
//!    IDP connectors, and cluster role bindings
//!
//! Steps whose bundle entry is absent are skipped; the first hard failure
//! aborts the run with a non-zero exit so the pod restart policy retries
//! the whole job. Re-running against a fully or partially converged
//! cluster is always safe.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod reconciler;
pub mod secrets;
