//! Bootstrap job entry point.
//!
//! Wires the configuration bundle and the control-plane clients together
//! and runs the sync pipeline once. Exit code 0 on full success (skipped
//! steps included), non-zero on the first hard failure.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cluster_bootstrap::api::{AdminApi, rest::RestClient};
use cluster_bootstrap::config::{keys, ConfigSource};
use cluster_bootstrap::constants::{
    CONFIG_ROOT_ENV, CONTROLPLANE_ADDRESS_ENV, DEFAULT_CONFIG_ROOT, DEFAULT_CONTROLPLANE_ADDRESS,
};
use cluster_bootstrap::error::SyncError;
use cluster_bootstrap::pipeline::run_pipeline;
use cluster_bootstrap::reconciler::SyncContext;

/// Converge a cluster's control-plane state with a mounted config bundle
#[derive(Debug, Parser)]
#[command(name = "cluster-bootstrap", version)]
struct Cli {
    /// Directory the configuration bundle is mounted at
    #[arg(long, env = CONFIG_ROOT_ENV, default_value = DEFAULT_CONFIG_ROOT)]
    config_root: PathBuf,

    /// Address of the control plane's admin API
    #[arg(long, env = CONTROLPLANE_ADDRESS_ENV, default_value = DEFAULT_CONTROLPLANE_ADDRESS)]
    address: String,
}

/// Treat a skipped load as `None`, everything else as the error it is.
fn optional(result: Result<String, SyncError>) -> Result<Option<String>, SyncError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_skipped() => Ok(None),
        Err(err) => Err(err),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cluster_bootstrap=info".into()),
        )
        .init();

    let cli = Cli::parse();

    info!(
        build = env!("BUILD_GIT_HASH"),
        config_root = %cli.config_root.display(),
        address = %cli.address,
        "starting cluster bootstrap"
    );

    let config = ConfigSource::new(&cli.config_root);

    // The root token doubles as the job's own credential; absence just
    // means the cluster isn't running with auth yet.
    let root_token = match optional(config.load_string(keys::ROOT_TOKEN)) {
        Ok(Some(token)) => Some(token),
        Ok(None) => {
            info!("no root token in bundle, connecting without an auth token");
            None
        }
        Err(err) => return Err(err).context("loading root token"),
    };

    let cluster: Arc<dyn AdminApi> = Arc::new(
        RestClient::new(&cli.address, root_token)
            .context("connecting to the control plane")?,
    );

    // A separate federation-server client only exists in the external
    // federation topology; otherwise the primary handle is reused.
    let federation: Arc<dyn AdminApi> =
        match optional(config.load_string(keys::ENTERPRISE_SERVER_ADDRESS))? {
            Some(address) => {
                let token = optional(config.load_string(keys::ENTERPRISE_ROOT_TOKEN))?;
                info!(address = %address, "using external federation server");
                Arc::new(
                    RestClient::new(&address, token)
                        .context("connecting to the federation server")?,
                )
            }
            None => Arc::clone(&cluster),
        };

    let ctx = SyncContext::new(config, cluster, federation);

    if run_pipeline(&ctx).await.is_err() {
        // The runner already logged the failing step and cause.
        std::process::exit(1);
    }

    Ok(())
}
