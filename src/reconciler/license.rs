//! License activation.
//!
//! Applies the activation code to the federation server. Activation is
//! idempotent upstream, so there is no remote diff: the code is applied on
//! every run it is present for.

use crate::config::keys;
use crate::error::SyncError;

use super::SyncContext;

pub async fn sync(ctx: &SyncContext) -> Result<(), SyncError> {
    let key = ctx.config.load_string(keys::LICENSE_KEY)?;
    ctx.federation.activate_license(&key).await?;
    Ok(())
}
