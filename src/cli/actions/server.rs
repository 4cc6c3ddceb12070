use crate::aula;
use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::store::{FileStore, MemoryStore, SharedStore};
use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::info;

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server { port, users_file } => {
            let store: SharedStore = match users_file {
                Some(path) => {
                    info!("Using file store at {}", path.display());
                    Arc::new(
                        FileStore::open(&path)
                            .with_context(|| format!("Failed to open {}", path.display()))?,
                    )
                }
                None => Arc::new(MemoryStore::new()),
            };

            // Seeds the protected admin account on an empty store only.
            store
                .bootstrap(globals.admin_password.expose_secret())
                .context("Failed to bootstrap the credential store")?;

            aula::new(port, store).await?;
        }
    }

    Ok(())
}
