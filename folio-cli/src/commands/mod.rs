pub mod add;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod show;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use folio_core::{config, Backend};
use folio_sync::{catalog::LOAD_FAILED, EditSession, NotificationKind};

/// Backend overrides, accepted by every subcommand.
#[derive(Args, Debug, Default)]
pub struct BackendArgs {
    /// Local YAML project file to use instead of the configured backend.
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "endpoint")]
    pub store: Option<PathBuf>,

    /// REST endpoint exposing the `projects` resource.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// API key sent with every request to --endpoint.
    #[arg(long, global = true, value_name = "KEY", requires = "endpoint")]
    pub api_key: Option<String>,
}

impl BackendArgs {
    /// The backend named by flags alone, if any.
    pub fn explicit(&self) -> Option<Backend> {
        if let Some(endpoint) = &self.endpoint {
            return Some(Backend::Http {
                endpoint: endpoint.clone(),
                api_key: self.api_key.clone(),
            });
        }
        self.store.as_ref().map(|path| Backend::File { path: path.clone() })
    }

    /// Flags, then environment, then `config.yaml`, then the default file.
    pub fn resolve(&self) -> Result<Backend> {
        if let Some(backend) = self.explicit() {
            return Ok(backend);
        }
        let home = dirs::home_dir().context("could not determine home directory")?;
        let cfg = config::load_at(&home)
            .context("failed to load config: fix or remove ~/.folio/config.yaml")?
            .with_env(|key| std::env::var(key).ok());
        Ok(cfg.backend)
    }
}

/// Drive one command on a single-threaded runtime.
pub fn block_on<F: Future>(fut: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(fut))
}

/// Open a session against `backend` and load the catalog once.
pub async fn open_loaded(backend: &Backend) -> Result<EditSession> {
    let session = EditSession::connect(backend);
    session.catalog.load().await.context(LOAD_FAILED)?;
    Ok(session)
}

/// Print whatever notification the session is showing.
pub fn print_notification(session: &EditSession) {
    let Some(n) = session.notifications.current() else {
        return;
    };
    match n.kind {
        NotificationKind::Success => println!("{} {}", "✓".green(), n.message.green()),
        NotificationKind::Error => eprintln!("{} {}", "✗".red(), n.message.red()),
    }
}

/// Wrap a failed operation so the visible notification is the top-level message.
pub fn notified<E>(session: &EditSession, err: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    let err = anyhow::Error::new(err);
    match session.notifications.current() {
        Some(n) if n.is_error() => err.context(n.message),
        _ => err,
    }
}
