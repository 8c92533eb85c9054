//! `folio init [--endpoint URL [--api-key KEY] | --store PATH]`

use anyhow::{Context, Result};
use clap::Args;

use folio_core::{config, Backend, Config};

use super::BackendArgs;

/// Write the backend selection to ~/.folio/config.yaml.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self, backend: &BackendArgs) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        let path = config::config_path_at(&home);
        if path.exists() && !self.force {
            anyhow::bail!(
                "config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }

        let cfg = match backend.explicit() {
            Some(backend) => Config { backend },
            None => Config::default_at(&home),
        };
        let written = config::save_at(&home, &cfg)
            .with_context(|| format!("failed to write {}", path.display()))?;

        println!("✓ Wrote {}", written.display());
        match &cfg.backend {
            Backend::Http { endpoint, api_key } => println!(
                "  Backend: {endpoint}{}",
                if api_key.is_some() { " (with api key)" } else { "" }
            ),
            Backend::File { path } => println!("  Backend: {}", path.display()),
        }
        Ok(())
    }
}
