//! `folio show`: the visitor view.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use folio_renderer::Renderer;

use super::{block_on, open_loaded, BackendArgs};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Directory of `.tera` files overriding the built-in templates.
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

impl ShowArgs {
    pub fn run(self, backend: &BackendArgs) -> Result<()> {
        let renderer = renderer(self.templates.as_deref())?;
        let backend = backend.resolve()?;
        let session = block_on(open_loaded(&backend))??;
        let out = renderer
            .render_read(&session.catalog.snapshot())
            .context("failed to render project list")?;
        print!("{out}");
        Ok(())
    }
}

pub(super) fn renderer(templates: Option<&std::path::Path>) -> Result<Renderer> {
    match templates {
        Some(dir) => Renderer::with_overrides(dir)
            .with_context(|| format!("failed to load templates from {}", dir.display())),
        None => Renderer::new().context("failed to load built-in templates"),
    }
}
