//! `folio edit <ID> [...] [--preview]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use folio_core::ProjectId;
use folio_sync::{DraftField, EditSession};

use super::{block_on, notified, open_loaded, print_notification, show, BackendArgs};

/// Change an existing project. Blank link values clear the link.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project id, as shown by `folio list`.
    pub id: String,

    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Add a technology tag; repeat for several.
    #[arg(long = "tech-add", value_name = "TAG")]
    pub tech_add: Vec<String>,

    /// Remove a technology tag; repeat for several.
    #[arg(long = "tech-remove", value_name = "TAG")]
    pub tech_remove: Vec<String>,

    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,

    #[arg(long, value_name = "URL")]
    pub github: Option<String>,

    #[arg(long, value_name = "URL")]
    pub live: Option<String>,

    /// Render the edit view with the changes applied instead of saving.
    #[arg(long)]
    pub preview: bool,

    /// Template override directory for --preview.
    #[arg(long, value_name = "DIR", requires = "preview")]
    pub templates: Option<PathBuf>,
}

impl EditArgs {
    pub fn run(self, backend: &BackendArgs) -> Result<()> {
        let backend = backend.resolve()?;
        block_on(async move {
            let mut session = open_loaded(&backend).await?;
            let id = ProjectId::from(self.id.as_str());
            if !session.edit(&id) {
                anyhow::bail!("no project with id {id}");
            }

            let preview = self.preview;
            let templates = self.templates.clone();
            self.apply(&mut session);

            if preview {
                let out = show::renderer(templates.as_deref())?
                    .render_edit(&session)
                    .context("failed to render edit view")?;
                print!("{out}");
                return Ok(());
            }

            match session.save().await {
                Ok(_) => {
                    print_notification(&session);
                    Ok(())
                }
                Err(err) => Err(notified(&session, err)),
            }
        })?
    }

    fn apply(self, session: &mut EditSession) {
        let editor = &mut session.editor;
        let fields = [
            (DraftField::Title, self.title),
            (DraftField::Description, self.description),
            (DraftField::ImageUrl, self.image_url),
            (DraftField::GithubLink, self.github),
            (DraftField::LiveLink, self.live),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                editor.set_field(field, value);
            }
        }
        for tag in &self.tech_remove {
            if !editor.remove_tag(tag) {
                tracing::warn!(%tag, "tag not present");
            }
        }
        for tag in self.tech_add {
            editor.set_tag_input(tag);
            editor.commit_tag_input();
        }
    }
}
