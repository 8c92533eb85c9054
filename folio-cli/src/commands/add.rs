//! `folio add --title T --description D [--tech X]...`

use anyhow::Result;
use clap::Args;

use folio_sync::{DraftField, EditSession};

use super::{block_on, notified, print_notification, BackendArgs};

/// Create a project.
#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Technology tag; repeat for several. Duplicates are dropped.
    #[arg(long = "tech", value_name = "TAG")]
    pub tech: Vec<String>,

    #[arg(long, value_name = "URL")]
    pub image_url: Option<String>,

    #[arg(long, value_name = "URL")]
    pub github: Option<String>,

    #[arg(long, value_name = "URL")]
    pub live: Option<String>,
}

impl AddArgs {
    pub fn run(self, backend: &BackendArgs) -> Result<()> {
        let backend = backend.resolve()?;
        block_on(async move {
            let mut session = EditSession::connect(&backend);
            session.editor.open_for_create();
            self.apply(&mut session);

            match session.save().await {
                Ok(saved) => {
                    print_notification(&session);
                    println!("  id: {}", saved.id());
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
        for tag in self.tech {
            editor.set_tag_input(tag);
            if !editor.commit_tag_input() {
                tracing::debug!("tag skipped: blank or duplicate");
            }
        }
    }
}
