//! `folio delete <ID> [--yes]`

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use folio_core::ProjectId;
use folio_sync::DeleteOutcome;

use super::{block_on, notified, open_loaded, print_notification, BackendArgs};

/// Delete a project after confirmation.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project id, as shown by `folio list`.
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl DeleteArgs {
    pub fn run(self, backend: &BackendArgs) -> Result<()> {
        let backend = backend.resolve()?;
        let assume_yes = self.yes;
        block_on(async move {
            let session = open_loaded(&backend).await?;
            let id = ProjectId::from(self.id);
            if session.catalog.find(&id).is_none() {
                anyhow::bail!("no project with id {id}");
            }

            let gate = |prompt: &str| assume_yes || ask(prompt);
            match session.delete(&id, &gate).await {
                Ok(DeleteOutcome::Deleted) => {
                    print_notification(&session);
                    Ok(())
                }
                Ok(DeleteOutcome::Declined) => {
                    println!("Cancelled.");
                    Ok(())
                }
                Err(err) => Err(notified(&session, err)),
            }
        })?
    }
}

/// Stdin yes/no. Anything but `y`/`yes` is a no.
fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
