//! `folio list [--json]`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use folio_core::Project;

use super::{block_on, open_loaded, BackendArgs};

/// List catalog records.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "tech stack")]
    tech: String,
}

impl ListArgs {
    pub fn run(self, backend: &BackendArgs) -> Result<()> {
        let backend = backend.resolve()?;
        let session = block_on(open_loaded(&backend))??;
        let snapshot = session.catalog.snapshot();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&*snapshot.records)
                    .context("failed to serialize project list")?
            );
            return Ok(());
        }

        print_table(&snapshot.records);
        Ok(())
    }
}

fn print_table(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects yet.");
        println!("Run: folio add --title <T> --description <D>");
        return;
    }

    let rows: Vec<ProjectRow> = projects
        .iter()
        .map(|p| ProjectRow {
            id: p.id.to_string(),
            title: p.title().to_string(),
            tech: p.fields.tech_stack.join(", "),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("{}", format!("{} project(s)", projects.len()).bright_black());
}
