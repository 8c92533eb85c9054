//! Template contexts: serializable rendering payloads built from session state.

use serde::Serialize;

use folio_core::Project;
use folio_sync::{CatalogSnapshot, Draft, EditSession, Notification};

use crate::error::RenderError;

/// Shown on a card whose record has no image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=192&width=384&query=project";

/// One catalog record, flattened for templates.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCtx {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    /// The record's image, or [`PLACEHOLDER_IMAGE`].
    pub image_url: String,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    /// 1-based position in the catalog.
    pub position: usize,
}

impl ProjectCtx {
    fn from_project(position: usize, project: &Project) -> Self {
        let f = &project.fields;
        Self {
            id: project.id.to_string(),
            title: f.title.clone(),
            description: f.description.clone(),
            tech_stack: f.tech_stack.clone(),
            image_url: f
                .image_url
                .clone()
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            github_link: f.github_link.clone(),
            live_link: f.live_link.clone(),
            position,
        }
    }
}

fn projects_ctx(snapshot: &CatalogSnapshot) -> Vec<ProjectCtx> {
    snapshot
        .records
        .iter()
        .enumerate()
        .map(|(i, p)| ProjectCtx::from_project(i + 1, p))
        .collect()
}

/// Payload of the visitor-facing read surface.
#[derive(Debug, Clone, Serialize)]
pub struct ReadContext {
    pub loading: bool,
    pub projects: Vec<ProjectCtx>,
}

impl ReadContext {
    pub fn from_snapshot(snapshot: &CatalogSnapshot) -> Self {
        Self {
            loading: snapshot.loading,
            projects: projects_ctx(snapshot),
        }
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        to_tera(self)
    }
}

/// The open draft, as the form shows it.
#[derive(Debug, Clone, Serialize)]
pub struct FormCtx {
    pub heading: &'static str,
    pub editing: bool,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub github_link: String,
    pub live_link: String,
    pub tech_stack: Vec<String>,
    pub tag_input: String,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

impl FormCtx {
    pub fn new(draft: &Draft, saving: bool) -> Self {
        let editing = draft.is_editing();
        Self {
            heading: if editing { "Edit Project" } else { "Add New Project" },
            editing,
            title: draft.title.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            github_link: draft.github_link.clone(),
            live_link: draft.live_link.clone(),
            tech_stack: draft.tech_stack.clone(),
            tag_input: draft.tag_input.clone(),
            submit_label: match (saving, editing) {
                (true, _) => "Saving...",
                (false, true) => "Update Project",
                (false, false) => "Add Project",
            },
            submit_disabled: saving,
        }
    }
}

/// Payload of the operator-facing edit surface.
#[derive(Debug, Clone, Serialize)]
pub struct EditContext {
    pub loading: bool,
    pub notification: Option<Notification>,
    pub form: Option<FormCtx>,
    pub projects: Vec<ProjectCtx>,
}

impl EditContext {
    pub fn new(
        snapshot: &CatalogSnapshot,
        notification: Option<Notification>,
        draft: Option<&Draft>,
        saving: bool,
    ) -> Self {
        Self {
            loading: snapshot.loading,
            notification,
            form: draft.map(|d| FormCtx::new(d, saving)),
            projects: projects_ctx(snapshot),
        }
    }

    pub fn from_session(session: &EditSession) -> Self {
        Self::new(
            &session.catalog.snapshot(),
            session.notifications.current(),
            session.editor.draft(),
            session.coordinator.is_saving(),
        )
    }

    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        to_tera(self)
    }
}

fn to_tera<T: Serialize>(ctx: &T) -> Result<tera::Context, RenderError> {
    let value = serde_json::to_value(ctx)?;
    Ok(tera::Context::from_value(value)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
