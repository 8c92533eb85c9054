//! Both surfaces rendered from live session state.

use std::sync::Arc;

use folio_core::{Project, ProjectFields};
use folio_renderer::{Renderer, PLACEHOLDER_IMAGE};
use folio_sync::{remote::MemoryRemote, DraftField, EditSession};
use tempfile::TempDir;

fn session_with(projects: Vec<Project>) -> (EditSession, Arc<MemoryRemote>) {
    let remote = Arc::new(MemoryRemote::with_projects(projects));
    (EditSession::new(remote.clone()), remote)
}

fn linked_project() -> Project {
    Project::new(
        "p-1",
        ProjectFields {
            title: "Weather Board".to_string(),
            description: "Forecasts at a glance".to_string(),
            tech_stack: vec!["Rust".to_string(), "Axum".to_string()],
            image_url: None,
            github_link: Some("https://github.com/me/weather".to_string()),
            live_link: Some("https://weather.test".to_string()),
        },
    )
}

#[tokio::test]
async fn read_surface_shows_cards_with_placeholder_image() {
    let (session, _) = session_with(vec![linked_project()]);
    session.catalog.load().await.unwrap();

    let out = Renderer::new().unwrap().render_read(&session.catalog.snapshot()).unwrap();
    assert!(out.contains("Weather Board"));
    assert!(out.contains("Forecasts at a glance"));
    assert!(out.contains("[Rust] [Axum]"));
    assert!(out.contains(PLACEHOLDER_IMAGE));
    assert!(!out.contains("GitHub:"), "links belong to the edit surface");
}

#[tokio::test]
async fn read_surface_before_first_load_is_empty() {
    let (session, _) = session_with(vec![]);
    session.catalog.load().await.unwrap();
    let out = Renderer::new().unwrap().render_read(&session.catalog.snapshot()).unwrap();
    assert!(out.contains("No projects yet"));
}

#[tokio::test]
async fn edit_surface_lists_links_and_form() {
    let (mut session, _) = session_with(vec![linked_project()]);
    session.catalog.load().await.unwrap();
    session.editor.open_for_create();
    session.editor.set_field(DraftField::Title, "Draft title");
    session.editor.add_tag("Go");

    let out = Renderer::new().unwrap().render_edit(&session).unwrap();
    assert!(out.contains("Add New Project"));
    assert!(out.contains("Draft title"));
    assert!(out.contains("[Go x]"));
    assert!(out.contains("[ Add Project ]"));
    assert!(out.contains("GitHub: https://github.com/me/weather"));
    assert!(out.contains("Live: https://weather.test"));
    assert!(!out.contains('\r'));
}

#[tokio::test]
async fn edit_surface_shows_notification_after_save() {
    let (mut session, _) = session_with(vec![]);
    session.catalog.load().await.unwrap();
    session.editor.open_for_create();
    session.editor.set_field(DraftField::Title, "Fresh");
    session.editor.set_field(DraftField::Description, "Brand new");
    session.save().await.unwrap();

    let out = Renderer::new().unwrap().render_edit(&session).unwrap();
    assert!(out.contains("[ok] Project added successfully!"));
    assert!(out.contains("Fresh"));
    assert!(!out.contains("Add New Project"), "editor closes after a save");
}

#[tokio::test]
async fn edit_surface_shows_error_notification() {
    let (mut session, _) = session_with(vec![]);
    session.editor.open_for_create();
    let _ = session.save().await;

    let out = Renderer::new().unwrap().render_edit(&session).unwrap();
    assert!(out.contains("[error] Title and description are required"));
}

#[tokio::test]
async fn editing_mode_uses_update_label() {
    let (mut session, _) = session_with(vec![linked_project()]);
    session.catalog.load().await.unwrap();
    assert!(session.edit(&"p-1".into()));

    let out = Renderer::new().unwrap().render_edit(&session).unwrap();
    assert!(out.contains("Edit Project"));
    assert!(out.contains("[ Update Project ]"));
}

#[test]
fn user_override_replaces_embedded_template() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("read.txt.tera"),
        "custom: {{ projects | length }}\r\n",
    )
    .unwrap();

    let renderer = Renderer::with_overrides(dir.path()).unwrap();
    let out = renderer.render_read(&Default::default()).unwrap();
    assert_eq!(out, "custom: 0\n");
}

#[test]
fn missing_override_dir_falls_back_to_embedded() {
    let dir = TempDir::new().unwrap();
    let renderer = Renderer::with_overrides(&dir.path().join("absent")).unwrap();
    let out = renderer.render_read(&Default::default()).unwrap();
    assert!(out.contains("Recent Projects"));
}
