//! Tera rendering engine: [`Surface`] enum and [`Renderer`].
//!
//! | Surface | Audience | Shows                                              |
//! |---------|----------|----------------------------------------------------|
//! | Read    | visitors | catalog only                                       |
//! | Edit    | operator | notification, open draft form, catalog with links  |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use folio_sync::{CatalogSnapshot, EditSession};

use crate::context::{EditContext, ReadContext};
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("shared/_card.tera", include_str!("templates/_partials/card.tera")),
    ("shared/_row.tera", include_str!("templates/_partials/row.tera")),
    (
        "shared/_notification.tera",
        include_str!("templates/_partials/notification.tera"),
    ),
    ("shared/_form.tera", include_str!("templates/_partials/form.tera")),
    ("read.txt.tera", include_str!("templates/read.txt.tera")),
    ("edit.txt.tera", include_str!("templates/edit.txt.tera")),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(normalize_template_name(Path::new(name)), (*content).to_string());
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Read,
    Edit,
}

impl Surface {
    pub fn all() -> &'static [Surface] {
        &[Surface::Read, Surface::Edit]
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            Surface::Read => "read.txt.tera",
            Surface::Edit => "edit.txt.tera",
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering surfaces with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded
/// defaults (e.g. `read.txt.tera`, `shared/_card.tera`).
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render one surface. Line endings are normalised to `\n`.
    pub fn render(&self, surface: Surface, ctx: &tera::Context) -> Result<String, RenderError> {
        let content = self.tera.render(surface.template_name(), ctx)?;
        Ok(content.replace("\r\n", "\n").replace('\r', ""))
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Renders both surfaces from session state.
///
/// Uses embedded templates only. Create once with [`Renderer::new`] and reuse.
pub struct Renderer {
    engine: TemplateEngine,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(None)? })
    }

    pub fn with_overrides(dir: &Path) -> Result<Self, RenderError> {
        Ok(Renderer { engine: TemplateEngine::new(Some(dir))? })
    }

    /// The visitor view. Depends on the catalog alone.
    pub fn render_read(&self, snapshot: &CatalogSnapshot) -> Result<String, RenderError> {
        self.render_read_with_context(&ReadContext::from_snapshot(snapshot))
    }

    pub fn render_read_with_context(&self, ctx: &ReadContext) -> Result<String, RenderError> {
        self.engine.render(Surface::Read, &ctx.to_tera_context()?)
    }

    /// The operator view of a whole session.
    pub fn render_edit(&self, session: &EditSession) -> Result<String, RenderError> {
        self.render_edit_with_context(&EditContext::from_session(session))
    }

    pub fn render_edit_with_context(&self, ctx: &EditContext) -> Result<String, RenderError> {
        self.engine.render(Surface::Edit, &ctx.to_tera_context()?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Project, ProjectFields};

    fn snapshot(titles: &[&str], loading: bool) -> CatalogSnapshot {
        CatalogSnapshot {
            records: titles
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    Project::new(
                        format!("id-{i}"),
                        ProjectFields {
                            title: t.to_string(),
                            description: format!("about {t}"),
                            tech_stack: vec!["Rust".to_string(), "Tera".to_string()],
                            ..ProjectFields::default()
                        },
                    )
                })
                .collect::<Vec<_>>()
                .into(),
            loading,
        }
    }

    #[test]
    fn renderer_new_succeeds() {
        Renderer::new().expect("Renderer::new should succeed with embedded templates");
    }

    #[test]
    fn every_surface_template_is_registered() {
        let engine = TemplateEngine::new(None).unwrap();
        for surface in Surface::all() {
            assert!(
                engine.tera.get_template_names().any(|n| n == surface.template_name()),
                "missing template for {:?}",
                surface
            );
        }
    }

    #[test]
    fn read_surface_lists_cards_in_order() {
        let renderer = Renderer::new().unwrap();
        let out = renderer.render_read(&snapshot(&["alpha", "beta"], false)).unwrap();
        let a = out.find("alpha").expect("alpha rendered");
        let b = out.find("beta").expect("beta rendered");
        assert!(a < b);
        assert!(out.contains("Recent Projects"));
        assert!(out.contains("[Rust]"));
    }

    #[test]
    fn read_surface_empty_and_loading_states() {
        let renderer = Renderer::new().unwrap();
        let empty = renderer.render_read(&snapshot(&[], false)).unwrap();
        assert!(empty.contains("No projects yet"));

        let loading = renderer.render_read(&snapshot(&["hidden"], true)).unwrap();
        assert!(loading.contains("Loading projects..."));
        assert!(!loading.contains("hidden"), "list is suppressed while loading");
    }

    #[test]
    fn no_crlf_in_any_rendered_output() {
        let renderer = Renderer::new().unwrap();
        let snap = snapshot(&["lineend_test"], false);
        let read = renderer.render_read(&snap).unwrap();
        let edit = renderer
            .render_edit_with_context(&EditContext::new(&snap, None, None, false))
            .unwrap();
        for content in [read, edit] {
            assert!(!content.contains('\r'));
        }
    }
}
