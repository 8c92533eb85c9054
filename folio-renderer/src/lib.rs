//! # folio-renderer
//!
//! Tera-based rendering of the two project surfaces: the visitor-facing read
//! surface and the operator-facing edit surface.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use folio_renderer::Renderer;
//! use folio_sync::CatalogStore;
//!
//! fn print_catalog(catalog: &CatalogStore) {
//!     if let Ok(renderer) = Renderer::new() {
//!         if let Ok(text) = renderer.render_read(&catalog.snapshot()) {
//!             print!("{text}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{EditContext, FormCtx, ProjectCtx, ReadContext, PLACEHOLDER_IMAGE};
pub use engine::{Renderer, Surface, TemplateEngine};
pub use error::RenderError;
