//! The edit form: hidden, or shown with exactly one [`Draft`].
//!
//! Every transition here is synchronous. The draft is never sent anywhere
//! directly; [`Draft::to_fields`] produces the sanitized copy a save carries.

use folio_core::{normalize_tag, Project, ProjectFields, ProjectId, ValidationError};

/// Whether the open draft creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Editing(ProjectId),
}

impl DraftMode {
    pub fn edit_target(&self) -> Option<&ProjectId> {
        match self {
            DraftMode::Create => None,
            DraftMode::Editing(id) => Some(id),
        }
    }
}

/// The scalar fields [`DraftEditor::set_field`] can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    ImageUrl,
    GithubLink,
    LiveLink,
}

/// An in-progress record. Fields may be empty until save validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub mode: DraftMode,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub image_url: String,
    pub github_link: String,
    pub live_link: String,
    /// Pending tag text; committed only by an explicit add.
    pub tag_input: String,
}

impl Draft {
    fn empty() -> Self {
        Self {
            mode: DraftMode::Create,
            title: String::new(),
            description: String::new(),
            tech_stack: Vec::new(),
            image_url: String::new(),
            github_link: String::new(),
            live_link: String::new(),
            tag_input: String::new(),
        }
    }

    fn from_project(project: &Project) -> Self {
        let f = &project.fields;
        Self {
            mode: DraftMode::Editing(project.id.clone()),
            title: f.title.clone(),
            description: f.description.clone(),
            tech_stack: f.tech_stack.clone(),
            image_url: f.image_url.clone().unwrap_or_default(),
            github_link: f.github_link.clone().unwrap_or_default(),
            live_link: f.live_link.clone().unwrap_or_default(),
            tag_input: String::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, DraftMode::Editing(_))
    }

    /// The copy a save sends: every field as typed, except blank links,
    /// which become absent.
    pub fn to_fields(&self) -> ProjectFields {
        ProjectFields {
            title: self.title.clone(),
            description: self.description.clone(),
            tech_stack: self.tech_stack.clone(),
            image_url: link(&self.image_url),
            github_link: link(&self.github_link),
            live_link: link(&self.live_link),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_fields().validate()
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
            DraftField::ImageUrl => &mut self.image_url,
            DraftField::GithubLink => &mut self.github_link,
            DraftField::LiveLink => &mut self.live_link,
        }
    }
}

fn link(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

/// Owns the form state. `None` means the form is hidden.
#[derive(Debug, Clone, Default)]
pub struct DraftEditor {
    draft: Option<Draft>,
}

impl DraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Fresh empty create draft. Any open draft, including one editing another
    /// record, is discarded, never merged.
    pub fn open_for_create(&mut self) {
        self.draft = Some(Draft::empty());
    }

    /// Seed the draft from every field of `project`.
    pub fn open_for_edit(&mut self, project: &Project) {
        self.draft = Some(Draft::from_project(project));
    }

    /// The "Add" control: opens a create draft when hidden, closes and resets
    /// when shown.
    pub fn toggle_create(&mut self) {
        if self.is_open() {
            self.reset();
        } else {
            self.open_for_create();
        }
    }

    /// No validation here. No-op while the form is hidden.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            *draft.field_mut(field) = value.into();
        }
    }

    /// Replace the pending tag text. Never touches the tag list.
    pub fn set_tag_input(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.tag_input = text.into();
        }
    }

    /// Append `text` (trimmed) unless it is blank or already present, then
    /// clear the pending tag text. Returns whether a tag was added.
    pub fn add_tag(&mut self, text: &str) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        let Some(tag) = normalize_tag(text) else {
            return false;
        };
        if draft.tech_stack.contains(&tag) {
            return false;
        }
        draft.tech_stack.push(tag);
        draft.tag_input.clear();
        true
    }

    /// The input "confirm" action: add whatever is in the pending tag text.
    pub fn commit_tag_input(&mut self) -> bool {
        let pending = match self.draft.as_ref() {
            Some(draft) => draft.tag_input.clone(),
            None => return false,
        };
        self.add_tag(&pending)
    }

    /// Remove the occurrence of `text`. Returns whether anything was removed.
    pub fn remove_tag(&mut self, text: &str) -> bool {
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        match draft.tech_stack.iter().position(|t| t == text) {
            Some(index) => {
                draft.tech_stack.remove(index);
                true
            }
            None => false,
        }
    }

    /// Discard the draft and hide the form.
    pub fn reset(&mut self) {
        self.draft = None;
    }
}
