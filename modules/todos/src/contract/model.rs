use chrono::{DateTime, Utc};

/// Pure to-do model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub notes: String,
    pub focus_area_id: Option<String>,
    pub completed: bool,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new to-do
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTodo {
    pub title: String,
    pub notes: Option<String>,
    pub focus_area_id: Option<String>,
}

/// Partial update for a to-do. `None` leaves the field untouched;
/// `focus_area_id: Some(None)` clears the reference.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub focus_area_id: Option<Option<String>>,
    pub completed: Option<bool>,
    pub archived: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.focus_area_id.is_none()
            && self.completed.is_none()
            && self.archived.is_none()
    }
}

impl Todo {
    /// Apply every present field of `patch`.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(focus_area_id) = patch.focus_area_id {
            self.focus_area_id = focus_area_id;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(archived) = patch.archived {
            self.archived = archived;
        }
    }
}

/// Named, colored tag that to-dos may reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusArea {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewFocusArea {
    pub name: String,
}
