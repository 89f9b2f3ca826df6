use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::contract::model::{FocusArea, NewFocusArea, NewTodo, Todo, TodoPatch};

/// REST DTO for to-do representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    pub id: String,
    pub title: String,
    pub notes: String,
    pub focus_area_id: Option<String>,
    pub completed: bool,
    pub archived: bool,
    /// RFC 3339, UTC, millisecond precision
    #[serde(with = "crate::timestamp")]
    #[schema(example = "2024-05-01T12:00:00.123Z")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    #[schema(example = "2024-05-01T12:00:00.123Z")]
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a to-do. `title` is optional here so a missing title
/// gets the same 400 as a blank one.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoReq {
    pub title: Option<String>,
    #[serde(default, alias = "content")]
    pub notes: Option<String>,
    #[serde(default, alias = "focusArea")]
    pub focus_area_id: Option<String>,
}

/// REST DTO for a partial to-do update. `focusAreaId: null` clears the reference.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoReq {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "content")]
    pub notes: Option<String>,
    #[serde(default, alias = "focusArea", deserialize_with = "present_or_null")]
    #[schema(value_type = Option<String>)]
    pub focus_area_id: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`, via `default`).
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// REST DTO for focus area representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FocusAreaDto {
    pub id: String,
    pub name: String,
    #[schema(example = "#4ECDC4")]
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateFocusAreaReq {
    pub name: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            notes: todo.notes,
            focus_area_id: todo.focus_area_id,
            completed: todo.completed,
            archived: todo.archived,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

impl From<CreateTodoReq> for NewTodo {
    fn from(req: CreateTodoReq) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            notes: req.notes,
            focus_area_id: req.focus_area_id,
        }
    }
}

impl From<UpdateTodoReq> for TodoPatch {
    fn from(req: UpdateTodoReq) -> Self {
        Self {
            title: req.title,
            notes: req.notes,
            focus_area_id: req.focus_area_id,
            completed: req.completed,
            archived: req.archived,
        }
    }
}

impl From<FocusArea> for FocusAreaDto {
    fn from(area: FocusArea) -> Self {
        Self {
            id: area.id,
            name: area.name,
            color: area.color,
        }
    }
}

impl From<CreateFocusAreaReq> for NewFocusArea {
    fn from(req: CreateFocusAreaReq) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
        }
    }
}
