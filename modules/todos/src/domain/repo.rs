use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::model::{FocusArea, Todo, TodoPatch};

/// Port for the domain layer: persistence operations on to-dos.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait TodosRepository: Send + Sync {
    /// Unconditional put of a fully-formed to-do.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert(&self, todo: Todo) -> anyhow::Result<()>;

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Todo>>;

    /// Every stored to-do, optionally only those referencing `focus_area_id`.
    async fn scan(&self, focus_area_id: Option<&str>) -> anyhow::Result<Vec<Todo>>;

    /// Apply `patch` to an existing to-do and return the record after the update.
    /// `Ok(None)` when no to-do has this id; nothing is created in that case.
    /// `touched_at`, when set, overwrites `updated_at`.
    async fn update(
        &self,
        id: &str,
        patch: TodoPatch,
        touched_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Option<Todo>>;

    /// Delete by id, returning the record as it was before deletion.
    async fn delete(&self, id: &str) -> anyhow::Result<Option<Todo>>;
}

#[async_trait]
pub trait FocusAreasRepository: Send + Sync {
    async fn insert(&self, area: FocusArea) -> anyhow::Result<()>;

    async fn list(&self) -> anyhow::Result<Vec<FocusArea>>;
}
