use async_trait::async_trait;

use crate::contract::{
    error::TodosError,
    model::{FocusArea, NewFocusArea, NewTodo, Todo, TodoPatch},
};

/// Public API trait for the todos module that other modules can use
#[async_trait]
pub trait TodosApi: Send + Sync {
    async fn get_todo(&self, id: &str) -> Result<Todo, TodosError>;

    /// Every to-do, in no particular order
    async fn list_todos(&self) -> Result<Vec<Todo>, TodosError>;

    async fn list_todos_by_focus_area(&self, focus_area_id: &str)
        -> Result<Vec<Todo>, TodosError>;

    async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, TodosError>;

    async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Todo, TodosError>;

    /// Delete a to-do, returning the record as it was before deletion
    async fn delete_todo(&self, id: &str) -> Result<Todo, TodosError>;

    async fn create_focus_area(&self, new_area: NewFocusArea) -> Result<FocusArea, TodosError>;

    async fn list_focus_areas(&self) -> Result<Vec<FocusArea>, TodosError>;
}
