use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::TodosApi,
    error::TodosError,
    model::{FocusArea, NewFocusArea, NewTodo, Todo, TodoPatch},
};
use crate::domain::service::Service;

/// Local implementation of the TodosApi trait that delegates to the domain service
pub struct TodosLocalClient {
    service: Arc<Service>,
}

impl TodosLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TodosApi for TodosLocalClient {
    async fn get_todo(&self, id: &str) -> Result<Todo, TodosError> {
        self.service.get_todo(id).await.map_err(Into::into)
    }

    async fn list_todos(&self) -> Result<Vec<Todo>, TodosError> {
        self.service.list_todos().await.map_err(Into::into)
    }

    async fn list_todos_by_focus_area(
        &self,
        focus_area_id: &str,
    ) -> Result<Vec<Todo>, TodosError> {
        self.service
            .list_todos_by_focus_area(focus_area_id)
            .await
            .map_err(Into::into)
    }

    async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, TodosError> {
        self.service.create_todo(new_todo).await.map_err(Into::into)
    }

    async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Todo, TodosError> {
        self.service
            .update_todo(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_todo(&self, id: &str) -> Result<Todo, TodosError> {
        self.service.delete_todo(id).await.map_err(Into::into)
    }

    async fn create_focus_area(&self, new_area: NewFocusArea) -> Result<FocusArea, TodosError> {
        self.service
            .create_focus_area(new_area)
            .await
            .map_err(Into::into)
    }

    async fn list_focus_areas(&self) -> Result<Vec<FocusArea>, TodosError> {
        self.service.list_focus_areas().await.map_err(Into::into)
    }
}
