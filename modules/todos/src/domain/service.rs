use std::sync::Arc;

use rand::seq::IndexedRandom;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::{default_palette, TodosConfig};
use crate::contract::model::{FocusArea, NewFocusArea, NewTodo, Todo, TodoPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::{FocusAreasRepository, TodosRepository};
use crate::timestamp;

/// Domain service with the business rules for to-dos and focus areas.
/// Depends only on the repository ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    todos: Arc<dyn TodosRepository>,
    focus_areas: Arc<dyn FocusAreasRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub palette: Vec<String>,
    pub touch_updated_at_on_update: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            touch_updated_at_on_update: false,
        }
    }
}

impl From<&TodosConfig> for ServiceConfig {
    fn from(cfg: &TodosConfig) -> Self {
        let palette = if cfg.palette.is_empty() {
            default_palette()
        } else {
            cfg.palette.clone()
        };
        Self {
            palette,
            touch_updated_at_on_update: cfg.touch_updated_at_on_update,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        todos: Arc<dyn TodosRepository>,
        focus_areas: Arc<dyn FocusAreasRepository>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            todos,
            focus_areas,
            config,
        }
    }

    #[instrument(name = "todos.service.create_todo", skip(self, new_todo))]
    pub async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, DomainError> {
        info!("Creating new to-do");

        if new_todo.title.trim().is_empty() {
            return Err(DomainError::MissingTitle);
        }

        let now = timestamp::now();
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: new_todo.title,
            notes: new_todo.notes.unwrap_or_default(),
            focus_area_id: new_todo.focus_area_id.filter(|id| !id.is_empty()),
            completed: false,
            archived: false,
            created_at: now,
            updated_at: now,
        };

        self.todos
            .insert(todo.clone())
            .await
            .map_err(DomainError::from_store)?;

        info!("Successfully created to-do with id={}", todo.id);
        Ok(todo)
    }

    #[instrument(name = "todos.service.list_todos", skip(self))]
    pub async fn list_todos(&self) -> Result<Vec<Todo>, DomainError> {
        let todos = self
            .todos
            .scan(None)
            .await
            .map_err(DomainError::from_store)?;
        debug!("Listed {} to-dos", todos.len());
        Ok(todos)
    }

    #[instrument(name = "todos.service.get_todo", skip(self), fields(todo_id = %id))]
    pub async fn get_todo(&self, id: &str) -> Result<Todo, DomainError> {
        debug!("Getting to-do by id");
        self.todos
            .find_by_id(id)
            .await
            .map_err(DomainError::from_store)?
            .ok_or_else(|| DomainError::todo_not_found(id))
    }

    #[instrument(
        name = "todos.service.list_todos_by_focus_area",
        skip(self),
        fields(focus_area_id = %focus_area_id)
    )]
    pub async fn list_todos_by_focus_area(
        &self,
        focus_area_id: &str,
    ) -> Result<Vec<Todo>, DomainError> {
        let todos = self
            .todos
            .scan(Some(focus_area_id))
            .await
            .map_err(DomainError::from_store)?;
        debug!("Listed {} to-dos for focus area", todos.len());
        Ok(todos)
    }

    #[instrument(name = "todos.service.update_todo", skip(self, patch), fields(todo_id = %id))]
    pub async fn update_todo(&self, id: &str, patch: TodoPatch) -> Result<Todo, DomainError> {
        info!("Updating to-do");

        if patch.is_empty() {
            return Err(DomainError::EmptyUpdate);
        }
        if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
            return Err(DomainError::MissingTitle);
        }

        let touched_at = self
            .config
            .touch_updated_at_on_update
            .then(timestamp::now);

        let updated = self
            .todos
            .update(id, patch, touched_at)
            .await
            .map_err(DomainError::from_store)?
            .ok_or_else(|| DomainError::todo_not_found(id))?;

        info!("Successfully updated to-do");
        Ok(updated)
    }

    #[instrument(name = "todos.service.delete_todo", skip(self), fields(todo_id = %id))]
    pub async fn delete_todo(&self, id: &str) -> Result<Todo, DomainError> {
        info!("Deleting to-do");

        let deleted = self
            .todos
            .delete(id)
            .await
            .map_err(DomainError::from_store)?
            .ok_or_else(|| DomainError::todo_not_found(id))?;

        info!("Successfully deleted to-do");
        Ok(deleted)
    }

    #[instrument(name = "todos.service.create_focus_area", skip(self, new_area))]
    pub async fn create_focus_area(&self, new_area: NewFocusArea) -> Result<FocusArea, DomainError> {
        info!("Creating new focus area");

        if new_area.name.trim().is_empty() {
            return Err(DomainError::MissingName);
        }

        let area = FocusArea {
            id: Uuid::new_v4().to_string(),
            name: new_area.name,
            color: self.pick_color(),
        };

        self.focus_areas
            .insert(area.clone())
            .await
            .map_err(DomainError::from_store)?;

        info!("Successfully created focus area with id={}", area.id);
        Ok(area)
    }

    #[instrument(name = "todos.service.list_focus_areas", skip(self))]
    pub async fn list_focus_areas(&self) -> Result<Vec<FocusArea>, DomainError> {
        let areas = self
            .focus_areas
            .list()
            .await
            .map_err(DomainError::from_store)?;
        debug!("Listed {} focus areas", areas.len());
        Ok(areas)
    }

    fn pick_color(&self) -> String {
        self.config
            .palette
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(|| default_palette()[0].clone())
    }
}
