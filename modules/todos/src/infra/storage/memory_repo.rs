//! In-memory adapters, used with `--mock` and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::contract::model::{FocusArea, Todo, TodoPatch};
use crate::domain::repo::{FocusAreasRepository, TodosRepository};

#[derive(Default)]
pub struct InMemoryTodosRepository {
    items: DashMap<String, Todo>,
}

impl InMemoryTodosRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl TodosRepository for InMemoryTodosRepository {
    async fn insert(&self, todo: Todo) -> anyhow::Result<()> {
        self.items.insert(todo.id.clone(), todo);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Todo>> {
        Ok(self.items.get(id).map(|entry| entry.value().clone()))
    }

    async fn scan(&self, focus_area_id: Option<&str>) -> anyhow::Result<Vec<Todo>> {
        Ok(self
            .items
            .iter()
            .filter(|entry| match focus_area_id {
                Some(wanted) => entry.focus_area_id.as_deref() == Some(wanted),
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update(
        &self,
        id: &str,
        patch: TodoPatch,
        touched_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Option<Todo>> {
        let Some(mut entry) = self.items.get_mut(id) else {
            return Ok(None);
        };
        let todo = entry.value_mut();
        todo.apply(patch);
        if let Some(ts) = touched_at {
            todo.updated_at = ts;
        }
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<Option<Todo>> {
        Ok(self.items.remove(id).map(|(_, todo)| todo))
    }
}

#[derive(Default)]
pub struct InMemoryFocusAreasRepository {
    items: DashMap<String, FocusArea>,
}

impl InMemoryFocusAreasRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FocusAreasRepository for InMemoryFocusAreasRepository {
    async fn insert(&self, area: FocusArea) -> anyhow::Result<()> {
        self.items.insert(area.id.clone(), area);
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<FocusArea>> {
        Ok(self
            .items
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
