//! Service-level tests with recording repositories.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use todos::{
    config::{TodosConfig, DEFAULT_PALETTE},
    contract::{FocusArea, NewFocusArea, NewTodo, Todo, TodoPatch},
    domain::{
        error::DomainError,
        repo::{FocusAreasRepository, TodosRepository},
        service::{Service, ServiceConfig},
    },
    infra::storage::{InMemoryFocusAreasRepository, InMemoryTodosRepository},
};

/// Counts writes and delegates to the in-memory store.
#[derive(Default)]
struct RecordingTodos {
    inner: InMemoryTodosRepository,
    writes: AtomicUsize,
}

#[async_trait]
impl TodosRepository for RecordingTodos {
    async fn insert(&self, todo: Todo) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(todo).await
    }
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Todo>> {
        self.inner.find_by_id(id).await
    }
    async fn scan(&self, focus_area_id: Option<&str>) -> anyhow::Result<Vec<Todo>> {
        self.inner.scan(focus_area_id).await
    }
    async fn update(
        &self,
        id: &str,
        patch: TodoPatch,
        touched_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Option<Todo>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.update(id, patch, touched_at).await
    }
    async fn delete(&self, id: &str) -> anyhow::Result<Option<Todo>> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

fn service_with(todos: Arc<RecordingTodos>, config: ServiceConfig) -> Service {
    Service::new(todos, Arc::new(InMemoryFocusAreasRepository::new()), config)
}

#[tokio::test]
async fn create_fills_defaults_and_equal_timestamps() {
    let repo = Arc::new(RecordingTodos::default());
    let svc = service_with(repo.clone(), ServiceConfig::default());

    let todo = svc
        .create_todo(NewTodo {
            title: "Plan week".into(),
            notes: None,
            focus_area_id: Some(String::new()),
        })
        .await
        .unwrap();

    assert_eq!(todo.notes, "");
    assert_eq!(todo.focus_area_id, None);
    assert!(!todo.completed && !todo.archived);
    assert_eq!(todo.created_at, todo.updated_at);
    assert_eq!(todo.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    assert!(uuid::Uuid::parse_str(&todo.id).is_ok());
    assert_eq!(repo.writes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejected_input_never_reaches_the_store() {
    let repo = Arc::new(RecordingTodos::default());
    let svc = service_with(repo.clone(), ServiceConfig::default());

    assert_eq!(
        svc.create_todo(NewTodo::default()).await.unwrap_err(),
        DomainError::MissingTitle
    );
    assert_eq!(
        svc.update_todo("any", TodoPatch::default()).await.unwrap_err(),
        DomainError::EmptyUpdate
    );
    let blank_title = TodoPatch {
        title: Some("\t".into()),
        ..Default::default()
    };
    assert_eq!(
        svc.update_todo("any", blank_title).await.unwrap_err(),
        DomainError::MissingTitle
    );
    assert_eq!(repo.writes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn update_keeps_updated_at_by_default() {
    let repo = Arc::new(RecordingTodos::default());
    let svc = service_with(repo, ServiceConfig::default());
    let todo = svc
        .create_todo(NewTodo {
            title: "Steady".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = svc
        .update_todo(
            &todo.id,
            TodoPatch {
                notes: Some("more".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.updated_at, todo.updated_at);
    assert_eq!(updated.notes, "more");
}

#[tokio::test]
async fn missing_ids_map_to_not_found() {
    let svc = service_with(Arc::new(RecordingTodos::default()), ServiceConfig::default());
    let patch = TodoPatch {
        completed: Some(true),
        ..Default::default()
    };
    assert_eq!(
        svc.update_todo("nope", patch).await.unwrap_err(),
        DomainError::todo_not_found("nope")
    );
    assert_eq!(
        svc.delete_todo("nope").await.unwrap_err(),
        DomainError::todo_not_found("nope")
    );
    assert_eq!(
        svc.get_todo("nope").await.unwrap_err(),
        DomainError::todo_not_found("nope")
    );
}

#[tokio::test]
async fn empty_palette_falls_back_to_defaults() {
    let config = ServiceConfig::from(&TodosConfig {
        palette: Vec::new(),
        ..Default::default()
    });
    assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());

    let areas: Arc<dyn FocusAreasRepository> = Arc::new(InMemoryFocusAreasRepository::new());
    let svc = Service::new(Arc::new(InMemoryTodosRepository::new()), areas.clone(), config);

    let area: FocusArea = svc
        .create_focus_area(NewFocusArea {
            name: "Health".into(),
        })
        .await
        .unwrap();
    assert!(DEFAULT_PALETTE.contains(&area.color.as_str()));
    assert_eq!(areas.list().await.unwrap(), vec![area]);
}
