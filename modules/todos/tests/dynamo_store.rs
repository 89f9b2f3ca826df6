//! Tests against a live DynamoDB-compatible endpoint.
//!
//! Run with DynamoDB Local listening on `DYNAMODB_ENDPOINT`
//! (default `http://localhost:8000`):
//!
//! ```text
//! cargo test -p todos --test dynamo_store -- --ignored
//! ```

use aws_sdk_dynamodb::types::AttributeValue;
use runtime::StoreConfig;
use todos::{
    config::TodosConfig,
    contract::{model::NewTodo, Todo, TodoPatch},
    domain::repo::TodosRepository,
    infra::storage::{
        bootstrap::{ensure_tables, TableSpec, TableStatus},
        client::build_client,
        item::todo_to_item,
        DynamoTodosRepository,
    },
    StoreBackend, Todos,
};

fn store_config() -> StoreConfig {
    StoreConfig {
        endpoint: Some(
            std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000".into()),
        ),
        ..StoreConfig::default()
    }
}

/// Unique table names so runs don't see each other's data.
fn isolated_config() -> TodosConfig {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    TodosConfig {
        todos_table: format!("todos_{suffix}"),
        focus_areas_table: format!("focusAreas_{suffix}"),
        ..TodosConfig::default()
    }
}

#[tokio::test]
#[ignore = "Requires a DynamoDB Local endpoint"]
async fn bootstrap_is_idempotent() {
    let store = store_config();
    let client = build_client(Some(&store)).await;
    let specs = TableSpec::required(&isolated_config());

    let first = ensure_tables(&client, &specs).await;
    assert!(first.iter().all(|(_, s)| *s == TableStatus::Created));

    let second = ensure_tables(&client, &specs).await;
    assert!(second.iter().all(|(_, s)| *s == TableStatus::Exists));
}

#[tokio::test]
#[ignore = "Requires a DynamoDB Local endpoint"]
async fn crud_round_trip_against_dynamodb() {
    let store = store_config();
    let config = isolated_config();
    let module = Todos::init(&config, StoreBackend::Dynamo(Some(&store))).await;
    let client = module.client();

    let todo = client
        .create_todo(NewTodo {
            title: "Live".into(),
            focus_area_id: Some("fa-live".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(client.get_todo(&todo.id).await.unwrap(), todo);

    let by_area = client.list_todos_by_focus_area("fa-live").await.unwrap();
    assert_eq!(by_area, vec![todo.clone()]);

    let updated = client
        .update_todo(
            &todo.id,
            TodoPatch {
                focus_area_id: Some(None),
                completed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.completed);
    assert_eq!(updated.focus_area_id, None);
    assert_eq!(updated.updated_at, todo.updated_at);

    assert_eq!(client.delete_todo(&todo.id).await.unwrap(), updated);
    assert!(client.get_todo(&todo.id).await.is_err());
}

#[tokio::test]
#[ignore = "Requires a DynamoDB Local endpoint"]
async fn conditional_update_never_creates() {
    let store = store_config();
    let config = isolated_config();
    let client = build_client(Some(&store)).await;
    ensure_tables(&client, &TableSpec::required(&config)).await;

    let repo = DynamoTodosRepository::new(client, &config.todos_table);
    let patch = TodoPatch {
        title: Some("ghost".into()),
        ..Default::default()
    };
    assert!(repo.update("missing", patch, None).await.unwrap().is_none());
    assert!(repo.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "Requires a DynamoDB Local endpoint"]
async fn focus_area_scan_sees_legacy_items() {
    let store = store_config();
    let config = isolated_config();
    let client = build_client(Some(&store)).await;
    ensure_tables(&client, &TableSpec::required(&config)).await;

    let ts = chrono::Utc::now();
    let todo = |id: &str, focus_area_id: Option<&str>| Todo {
        id: id.into(),
        title: id.into(),
        notes: String::new(),
        focus_area_id: focus_area_id.map(Into::into),
        completed: false,
        archived: false,
        created_at: ts,
        updated_at: ts,
    };

    let mut legacy = todo_to_item(&todo("legacy", None));
    legacy.remove("focusAreaId");
    legacy.insert("focusArea".into(), AttributeValue::S("fa-old".into()));

    let mut moved = todo_to_item(&todo("moved", Some("fa-new")));
    moved.insert("focusArea".into(), AttributeValue::S("fa-old".into()));

    let current = todo_to_item(&todo("current", Some("fa-old")));

    for item in [legacy, moved, current] {
        client
            .put_item()
            .table_name(&config.todos_table)
            .set_item(Some(item))
            .send()
            .await
            .unwrap();
    }

    let repo = DynamoTodosRepository::new(client, &config.todos_table);
    let mut ids: Vec<String> = repo
        .scan(Some("fa-old"))
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["current".to_string(), "legacy".to_string()]);
}
