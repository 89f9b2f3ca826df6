//! Wiring for the todos module: store selection, table bootstrap, service,
//! REST routes and OpenAPI document.

use std::sync::Arc;

use axum::Router;
use runtime::StoreConfig;
use tracing::info;
use utoipa::OpenApi;

use crate::api::rest::{openapi::TodosApiDoc, routes};
use crate::config::TodosConfig;
use crate::contract::client::TodosApi;
use crate::domain::repo::{FocusAreasRepository, TodosRepository};
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::TodosLocalClient;
use crate::infra::storage::{
    bootstrap::{ensure_tables, TableSpec},
    client::build_client,
    DynamoFocusAreasRepository, DynamoTodosRepository, InMemoryFocusAreasRepository,
    InMemoryTodosRepository,
};

/// Where to-dos and focus areas are kept.
#[derive(Debug, Clone, Copy)]
pub enum StoreBackend<'a> {
    /// DynamoDB (or a compatible local endpoint) per the `store` section.
    Dynamo(Option<&'a StoreConfig>),
    /// Process-local maps; nothing survives a restart.
    InMemory,
}

/// The initialized todos module.
pub struct Todos {
    service: Arc<Service>,
}

impl Todos {
    pub async fn init(config: &TodosConfig, backend: StoreBackend<'_>) -> Self {
        let (todos, focus_areas): (Arc<dyn TodosRepository>, Arc<dyn FocusAreasRepository>) =
            match backend {
                StoreBackend::InMemory => {
                    info!("Using in-memory store");
                    (
                        Arc::new(InMemoryTodosRepository::new()),
                        Arc::new(InMemoryFocusAreasRepository::new()),
                    )
                }
                StoreBackend::Dynamo(store) => {
                    let client = build_client(store).await;
                    ensure_tables(&client, &TableSpec::required(config)).await;
                    (
                        Arc::new(DynamoTodosRepository::new(
                            client.clone(),
                            &config.todos_table,
                        )),
                        Arc::new(DynamoFocusAreasRepository::new(
                            client,
                            &config.focus_areas_table,
                        )),
                    )
                }
            };

        Self::with_repositories(config, todos, focus_areas)
    }

    /// In-memory module with the given config; no I/O.
    pub fn in_memory(config: &TodosConfig) -> Self {
        Self::with_repositories(
            config,
            Arc::new(InMemoryTodosRepository::new()),
            Arc::new(InMemoryFocusAreasRepository::new()),
        )
    }

    pub fn with_repositories(
        config: &TodosConfig,
        todos: Arc<dyn TodosRepository>,
        focus_areas: Arc<dyn FocusAreasRepository>,
    ) -> Self {
        let service = Service::new(todos, focus_areas, ServiceConfig::from(config));
        Self {
            service: Arc::new(service),
        }
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn TodosApi> {
        Arc::new(TodosLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: Router) -> Router {
        routes::register_routes(router, self.service.clone())
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        TodosApiDoc::openapi()
    }
}
