use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the to-do and focus-area routes on `router`, sharing `service` with the handlers.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route(
            "/focus-areas",
            get(handlers::list_focus_areas).post(handlers::create_focus_area),
        )
        .route(
            "/focus-areas/{focus_area_id}/todos",
            get(handlers::list_todos_by_focus_area),
        )
        .layer(Extension(service))
}
