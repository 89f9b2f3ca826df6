use std::sync::Arc;

use api_ingress::{Problem, ProblemInstance, ProblemResponse};
use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use tracing::{error, info};

use crate::api::rest::dto::{
    CreateFocusAreaReq, CreateTodoReq, FocusAreaDto, TodoDto, UpdateTodoReq,
};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::extract::LenientJson;
use crate::domain::service::Service;

/// List every to-do
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "All to-dos", body = Vec<TodoDto>),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_todos(
    Extension(svc): Extension<Arc<Service>>,
    instance: ProblemInstance,
) -> Result<Json<Vec<TodoDto>>, ProblemResponse> {
    info!("Listing to-dos");

    match svc.list_todos().await {
        Ok(todos) => Ok(Json(todos.into_iter().map(TodoDto::from).collect())),
        Err(e) => {
            error!("Failed to list to-dos: {}", e);
            Err(map_domain_error(&e, &instance, "Failed to retrieve to-dos."))
        }
    }
}

/// Get a specific to-do by id
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "To-do id")),
    responses(
        (status = 200, description = "The to-do", body = TodoDto),
        (status = 404, description = "No to-do with this id", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_todo(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    instance: ProblemInstance,
) -> Result<Json<TodoDto>, ProblemResponse> {
    info!("Getting to-do with id: {}", id);

    match svc.get_todo(&id).await {
        Ok(todo) => Ok(Json(TodoDto::from(todo))),
        Err(e) => {
            error!("Failed to get to-do {}: {}", id, e);
            Err(map_domain_error(&e, &instance, "Failed to retrieve to-do."))
        }
    }
}

/// Create a new to-do
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodoReq,
    responses(
        (status = 201, description = "Created", body = TodoDto),
        (status = 400, description = "Missing or blank title", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_todo(
    instance: ProblemInstance,
    Extension(svc): Extension<Arc<Service>>,
    LenientJson(req): LenientJson<CreateTodoReq>,
) -> Result<(StatusCode, Json<TodoDto>), ProblemResponse> {
    info!("Creating to-do: {:?}", req);

    match svc.create_todo(req.into()).await {
        Ok(todo) => Ok((StatusCode::CREATED, Json(TodoDto::from(todo)))),
        Err(e) => {
            error!("Failed to create to-do: {}", e);
            Err(map_domain_error(&e, &instance, "Failed to add to-do."))
        }
    }
}

/// Partially update a to-do
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "To-do id")),
    request_body = UpdateTodoReq,
    responses(
        (status = 200, description = "Updated", body = TodoDto),
        (status = 400, description = "No fields to update or blank title", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No to-do with this id", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn update_todo(
    instance: ProblemInstance,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    LenientJson(req): LenientJson<UpdateTodoReq>,
) -> Result<Json<TodoDto>, ProblemResponse> {
    info!("Updating to-do {} with: {:?}", id, req);

    match svc.update_todo(&id, req.into()).await {
        Ok(todo) => Ok(Json(TodoDto::from(todo))),
        Err(e) => {
            error!("Failed to update to-do {}: {}", id, e);
            Err(map_domain_error(&e, &instance, "Failed to update to-do."))
        }
    }
}

/// Delete a to-do, returning it as it was
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "To-do id")),
    responses(
        (status = 200, description = "Deleted; body holds the prior record", body = TodoDto),
        (status = 404, description = "No to-do with this id", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_todo(
    instance: ProblemInstance,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<TodoDto>, ProblemResponse> {
    info!("Deleting to-do: {}", id);

    match svc.delete_todo(&id).await {
        Ok(todo) => Ok(Json(TodoDto::from(todo))),
        Err(e) => {
            error!("Failed to delete to-do {}: {}", id, e);
            Err(map_domain_error(&e, &instance, "Failed to delete to-do."))
        }
    }
}

/// List the to-dos assigned to a focus area
#[utoipa::path(
    get,
    path = "/focus-areas/{focus_area_id}/todos",
    tag = "focus-areas",
    params(("focus_area_id" = String, Path, description = "Focus area id")),
    responses(
        (status = 200, description = "To-dos referencing the focus area", body = Vec<TodoDto>),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_todos_by_focus_area(
    Extension(svc): Extension<Arc<Service>>,
    Path(focus_area_id): Path<String>,
    instance: ProblemInstance,
) -> Result<Json<Vec<TodoDto>>, ProblemResponse> {
    info!("Listing to-dos for focus area: {}", focus_area_id);

    match svc.list_todos_by_focus_area(&focus_area_id).await {
        Ok(todos) => Ok(Json(todos.into_iter().map(TodoDto::from).collect())),
        Err(e) => {
            error!("Failed to list to-dos for focus area {}: {}", focus_area_id, e);
            Err(map_domain_error(&e, &instance, "Failed to retrieve to-dos."))
        }
    }
}

/// Create a focus area with a palette color
#[utoipa::path(
    post,
    path = "/focus-areas",
    tag = "focus-areas",
    request_body = CreateFocusAreaReq,
    responses(
        (status = 201, description = "Created", body = FocusAreaDto),
        (status = 400, description = "Missing or blank name", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_focus_area(
    instance: ProblemInstance,
    Extension(svc): Extension<Arc<Service>>,
    LenientJson(req): LenientJson<CreateFocusAreaReq>,
) -> Result<(StatusCode, Json<FocusAreaDto>), ProblemResponse> {
    info!("Creating focus area: {:?}", req);

    match svc.create_focus_area(req.into()).await {
        Ok(area) => Ok((StatusCode::CREATED, Json(FocusAreaDto::from(area)))),
        Err(e) => {
            error!("Failed to create focus area: {}", e);
            Err(map_domain_error(&e, &instance, "Failed to add focus area."))
        }
    }
}

/// List every focus area
#[utoipa::path(
    get,
    path = "/focus-areas",
    tag = "focus-areas",
    responses(
        (status = 200, description = "All focus areas", body = Vec<FocusAreaDto>),
        (status = 500, description = "Store failure", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_focus_areas(
    Extension(svc): Extension<Arc<Service>>,
    instance: ProblemInstance,
) -> Result<Json<Vec<FocusAreaDto>>, ProblemResponse> {
    info!("Listing focus areas");

    match svc.list_focus_areas().await {
        Ok(areas) => Ok(Json(areas.into_iter().map(FocusAreaDto::from).collect())),
        Err(e) => {
            error!("Failed to list focus areas: {}", e);
            Err(map_domain_error(&e, &instance, "Failed to retrieve focus areas."))
        }
    }
}
