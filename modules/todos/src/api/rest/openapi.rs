use api_ingress::Problem;
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

/// OpenAPI document for the to-do and focus-area routes.
#[derive(OpenApi)]
#[openapi(
    info(title = "Todo service", description = "To-dos grouped by colored focus areas"),
    paths(
        handlers::list_todos,
        handlers::create_todo,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo,
        handlers::list_focus_areas,
        handlers::create_focus_area,
        handlers::list_todos_by_focus_area,
    ),
    components(schemas(
        dto::TodoDto,
        dto::CreateTodoReq,
        dto::UpdateTodoReq,
        dto::FocusAreaDto,
        dto::CreateFocusAreaReq,
        Problem,
    )),
    tags(
        (name = "todos", description = "To-do items"),
        (name = "focus-areas", description = "Focus areas and their to-dos"),
    )
)]
pub struct TodosApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = TodosApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/todos",
            "/todos/{id}",
            "/focus-areas",
            "/focus-areas/{focus_area_id}/todos",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
        let todo_item = &doc.paths.paths["/todos/{id}"];
        assert!(todo_item.get.is_some() && todo_item.put.is_some() && todo_item.delete.is_some());
    }
}
