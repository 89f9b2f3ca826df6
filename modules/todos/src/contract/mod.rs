pub mod client;
pub mod error;
pub mod model;

pub use model::{FocusArea, NewFocusArea, NewTodo, Todo, TodoPatch};
