pub mod bootstrap;
pub mod client;
pub mod dynamo_repo;
pub mod item;
pub mod memory_repo;

pub use dynamo_repo::{DynamoFocusAreasRepository, DynamoTodosRepository};
pub use memory_repo::{InMemoryFocusAreasRepository, InMemoryTodosRepository};
