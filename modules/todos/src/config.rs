use serde::{Deserialize, Serialize};

/// Configuration for the todos module (`modules.todos` in the app config)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TodosConfig {
    #[serde(default = "default_todos_table")]
    pub todos_table: String,
    #[serde(default = "default_focus_areas_table")]
    pub focus_areas_table: String,
    /// Provisioned throughput used when a table has to be created.
    #[serde(default = "default_capacity")]
    pub read_capacity: i64,
    #[serde(default = "default_capacity")]
    pub write_capacity: i64,
    /// Colors assigned to new focus areas; an empty list falls back to the default palette.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Refresh `updatedAt` on every successful update.
    #[serde(default)]
    pub touch_updated_at_on_update: bool,
}

impl Default for TodosConfig {
    fn default() -> Self {
        Self {
            todos_table: default_todos_table(),
            focus_areas_table: default_focus_areas_table(),
            read_capacity: default_capacity(),
            write_capacity: default_capacity(),
            palette: default_palette(),
            touch_updated_at_on_update: false,
        }
    }
}

fn default_todos_table() -> String {
    "todos".to_string()
}

fn default_focus_areas_table() -> String {
    "focusAreas".to_string()
}

fn default_capacity() -> i64 {
    5
}

pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

pub fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let cfg: TodosConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg, TodosConfig::default());
        assert_eq!(cfg.palette.len(), 8);
        assert!(!cfg.touch_updated_at_on_update);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<TodosConfig, _> =
            serde_json::from_value(serde_json::json!({ "todo_table": "x" }));
        assert!(res.is_err());
    }
}
