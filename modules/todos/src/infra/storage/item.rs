//! Mapping between contract models and DynamoDB items.
//!
//! Attribute names are camelCase, matching the JSON representation. Timestamps
//! are stored as RFC 3339 strings.

use std::collections::HashMap;

use anyhow::{anyhow, Context};
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};

use crate::contract::model::{FocusArea, Todo, TodoPatch};
use crate::timestamp;

pub type Item = HashMap<String, AttributeValue>;

pub mod attr {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const NOTES: &str = "notes";
    pub const FOCUS_AREA_ID: &str = "focusAreaId";
    pub const COMPLETED: &str = "completed";
    pub const ARCHIVED: &str = "archived";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const NAME: &str = "name";
    pub const COLOR: &str = "color";

    // Names written by earlier deployments; read-only.
    pub const LEGACY_NOTES: &str = "content";
    pub const LEGACY_FOCUS_AREA: &str = "focusArea";
}

pub fn todo_to_item(todo: &Todo) -> Item {
    let mut item = HashMap::new();
    item.insert(attr::ID.to_string(), AttributeValue::S(todo.id.clone()));
    item.insert(attr::TITLE.to_string(), AttributeValue::S(todo.title.clone()));
    item.insert(attr::NOTES.to_string(), AttributeValue::S(todo.notes.clone()));
    item.insert(
        attr::FOCUS_AREA_ID.to_string(),
        optional_string(todo.focus_area_id.as_deref()),
    );
    item.insert(attr::COMPLETED.to_string(), AttributeValue::Bool(todo.completed));
    item.insert(attr::ARCHIVED.to_string(), AttributeValue::Bool(todo.archived));
    item.insert(
        attr::CREATED_AT.to_string(),
        AttributeValue::S(timestamp::format(&todo.created_at)),
    );
    item.insert(
        attr::UPDATED_AT.to_string(),
        AttributeValue::S(timestamp::format(&todo.updated_at)),
    );
    item
}

pub fn todo_from_item(item: &Item) -> anyhow::Result<Todo> {
    let id = required_string(item, attr::ID)?;
    read_todo(item, id.clone()).with_context(|| format!("malformed to-do item {id}"))
}

fn read_todo(item: &Item, id: String) -> anyhow::Result<Todo> {
    let notes = optional_attr_string(item, attr::NOTES)
        .or_else(|| optional_attr_string(item, attr::LEGACY_NOTES))
        .unwrap_or_default();
    let focus_area_id = optional_attr_string(item, attr::FOCUS_AREA_ID)
        .or_else(|| optional_attr_string(item, attr::LEGACY_FOCUS_AREA))
        .filter(|v| !v.is_empty());

    Ok(Todo {
        id,
        title: required_string(item, attr::TITLE)?,
        notes,
        focus_area_id,
        completed: bool_or_false(item, attr::COMPLETED)?,
        archived: bool_or_false(item, attr::ARCHIVED)?,
        created_at: required_timestamp(item, attr::CREATED_AT)?,
        updated_at: required_timestamp(item, attr::UPDATED_AT)?,
    })
}

pub fn focus_area_to_item(area: &FocusArea) -> Item {
    let mut item = HashMap::new();
    item.insert(attr::ID.to_string(), AttributeValue::S(area.id.clone()));
    item.insert(attr::NAME.to_string(), AttributeValue::S(area.name.clone()));
    item.insert(attr::COLOR.to_string(), AttributeValue::S(area.color.clone()));
    item
}

pub fn focus_area_from_item(item: &Item) -> anyhow::Result<FocusArea> {
    Ok(FocusArea {
        id: required_string(item, attr::ID)?,
        name: required_string(item, attr::NAME)?,
        color: optional_attr_string(item, attr::COLOR).unwrap_or_default(),
    })
}

/// `SET` expression for a partial update, with name/value placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Guard that keeps `UpdateItem` from creating a missing item.
pub const ITEM_EXISTS_CONDITION: &str = "attribute_exists(#id)";

/// Build the update for every present field of `patch`. Returns `None` when
/// there is nothing to set. The `#id` name used by [`ITEM_EXISTS_CONDITION`]
/// is always registered.
pub fn update_expression(
    patch: &TodoPatch,
    touched_at: Option<DateTime<Utc>>,
) -> Option<UpdateExpression> {
    let mut assignments = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    let mut set = |name: &str, value: AttributeValue| {
        assignments.push(format!("#{name} = :{name}"));
        names.insert(format!("#{name}"), name.to_string());
        values.insert(format!(":{name}"), value);
    };

    if let Some(title) = &patch.title {
        set(attr::TITLE, AttributeValue::S(title.clone()));
    }
    if let Some(notes) = &patch.notes {
        set(attr::NOTES, AttributeValue::S(notes.clone()));
    }
    let mut removals = Vec::new();
    if let Some(focus_area_id) = &patch.focus_area_id {
        set(attr::FOCUS_AREA_ID, optional_string(focus_area_id.as_deref()));
        removals.push(format!("#{}", attr::LEGACY_FOCUS_AREA));
    }
    if let Some(completed) = patch.completed {
        set(attr::COMPLETED, AttributeValue::Bool(completed));
    }
    if let Some(archived) = patch.archived {
        set(attr::ARCHIVED, AttributeValue::Bool(archived));
    }
    if let Some(ts) = touched_at {
        set(attr::UPDATED_AT, AttributeValue::S(timestamp::format(&ts)));
    }

    if assignments.is_empty() {
        return None;
    }
    names.insert("#id".to_string(), attr::ID.to_string());

    let mut expression = format!("SET {}", assignments.join(", "));
    if !removals.is_empty() {
        // A cleared focusAreaId must not fall back to the legacy attribute on read.
        for name in &removals {
            names.insert(name.clone(), name.trim_start_matches('#').to_string());
        }
        expression.push_str(&format!(" REMOVE {}", removals.join(", ")));
    }

    Some(UpdateExpression {
        expression,
        names,
        values,
    })
}

/// Server-side scan filter selecting the to-dos of one focus area. Matches
/// the read rule: the legacy attribute only counts when `focusAreaId` is not
/// a string.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFilter {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

pub fn focus_area_filter(focus_area_id: &str) -> ScanFilter {
    let names = HashMap::from([
        ("#focusAreaId".to_string(), attr::FOCUS_AREA_ID.to_string()),
        ("#legacyFocusArea".to_string(), attr::LEGACY_FOCUS_AREA.to_string()),
    ]);
    let values = HashMap::from([
        (
            ":focusAreaId".to_string(),
            AttributeValue::S(focus_area_id.to_string()),
        ),
        (":string".to_string(), AttributeValue::S("S".to_string())),
    ]);

    ScanFilter {
        expression: "#focusAreaId = :focusAreaId OR (NOT attribute_type(#focusAreaId, :string) \
                     AND #legacyFocusArea = :focusAreaId)"
            .to_string(),
        names,
        values,
    }
}

fn optional_string(value: Option<&str>) -> AttributeValue {
    match value {
        Some(v) => AttributeValue::S(v.to_string()),
        None => AttributeValue::Null(true),
    }
}

fn required_string(item: &Item, name: &str) -> anyhow::Result<String> {
    match item.get(name) {
        Some(AttributeValue::S(v)) => Ok(v.clone()),
        Some(other) => Err(anyhow!("attribute `{name}` is not a string: {other:?}")),
        None => Err(anyhow!("attribute `{name}` is missing")),
    }
}

/// Absent, `NULL` and non-string attributes all read as `None`.
fn optional_attr_string(item: &Item, name: &str) -> Option<String> {
    match item.get(name) {
        Some(AttributeValue::S(v)) => Some(v.clone()),
        _ => None,
    }
}

fn bool_or_false(item: &Item, name: &str) -> anyhow::Result<bool> {
    match item.get(name) {
        Some(AttributeValue::Bool(v)) => Ok(*v),
        None | Some(AttributeValue::Null(_)) => Ok(false),
        Some(other) => Err(anyhow!("attribute `{name}` is not a boolean: {other:?}")),
    }
}

fn required_timestamp(item: &Item, name: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = required_string(item, name)?;
    timestamp::parse(&raw).with_context(|| format!("attribute `{name}` is not RFC 3339: {raw}"))
}
