//! DynamoDB adapters for the repository ports.
//!
//! One table per entity, keyed by the string attribute `id`.

use anyhow::Context;
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    error::SdkError,
    operation::update_item::UpdateItemError,
    types::{AttributeValue, ReturnValue},
    Client,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::contract::model::{FocusArea, Todo, TodoPatch};
use crate::domain::repo::{FocusAreasRepository, TodosRepository};
use crate::infra::storage::item::{
    self, attr, focus_area_filter, focus_area_from_item, focus_area_to_item, todo_from_item,
    todo_to_item, Item, ITEM_EXISTS_CONDITION,
};

pub struct DynamoTodosRepository {
    client: Client,
    table: String,
}

impl DynamoTodosRepository {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl TodosRepository for DynamoTodosRepository {
    async fn insert(&self, todo: Todo) -> anyhow::Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(todo_to_item(&todo)))
            .send()
            .await
            .with_context(|| format!("put_item on `{}` failed", self.table))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Todo>> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(attr::ID, Self::key(id))
            .consistent_read(true)
            .send()
            .await
            .with_context(|| format!("get_item on `{}` failed", self.table))?;

        out.item.as_ref().map(todo_from_item).transpose()
    }

    async fn scan(&self, focus_area_id: Option<&str>) -> anyhow::Result<Vec<Todo>> {
        let items = scan_all(&self.client, &self.table, focus_area_id).await?;
        debug!("Scanned {} items from `{}`", items.len(), self.table);
        items.iter().map(todo_from_item).collect()
    }

    async fn update(
        &self,
        id: &str,
        patch: TodoPatch,
        touched_at: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Option<Todo>> {
        let Some(update) = item::update_expression(&patch, touched_at) else {
            // Nothing to write; still report whether the item exists.
            return self.find_by_id(id).await;
        };

        let result = self
            .client
            .update_item()
            .table_name(&self.table)
            .key(attr::ID, Self::key(id))
            .update_expression(update.expression)
            .set_expression_attribute_names(Some(update.names))
            .set_expression_attribute_values(Some(update.values))
            .condition_expression(ITEM_EXISTS_CONDITION)
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(out) => out.attributes.as_ref().map(todo_from_item).transpose(),
            Err(err) if is_condition_failed(&err) => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("update_item on `{}` failed", self.table))
            }
        }
    }

    async fn delete(&self, id: &str) -> anyhow::Result<Option<Todo>> {
        let out = self
            .client
            .delete_item()
            .table_name(&self.table)
            .key(attr::ID, Self::key(id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .with_context(|| format!("delete_item on `{}` failed", self.table))?;

        out.attributes.as_ref().map(todo_from_item).transpose()
    }
}

fn is_condition_failed<R>(err: &SdkError<UpdateItemError, R>) -> bool {
    err.as_service_error()
        .is_some_and(UpdateItemError::is_conditional_check_failed_exception)
}

/// Scan the whole table, following `LastEvaluatedKey`, optionally filtered on
/// the focus area server-side.
async fn scan_all(
    client: &Client,
    table: &str,
    focus_area_id: Option<&str>,
) -> anyhow::Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut start_key: Option<Item> = None;

    loop {
        let mut request = client
            .scan()
            .table_name(table)
            .set_exclusive_start_key(start_key.take());
        if let Some(focus_area_id) = focus_area_id {
            let filter = focus_area_filter(focus_area_id);
            request = request
                .filter_expression(filter.expression)
                .set_expression_attribute_names(Some(filter.names))
                .set_expression_attribute_values(Some(filter.values));
        }

        let out = request
            .send()
            .await
            .with_context(|| format!("scan on `{table}` failed"))?;

        items.extend(out.items.unwrap_or_default());

        match out.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(items)
}

pub struct DynamoFocusAreasRepository {
    client: Client,
    table: String,
}

impl DynamoFocusAreasRepository {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl FocusAreasRepository for DynamoFocusAreasRepository {
    async fn insert(&self, area: FocusArea) -> anyhow::Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(focus_area_to_item(&area)))
            .send()
            .await
            .with_context(|| format!("put_item on `{}` failed", self.table))?;
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<FocusArea>> {
        let items = scan_all(&self.client, &self.table, None).await?;
        items.iter().map(focus_area_from_item).collect()
    }
}
