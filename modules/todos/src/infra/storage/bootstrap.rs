//! Startup table provisioning.
//!
//! Every required table is created on demand with a single string HASH key
//! `id`. Failures are logged and never abort startup.

use anyhow::Context;
use aws_sdk_dynamodb::{
    types::{
        AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput,
        ScalarAttributeType,
    },
    Client,
};
use tracing::{error, info};

use crate::config::TodosConfig;
use crate::infra::storage::item::attr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub read_capacity: i64,
    pub write_capacity: i64,
}

impl TableSpec {
    /// The todos and focus-area tables described by `cfg`.
    pub fn required(cfg: &TodosConfig) -> Vec<TableSpec> {
        [&cfg.todos_table, &cfg.focus_areas_table]
            .into_iter()
            .map(|name| TableSpec {
                name: name.clone(),
                read_capacity: cfg.read_capacity,
                write_capacity: cfg.write_capacity,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Exists,
    Created,
    Failed,
}

/// Make sure every table in `specs` exists. Returns the outcome per table,
/// in `specs` order.
pub async fn ensure_tables(client: &Client, specs: &[TableSpec]) -> Vec<(String, TableStatus)> {
    let existing = match list_table_names(client).await {
        Ok(names) => names,
        Err(e) => {
            error!("Unable to list tables: {:#}", e);
            return specs
                .iter()
                .map(|spec| (spec.name.clone(), TableStatus::Failed))
                .collect();
        }
    };

    let mut outcomes = Vec::with_capacity(specs.len());
    for spec in specs {
        let status = if existing.contains(&spec.name) {
            info!("Table \"{}\" already exists.", spec.name);
            TableStatus::Exists
        } else {
            match create_table(client, spec).await {
                Ok(()) => {
                    info!("Table \"{}\" created successfully.", spec.name);
                    TableStatus::Created
                }
                Err(e) => {
                    error!("Unable to create table \"{}\": {:#}", spec.name, e);
                    TableStatus::Failed
                }
            }
        };
        outcomes.push((spec.name.clone(), status));
    }
    outcomes
}

async fn list_table_names(client: &Client) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    let mut start: Option<String> = None;

    loop {
        let out = client
            .list_tables()
            .set_exclusive_start_table_name(start.take())
            .send()
            .await
            .context("list_tables failed")?;

        names.extend(out.table_names.unwrap_or_default());

        match out.last_evaluated_table_name {
            Some(last) => start = Some(last),
            None => break,
        }
    }

    Ok(names)
}

async fn create_table(client: &Client, spec: &TableSpec) -> anyhow::Result<()> {
    let key = KeySchemaElement::builder()
        .attribute_name(attr::ID)
        .key_type(KeyType::Hash)
        .build()?;
    let definition = AttributeDefinition::builder()
        .attribute_name(attr::ID)
        .attribute_type(ScalarAttributeType::S)
        .build()?;
    let throughput = ProvisionedThroughput::builder()
        .read_capacity_units(spec.read_capacity)
        .write_capacity_units(spec.write_capacity)
        .build()?;

    client
        .create_table()
        .table_name(&spec.name)
        .key_schema(key)
        .attribute_definitions(definition)
        .provisioned_throughput(throughput)
        .send()
        .await
        .with_context(|| format!("create_table `{}` failed", spec.name))?;
    Ok(())
}
