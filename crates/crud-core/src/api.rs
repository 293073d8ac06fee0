//! REST Seam
//!
//! The HTTP API is an external collaborator. Views talk to it through
//! `ResourceApi`, so tests can substitute a fake client.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::error::AdminError;
use crate::record::{EntityId, FieldMap, Record};
use crate::resources::Resource;

/// Raw collection/item operations on a REST resource
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait ResourceApi {
    /// `GET <path>`
    async fn list(&self, path: &str) -> Result<Vec<Value>, AdminError>;

    /// `POST <path>`
    async fn create(&self, path: &str, fields: &FieldMap) -> Result<Value, AdminError>;

    /// `PUT <path>/{id}`
    async fn update(&self, path: &str, id: EntityId, fields: &FieldMap) -> Result<Value, AdminError>;

    /// `DELETE <path>/{id}`
    async fn delete(&self, path: &str, id: EntityId) -> Result<(), AdminError>;
}

// ========================
// Typed helpers
// ========================

/// Fetch and decode the whole collection, keeping server order
pub async fn fetch_records<A>(api: &A, resource: &Resource) -> Result<Vec<Record>, AdminError>
where
    A: ResourceApi + ?Sized,
{
    let rows = api.list(&resource.path).await?;
    debug!("[{}] fetched {} rows", resource.slug, rows.len());
    rows.into_iter()
        .map(|row| Record::from_json(&resource.schema, row))
        .collect()
}

pub async fn create_record<A>(api: &A, resource: &Resource, fields: &FieldMap) -> Result<Record, AdminError>
where
    A: ResourceApi + ?Sized,
{
    let body = resource.schema.editable(fields);
    let created = api.create(&resource.path, &body).await?;
    Record::from_json(&resource.schema, created)
}

pub async fn update_record<A>(
    api: &A,
    resource: &Resource,
    id: EntityId,
    fields: &FieldMap,
) -> Result<Record, AdminError>
where
    A: ResourceApi + ?Sized,
{
    let body = resource.schema.editable(fields);
    let updated = api.update(&resource.path, id, &body).await?;
    Record::from_json(&resource.schema, updated)
}

pub async fn delete_record<A>(api: &A, resource: &Resource, id: EntityId) -> Result<(), AdminError>
where
    A: ResourceApi + ?Sized,
{
    api.delete(&resource.path, id).await
}
