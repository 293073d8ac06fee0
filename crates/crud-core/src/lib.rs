//! Folio CRUD Core
//!
//! Generic list/form state shared by every admin resource.
//!
//! Layout:
//! - record / schema: entity representation and per-resource field schemas
//! - error / validate: tagged errors and client-side field validation
//! - api / http: the REST collaborator seam and its reqwest implementation
//! - list / form: view state machines and their async drivers
//! - resources / routes: the built-in resource registry and hash routes

pub mod api;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod record;
pub mod resources;
pub mod routes;
pub mod schema;
pub mod state;
pub mod validate;


pub use api::ResourceApi;
pub use error::AdminError;
pub use form::{FormMode, FormState};
pub use http::{ClientConfig, ConfigError, HttpClient};
pub use list::{ListState, ListView};
pub use record::{Entity, EntityId, FieldMap, FieldValue, Record};
pub use resources::Resource;
pub use routes::{AdminRoute, EditTarget};
pub use schema::{FieldKind, FieldSpec, Schema, SchemaError, Validator};
pub use state::{LocalState, StateCell};
