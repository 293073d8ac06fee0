//! Resource Form State
//!
//! Controlled field mapping for one entity in create or edit mode. The
//! mode is fixed at construction; switching requires a new form.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use log::{debug, warn};

use crate::api::{self, ResourceApi};
use crate::error::AdminError;
use crate::record::{EntityId, FieldMap, FieldValue, Record};
use crate::resources::Resource;
use crate::schema::{parse_integer, FieldKind, FieldSpec, Schema};
use crate::state::StateCell;
use crate::validate;

pub const SAVE_FAILED: &str = "Failed to save";

/// Boxed persist future, as stored by UI components
pub type PersistFuture = Pin<Box<dyn Future<Output = Result<Record, AdminError>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

impl FormMode {
    /// Edit when the initial entity has an id, create otherwise
    pub fn for_initial(initial: Option<&Record>) -> Self {
        match initial.and_then(|r| r.id) {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }
}

/// Where an inline validation message belongs
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldKey {
    pub field: String,
    /// Entry index for list fields
    pub index: Option<usize>,
}

impl FieldKey {
    pub fn field(name: &str) -> Self {
        Self { field: name.to_string(), index: None }
    }

    pub fn entry(name: &str, index: usize) -> Self {
        Self { field: name.to_string(), index: Some(index) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: Schema,
    mode: FormMode,
    fields: FieldMap,
    error: Option<String>,
    field_errors: BTreeMap<FieldKey, String>,
    submitting: bool,
    last_saved: Option<Record>,
}

impl FormState {
    /// Edit mode for an entity with an id, create mode otherwise. A draft
    /// without id pre-fills the form but resets to the schema defaults.
    pub fn new(schema: &Schema, initial: Option<&Record>) -> Self {
        let fields = match initial {
            Some(record) => schema.draft_from(record),
            None => schema.default_draft(),
        };
        Self {
            schema: schema.clone(),
            mode: FormMode::for_initial(initial),
            fields,
            error: None,
            field_errors: BTreeMap::new(),
            submitting: false,
            last_saved: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_create(&self) -> bool {
        self.mode == FormMode::Create
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field_error(&self, key: &FieldKey) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }

    pub fn field_errors(&self) -> &BTreeMap<FieldKey, String> {
        &self.field_errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Entity returned by the last successful submit
    pub fn last_saved(&self) -> Option<&Record> {
        self.last_saved.as_ref()
    }

    // ========================
    // Field mutation
    // ========================

    /// Text or numeric input changed. Numbers that fail to parse become 0.
    pub fn set_input(&mut self, name: &str, raw: &str) {
        let Some(spec) = self.schema.field(name).cloned() else {
            warn!("set_input on unknown field `{}`", name);
            return;
        };
        let value = match spec.kind {
            FieldKind::Text | FieldKind::LongText => FieldValue::Text(raw.to_string()),
            FieldKind::Integer => FieldValue::Integer(parse_integer(raw)),
            kind => {
                warn!("set_input on {:?} field `{}`", kind, name);
                return;
            }
        };
        if spec.kind != FieldKind::Integer {
            self.validate(&spec, FieldKey::field(name), raw);
        }
        self.fields.insert(name, value);
    }

    /// Checkbox toggled; takes the checked state, not the input's value
    pub fn set_checked(&mut self, name: &str, checked: bool) {
        match self.schema.field(name).map(|s| s.kind) {
            Some(FieldKind::Boolean) => {
                self.fields.insert(name, FieldValue::Bool(checked));
            }
            _ => warn!("set_checked on non-boolean field `{}`", name),
        }
    }

    /// One entry of a link/tag list changed
    pub fn set_list_entry(&mut self, name: &str, index: usize, raw: &str) {
        let Some(spec) = self.list_spec(name) else { return };
        let Some(FieldValue::List(items)) = self.fields.get_mut(name) else { return };
        let Some(slot) = items.get_mut(index) else {
            warn!("entry {} out of range for `{}`", index, name);
            return;
        };
        *slot = raw.to_string();
        self.validate(&spec, FieldKey::entry(name, index), raw);
    }

    /// Append an empty entry; it is validated once edited
    pub fn push_list_entry(&mut self, name: &str) {
        if self.list_spec(name).is_none() {
            return;
        }
        if let Some(FieldValue::List(items)) = self.fields.get_mut(name) {
            items.push(String::new());
        }
    }

    pub fn remove_list_entry(&mut self, name: &str, index: usize) {
        if self.list_spec(name).is_none() {
            return;
        }
        let Some(FieldValue::List(items)) = self.fields.get_mut(name) else { return };
        if index >= items.len() {
            return;
        }
        items.remove(index);

        // Entry errors follow their entries
        let moved: Vec<(FieldKey, String)> = self
            .field_errors
            .iter()
            .filter(|(k, _)| k.field == name && k.index.is_some_and(|i| i >= index))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (key, message) in moved {
            self.field_errors.remove(&key);
            if let Some(i) = key.index.filter(|i| *i > index) {
                self.field_errors.insert(FieldKey::entry(name, i - 1), message);
            }
        }
    }

    fn list_spec(&self, name: &str) -> Option<FieldSpec> {
        match self.schema.field(name) {
            Some(spec) if spec.kind.is_list() => Some(spec.clone()),
            _ => {
                warn!("list operation on non-list field `{}`", name);
                None
            }
        }
    }

    fn validate(&mut self, spec: &FieldSpec, key: FieldKey, raw: &str) {
        let Some(validator) = spec.validator else { return };
        match validate::check(validator, raw) {
            Ok(()) => {
                self.field_errors.remove(&key);
            }
            Err(message) => {
                self.field_errors.insert(key, message.to_string());
            }
        }
    }

    // ========================
    // Submit
    // ========================

    /// Clear the previous error and hand out the payload. Inline
    /// validation messages do not stop the submit; the server decides.
    pub fn begin_submit(&mut self) -> FieldMap {
        self.error = None;
        self.submitting = true;
        self.schema.editable(&self.fields)
    }

    pub fn finish_submit(&mut self, outcome: Result<Record, AdminError>) {
        self.submitting = false;
        match outcome {
            Ok(saved) => {
                if self.is_create() {
                    self.fields = self.schema.default_draft();
                    self.field_errors.clear();
                }
                self.last_saved = Some(saved);
            }
            Err(err) => {
                if let AdminError::Validation { field, message } = &err {
                    self.field_errors.insert(FieldKey::field(field), message.clone());
                }
                self.error = Some(err.user_message(SAVE_FAILED));
            }
        }
    }
}

// ========================
// Drivers
// ========================

/// Run one submit through a caller-supplied persist function
pub async fn submit<C, F, Fut>(state: &C, persist: F)
where
    C: StateCell<FormState>,
    F: FnOnce(FieldMap) -> Fut,
    Fut: Future<Output = Result<Record, AdminError>>,
{
    let Some(payload) = state.with_mut(FormState::begin_submit) else {
        return;
    };

    let outcome = persist(payload).await;
    if let Err(err) = &outcome {
        warn!("submit failed: {}", err);
    }

    if state.with_mut(|s| s.finish_submit(outcome)).is_none() {
        debug!("form unmounted before submit settled");
    }
}

/// Standard persist function: POST in create mode, PUT in edit mode
pub async fn persist<A>(api: &A, resource: &Resource, mode: FormMode, fields: FieldMap) -> Result<Record, AdminError>
where
    A: ResourceApi + ?Sized,
{
    match mode {
        FormMode::Create => api::create_record(api, resource, &fields).await,
        FormMode::Edit(id) => api::update_record(api, resource, id, &fields).await,
    }
}
