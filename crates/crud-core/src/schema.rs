//! Resource Schemas
//!
//! A schema lists the editable fields of one resource: name, input kind,
//! optional validator and the draft default. The generic list and form
//! views are driven entirely by it.

use serde_json::Value;

use crate::record::{FieldMap, FieldValue, Record};

/// Names the server owns; never editable
pub const RESERVED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// Input kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Markdown body, edited in a textarea with preview
    LongText,
    Integer,
    Boolean,
    /// List of absolute URLs, each entry validated
    LinkList,
    TagList,
}

impl FieldKind {
    pub fn default_value(self) -> FieldValue {
        match self {
            FieldKind::Text | FieldKind::LongText => FieldValue::Text(String::new()),
            FieldKind::Integer => FieldValue::Integer(0),
            FieldKind::Boolean => FieldValue::Bool(false),
            FieldKind::LinkList | FieldKind::TagList => FieldValue::List(Vec::new()),
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, FieldKind::LinkList | FieldKind::TagList)
    }
}

/// Client-side check applied on every change of a field (or list entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Absolute http(s) URL
    Url,
    NonEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub validator: Option<Validator>,
    pub default: FieldValue,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            validator: None,
            default: kind.default_value(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn long_text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::LongText)
    }

    pub fn integer(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn link_list(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::LinkList).validated(Validator::Url)
    }

    pub fn tag_list(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::TagList)
    }

    /// Single URL in a text input
    pub fn url(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::text(name, label).validated(Validator::Url)
    }

    pub fn validated(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_default(mut self, default: FieldValue) -> Self {
        self.default = default;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema has no fields")]
    Empty,
    #[error("`{0}` is managed by the server and cannot be a form field")]
    ReservedField(String),
    #[error("field `{0}` is declared twice")]
    DuplicateField(String),
    #[error("default for `{0}` does not match its kind")]
    DefaultKindMismatch(String),
    #[error("title field `{0}` is not declared")]
    UnknownTitleField(String),
}

/// Editable fields of one resource, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    title_field: String,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field shown as the row label in list views
    pub fn title_field(&self) -> &str {
        &self.title_field
    }

    /// Fresh draft for create mode
    pub fn default_draft(&self) -> FieldMap {
        let mut draft = FieldMap::new();
        for spec in &self.fields {
            draft.insert(spec.name.clone(), spec.default.clone());
        }
        draft
    }

    /// Editable mapping for an existing record; values of the wrong kind
    /// (or missing) fall back to the field default
    pub fn draft_from(&self, record: &Record) -> FieldMap {
        let mut draft = FieldMap::new();
        for spec in &self.fields {
            let value = match record.get(&spec.name) {
                Some(v) if v.same_kind(&spec.default) => v.clone(),
                _ => spec.default.clone(),
            };
            draft.insert(spec.name.clone(), value);
        }
        draft
    }

    /// Keep only declared fields, in schema order. Blank tags are dropped;
    /// blank links stay so the server sees what the inline error flagged.
    pub fn editable(&self, fields: &FieldMap) -> FieldMap {
        let mut out = FieldMap::new();
        for spec in &self.fields {
            let value = match fields.get(&spec.name) {
                Some(FieldValue::List(tags)) if spec.kind == FieldKind::TagList => FieldValue::List(
                    tags.iter()
                        .map(|tag| tag.trim())
                        .filter(|tag| !tag.is_empty())
                        .map(String::from)
                        .collect(),
                ),
                Some(value) => value.clone(),
                None => spec.default.clone(),
            };
            out.insert(spec.name.clone(), value);
        }
        out
    }

    /// Convert a raw JSON value into the field's kind
    pub fn coerce(&self, spec: &FieldSpec, raw: Option<&Value>) -> FieldValue {
        let raw = match raw {
            None | Some(Value::Null) => return spec.default.clone(),
            Some(v) => v,
        };
        match spec.kind {
            FieldKind::Text | FieldKind::LongText => match raw {
                Value::String(s) => FieldValue::Text(s.clone()),
                Value::Number(n) => FieldValue::Text(n.to_string()),
                Value::Bool(b) => FieldValue::Text(b.to_string()),
                _ => spec.default.clone(),
            },
            FieldKind::Integer => match raw {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                    .map(FieldValue::Integer)
                    .unwrap_or_else(|| spec.default.clone()),
                Value::String(s) => FieldValue::Integer(parse_integer(s)),
                Value::Bool(b) => FieldValue::Integer(i64::from(*b)),
                _ => spec.default.clone(),
            },
            FieldKind::Boolean => match raw {
                Value::Bool(b) => FieldValue::Bool(*b),
                Value::Number(n) => FieldValue::Bool(n.as_f64().is_some_and(|f| f != 0.0)),
                Value::String(s) => FieldValue::Bool(matches!(s.trim(), "true" | "1")),
                _ => spec.default.clone(),
            },
            FieldKind::LinkList | FieldKind::TagList => match raw {
                Value::Array(items) => FieldValue::List(
                    items
                        .iter()
                        .filter_map(|item| match item {
                            Value::Null => None,
                            Value::String(s) => Some(s.clone()),
                            other => Some(other.to_string()),
                        })
                        .collect(),
                ),
                Value::String(s) => FieldValue::List(split_list(s)),
                _ => spec.default.clone(),
            },
        }
    }
}

/// Integer input parsing: optional sign then leading digits, 0 when there
/// are none or the value overflows
pub fn parse_integer(input: &str) -> i64 {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    format!("{}{}", sign, &digits[..end]).parse().unwrap_or(0)
}

/// Lists stored as text: a JSON array, or comma separated
fn split_list(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
            return items;
        }
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
    title_field: Option<String>,
}

impl SchemaBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn title(mut self, name: impl Into<String>) -> Self {
        self.title_field = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let first = self.fields.first().ok_or(SchemaError::Empty)?.name.clone();

        for (i, spec) in self.fields.iter().enumerate() {
            if RESERVED_FIELDS.contains(&spec.name.as_str()) {
                return Err(SchemaError::ReservedField(spec.name.clone()));
            }
            if self.fields[..i].iter().any(|f| f.name == spec.name) {
                return Err(SchemaError::DuplicateField(spec.name.clone()));
            }
            if !spec.default.same_kind(&spec.kind.default_value()) {
                return Err(SchemaError::DefaultKindMismatch(spec.name.clone()));
            }
        }

        let title_field = self.title_field.unwrap_or(first);
        if !self.fields.iter().any(|f| f.name == title_field) {
            return Err(SchemaError::UnknownTitleField(title_field));
        }

        Ok(Schema {
            fields: self.fields,
            title_field,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reserved_fields_rejected() {
        for name in RESERVED_FIELDS {
            let err = Schema::builder().field(FieldSpec::text(*name, "x")).build().unwrap_err();
            assert_eq!(err, SchemaError::ReservedField(name.to_string()));
        }
    }

    #[test]
    fn test_builder_checks() {
        assert_eq!(Schema::builder().build().unwrap_err(), SchemaError::Empty);

        let err = Schema::builder()
            .field(FieldSpec::text("title", "Title"))
            .field(FieldSpec::integer("title", "Again"))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("title".into()));

        let err = Schema::builder()
            .field(FieldSpec::integer("year", "Year").with_default(FieldValue::Text("x".into())))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DefaultKindMismatch("year".into()));

        let err = Schema::builder()
            .field(FieldSpec::text("title", "Title"))
            .title("name")
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::UnknownTitleField("name".into()));
    }

    #[test]
    fn test_default_draft() {
        let schema = Schema::builder()
            .field(FieldSpec::text("title", "Title"))
            .field(FieldSpec::integer("year", "Year"))
            .field(FieldSpec::boolean("done", "Done"))
            .field(FieldSpec::link_list("links", "Links"))
            .build()
            .unwrap();

        let draft = schema.default_draft();
        assert_eq!(draft.names().collect::<Vec<_>>(), vec!["title", "year", "done", "links"]);
        assert_eq!(draft.get("year"), Some(&FieldValue::Integer(0)));
        assert_eq!(draft.get("done"), Some(&FieldValue::Bool(false)));
        assert_eq!(schema.title_field(), "title");
    }

    #[test]
    fn test_coerce_lists_from_text() {
        let schema = Schema::builder().field(FieldSpec::tag_list("tags", "Tags")).build().unwrap();
        let spec = &schema.fields()[0];

        assert_eq!(
            schema.coerce(spec, Some(&json!("rust, web ,"))),
            FieldValue::List(vec!["rust".into(), "web".into()])
        );
        assert_eq!(
            schema.coerce(spec, Some(&json!(r#"["a","b"]"#))),
            FieldValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(schema.coerce(spec, Some(&json!(["x", null]))), FieldValue::List(vec!["x".into()]));
    }

    #[test]
    fn test_editable_drops_blank_tags() {
        let schema = Schema::builder()
            .field(FieldSpec::tag_list("tags", "Tags"))
            .field(FieldSpec::link_list("links", "Links"))
            .build()
            .unwrap();
        let fields = FieldMap::from([
            ("tags", FieldValue::List(vec!["rust".into(), "".into(), "  ".into(), " web ".into()])),
            ("links", FieldValue::List(vec!["".into()])),
            ("id", FieldValue::Integer(9)),
        ]);

        let body = schema.editable(&fields);
        assert_eq!(body.names().collect::<Vec<_>>(), vec!["tags", "links"]);
        assert_eq!(body.get("tags"), Some(&FieldValue::List(vec!["rust".into(), "web".into()])));
        assert_eq!(body.get("links"), Some(&FieldValue::List(vec!["".into()])));
    }

    #[test]
    fn test_coerce_integer_and_bool() {
        let schema = Schema::builder()
            .field(FieldSpec::integer("year", "Year"))
            .field(FieldSpec::boolean("active", "Active"))
            .build()
            .unwrap();
        let year = &schema.fields()[0];
        let active = &schema.fields()[1];

        assert_eq!(schema.coerce(year, Some(&json!(1999.7))), FieldValue::Integer(1999));
        assert_eq!(schema.coerce(year, Some(&json!("abc"))), FieldValue::Integer(0));
        assert_eq!(schema.coerce(active, Some(&json!(1))), FieldValue::Bool(true));
        assert_eq!(schema.coerce(active, Some(&json!("false"))), FieldValue::Bool(false));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("42"), 42);
        assert_eq!(parse_integer(" -7 "), -7);
        assert_eq!(parse_integer("12abc"), 12);
        assert_eq!(parse_integer("abc"), 0);
        assert_eq!(parse_integer(""), 0);
        assert_eq!(parse_integer("-"), 0);
        assert_eq!(parse_integer("99999999999999999999999"), 0);
    }
}
