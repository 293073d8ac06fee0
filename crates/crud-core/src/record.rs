//! Records
//!
//! Generic entity representation. Every admin resource decodes its JSON
//! into a `Record` whose fields follow the resource schema.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::AdminError;
use crate::schema::Schema;

/// Server-assigned identifier
pub type EntityId = u32;

/// Anything the list cache can key by id
pub trait Entity: Clone {
    /// `None` until the server has assigned one
    fn id(&self) -> Option<EntityId>;
}

/// A single field value
/// Decoded through `Schema::coerce`; only serialized
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// String shown in a controlled input or a list row
    pub fn display(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// True when both values are the same variant
    pub fn same_kind(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Ordered mapping from field name to value
///
/// Insertion order is kept so forms and request bodies follow schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.entries.iter_mut().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Replace in place when present, append otherwise
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let name = name.into();
        match self.get_mut(&name) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<const N: usize> From<[(&str, FieldValue); N]> for FieldMap {
    fn from(entries: [(&str, FieldValue); N]) -> Self {
        let mut map = FieldMap::new();
        for (name, value) in entries {
            map.insert(name, value);
        }
        map
    }
}

/// A persisted (or draft) entity of some resource
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: Option<EntityId>,
    pub fields: FieldMap,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Not-yet-persisted record
    pub fn draft(fields: FieldMap) -> Self {
        Self {
            id: None,
            fields,
            created_at: None,
            updated_at: None,
        }
    }

    /// Decode a server representation, normalizing fields through `schema`.
    ///
    /// Fields the schema does not know are dropped; missing or null fields
    /// take the schema default.
    pub fn from_json(schema: &Schema, value: Value) -> Result<Self, AdminError> {
        let Value::Object(obj) = value else {
            return Err(AdminError::decode(format!(
                "expected an object, got {}",
                json_type_name(&value)
            )));
        };

        let id = match obj.get("id") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(parse_id(raw)?),
        };

        let mut fields = FieldMap::new();
        for spec in schema.fields() {
            fields.insert(spec.name.clone(), schema.coerce(spec, obj.get(&spec.name)));
        }

        Ok(Self {
            id,
            fields,
            created_at: obj.get("created_at").and_then(parse_timestamp),
            updated_at: obj.get("updated_at").and_then(parse_timestamp),
        })
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Row label: the given field's text, or `#id` when it is blank
    pub fn title(&self, field: &str) -> String {
        let text = self.get(field).map(FieldValue::display).unwrap_or_default();
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
        match self.id {
            Some(id) => format!("#{}", id),
            None => "(untitled)".to_string(),
        }
    }
}

impl Entity for Record {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

fn parse_id(raw: &Value) -> Result<EntityId, AdminError> {
    let parsed = match raw {
        Value::Number(n) => n.as_u64().and_then(|n| EntityId::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<EntityId>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AdminError::decode(format!("invalid id: {}", raw)))
}

/// RFC 3339, or the `YYYY-MM-DD HH:MM:SS` form SQL drivers hand back
fn parse_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    let text = raw.as_str()?.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use serde_json::json;

    fn note_schema() -> Schema {
        Schema::builder()
            .field(FieldSpec::long_text("content", "Content"))
            .field(FieldSpec::boolean("is_active", "Active"))
            .field(FieldSpec::tag_list("tags", "Tags"))
            .title("content")
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_json_normalizes_nulls() {
        let record = Record::from_json(
            &note_schema(),
            json!({"id": 7, "content": null, "extra": "dropped", "created_at": "2024-03-01T10:00:00Z"}),
        )
        .unwrap();

        assert_eq!(record.id, Some(7));
        assert_eq!(record.get("content"), Some(&FieldValue::Text(String::new())));
        assert_eq!(record.get("is_active"), Some(&FieldValue::Bool(false)));
        assert_eq!(record.get("tags"), Some(&FieldValue::List(vec![])));
        assert!(record.get("extra").is_none());
        assert!(record.created_at.is_some());
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn test_from_json_accepts_sql_timestamps_and_string_ids() {
        let record = Record::from_json(
            &note_schema(),
            json!({"id": "12", "updated_at": "2024-03-01 10:00:00"}),
        )
        .unwrap();
        assert_eq!(record.id, Some(12));
        assert!(record.updated_at.is_some());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = Record::from_json(&note_schema(), json!([1, 2])).unwrap_err();
        assert!(matches!(err, AdminError::Decode { .. }));

        let err = Record::from_json(&note_schema(), json!({"id": -3})).unwrap_err();
        assert!(matches!(err, AdminError::Decode { .. }));
    }

    #[test]
    fn test_field_map_keeps_order_in_json() {
        let mut map = FieldMap::new();
        map.insert("b", FieldValue::Integer(1));
        map.insert("a", FieldValue::Bool(true));
        map.insert("b", FieldValue::Integer(2));

        assert_eq!(map.len(), 2);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"b":2,"a":true}"#);
    }

    #[test]
    fn test_field_values_serialize_untagged() {
        let map = FieldMap::from([
            ("title", FieldValue::Text("Dune".into())),
            ("tags", FieldValue::List(vec!["sf".into()])),
        ]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"title":"Dune","tags":["sf"]}"#);
    }

    #[test]
    fn test_title_falls_back_to_id() {
        let mut record = Record::draft(FieldMap::from([("content", FieldValue::Text("  ".into()))]));
        assert_eq!(record.title("content"), "(untitled)");
        record.id = Some(4);
        assert_eq!(record.title("content"), "#4");
    }
}
