use serde_json::{Map, Value};

use super::Fields;

/// A stored document: its id plus the JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Boolean field, `false` when missing or not a boolean.
    pub fn flag(&self, field: &str) -> bool {
        self.fields.get(field).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Fields only, as a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// List wire format: `{ "id": ..., ...fields }`. A stored `id` field wins.
    pub fn into_api_value(self) -> Value {
        let mut out = Map::with_capacity(self.fields.len() + 1);
        out.insert("id".to_string(), Value::String(self.id));
        out.extend(self.fields);
        Value::Object(out)
    }
}
