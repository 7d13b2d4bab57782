use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, Fields, Query, SetMode, SortDirection, StoreError};

type Collection = BTreeMap<String, Fields>;

/// In-process document store with the same observable semantics as the
/// Firestore adapter. Each operation holds the lock for its whole duration.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Firestore auto-ids are 20 alphanumeric characters.
    fn generate_id() -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(20);
        id
    }

    fn matches(fields: &Fields, query: &Query) -> bool {
        query
            .filters
            .iter()
            .all(|f| fields.get(&f.field) == Some(&f.value))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields, mode: SetMode) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if mode == SetMode::Merge {
            if let Some(existing) = docs.get_mut(id) {
                merge_fields(existing, fields);
                return Ok(());
            }
        }
        docs.insert(id.to_string(), fields);
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Self::generate_id();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(format!("{}/{}", collection, id)))?;
        existing.extend(fields);
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut found: Vec<Document> = docs
            .iter()
            .filter(|(_, fields)| Self::matches(fields, query))
            // Ordered queries only see documents that carry the order field.
            .filter(|(_, fields)| {
                query
                    .order_by
                    .as_ref()
                    .map_or(true, |o| fields.contains_key(&o.field))
            })
            .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
            .collect();

        if let Some(order) = &query.order_by {
            found.sort_by(|a, b| {
                let ord = compare_values(
                    a.get(&order.field).unwrap_or(&Value::Null),
                    b.get(&order.field).unwrap_or(&Value::Null),
                );
                match order.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            found.truncate(limit);
        }

        Ok(found)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Merge down to leaf fields: a non-empty map merges into an existing map,
/// anything else (scalars, arrays, empty maps) replaces the target.
fn merge_fields(existing: &mut Fields, incoming: Fields) {
    for (key, value) in incoming {
        if let Value::Object(nested) = value {
            if !nested.is_empty() {
                if let Some(Value::Object(current)) = existing.get_mut(&key) {
                    merge_fields(current, nested);
                    continue;
                }
            }
            existing.insert(key, Value::Object(nested));
        } else {
            existing.insert(key, value);
        }
    }
}

/// Cross-type ordering: null < bool < number < string < array < object.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
