//! Firestore REST (v1) adapter.

pub mod credentials;
pub mod value;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use url::Url;

use crate::config::StoreConfig;

use super::{Document, DocumentStore, Fields, Query, SetMode, StoreError};
use credentials::{ServiceAccount, TokenSource, EMULATOR_PROJECT_ID};
use value::{decode_fields, encode_fields, encode_value};

const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1/";

enum Auth {
    /// The emulator accepts the fixed `owner` token
    Emulator,
    ServiceAccount(TokenSource),
}

pub struct FirestoreStore {
    http: Client,
    project_id: String,
    /// `.../v1/projects/{project}/databases/{database}/documents`
    documents_root: Url,
    auth: Auth,
}

impl FirestoreStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| StoreError::Backend(format!("failed to build HTTP client: {}", e)))?;

        match &config.emulator_host {
            Some(host) => {
                let project_id = config
                    .project_id
                    .clone()
                    .unwrap_or_else(|| EMULATOR_PROJECT_ID.to_string());
                let base = format!("http://{}/v1/", host.trim_end_matches('/'));
                tracing::info!("Firestore emulator at {}", host);
                Self::with_base(http, &base, project_id, &config.database, Auth::Emulator)
            }
            None => {
                let account = ServiceAccount::load(config)?;
                let project_id = config
                    .project_id
                    .clone()
                    .unwrap_or_else(|| account.project_id.clone());
                let tokens = TokenSource::new(account, http.clone());
                Self::with_base(http, FIRESTORE_API, project_id, &config.database, Auth::ServiceAccount(tokens))
            }
        }
    }

    fn with_base(http: Client, base: &str, project_id: String, database: &str, auth: Auth) -> Result<Self, StoreError> {
        let documents_root = Url::parse(&format!("{}projects/{}/databases/{}/documents", base, project_id, database))
            .map_err(|e| StoreError::Backend(format!("invalid Firestore URL: {}", e)))?;

        Ok(Self {
            http,
            project_id,
            documents_root,
            auth,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        let mut url = self.documents_root.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Backend("Firestore URL cannot be a base".to_string()))?
            .push(collection);
        Ok(url)
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        if id.is_empty() {
            return Err(StoreError::NotFound(format!("{}/<empty id>", collection)));
        }
        let mut url = self.collection_url(collection)?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Backend("Firestore URL cannot be a base".to_string()))?
            .push(id);
        Ok(url)
    }

    /// `{documents_root}:{method}` for collection-group RPCs like `:runQuery`
    fn rpc_url(&self, method: &str) -> Url {
        let mut url = self.documents_root.clone();
        let path = format!("{}:{}", self.documents_root.path(), method);
        url.set_path(&path);
        url
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        match &self.auth {
            Auth::Emulator => Ok(request.bearer_auth("owner")),
            Auth::ServiceAccount(tokens) => Ok(request.bearer_auth(tokens.access_token().await?)),
        }
    }

    async fn send(&self, request: RequestBuilder, target: &str) -> Result<Response, StoreError> {
        let request = self.authorized(request).await?;
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                StoreError::Unavailable(format!("{}: {}", target, e))
            } else {
                StoreError::Backend(format!("{}: {}", target, e))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Firestore {} returned {}: {}", target, status, body);
        Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound(target.to_string()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                StoreError::Credentials(format!("{} rejected with {}", target, status))
            }
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                StoreError::Unavailable(format!("{} returned {}", target, status))
            }
            _ => StoreError::Backend(format!("{} returned {}: {}", target, status, body)),
        })
    }

    async fn json_body(response: Response) -> Result<Value, StoreError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::Decode(format!("invalid JSON from Firestore: {}", e)))
    }

    fn decode_document(raw: &Value) -> Result<Document, StoreError> {
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Decode("document without name".to_string()))?;
        Ok(Document::new(document_id(name), decode_fields(raw.get("fields"))?))
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let target = format!("{}/{}", collection, id);
        let url = self.document_url(collection, id)?;
        match self.send(self.http.get(url), &target).await {
            Ok(response) => Self::decode_document(&Self::json_body(response).await?).map(Some),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields, mode: SetMode) -> Result<(), StoreError> {
        // Without a mask Firestore replaces the document, so an empty merge must not be sent
        if mode == SetMode::Merge && fields.is_empty() {
            return Ok(());
        }

        let target = format!("{}/{}", collection, id);
        let mut url = self.document_url(collection, id)?;
        if mode == SetMode::Merge {
            let mut pairs = url.query_pairs_mut();
            for path in merge_field_paths(&fields) {
                pairs.append_pair("updateMask.fieldPaths", &path);
            }
        }

        let body = json!({ "fields": encode_fields(&fields) });
        self.send(self.http.patch(url).json(&body), &target).await?;
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = self.collection_url(collection)?;
        let body = json!({ "fields": encode_fields(&fields) });
        let response = self.send(self.http.post(url).json(&body), collection).await?;
        let created = Self::decode_document(&Self::json_body(response).await?)?;
        Ok(created.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        if fields.is_empty() {
            return match self.get(collection, id).await? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound(format!("{}/{}", collection, id))),
            };
        }

        let target = format!("{}/{}", collection, id);
        let mut url = self.document_url(collection, id)?;
        {
            let mut pairs = url.query_pairs_mut();
            for key in fields.keys() {
                pairs.append_pair("updateMask.fieldPaths", &field_path(key));
            }
            pairs.append_pair("currentDocument.exists", "true");
        }

        let body = json!({ "fields": encode_fields(&fields) });
        self.send(self.http.patch(url).json(&body), &target).await?;
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let url = self.rpc_url("runQuery");
        let body = structured_query(collection, query);
        let response = self.send(self.http.post(url).json(&body), collection).await?;

        // runQuery streams one entry per result; entries without `document`
        // only carry progress metadata
        let entries = Self::json_body(response).await?;
        let entries = entries
            .as_array()
            .ok_or_else(|| StoreError::Decode("runQuery response is not an array".to_string()))?;

        entries
            .iter()
            .filter_map(|entry| entry.get("document"))
            .map(Self::decode_document)
            .collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let url = self.rpc_url("listCollectionIds");
        self.send(self.http.post(url).json(&json!({ "pageSize": 1 })), "listCollectionIds")
            .await?;
        Ok(())
    }
}

/// Build a `runQuery` request body.
pub fn structured_query(collection: &str, query: &Query) -> Value {
    let mut structured = json!({ "from": [{ "collectionId": collection }] });

    let filters: Vec<Value> = query
        .filters
        .iter()
        .map(|f| {
            let field = json!({ "fieldPath": field_path(&f.field) });
            if f.value.is_null() {
                json!({ "unaryFilter": { "field": field, "op": "IS_NULL" } })
            } else {
                json!({ "fieldFilter": { "field": field, "op": "EQUAL", "value": encode_value(&f.value) } })
            }
        })
        .collect();

    match filters.len() {
        0 => {}
        1 => structured["where"] = filters.into_iter().next().unwrap_or(Value::Null),
        _ => structured["where"] = json!({ "compositeFilter": { "op": "AND", "filters": filters } }),
    }

    if let Some(order) = &query.order_by {
        structured["orderBy"] = json!([{
            "field": { "fieldPath": field_path(&order.field) },
            "direction": order.direction.as_firestore(),
        }]);
    }

    if let Some(limit) = query.limit {
        structured["limit"] = json!(limit);
    }

    json!({ "structuredQuery": structured })
}

/// Field names outside `[A-Za-z_][A-Za-z0-9_]*` must be backtick-quoted.
pub fn field_path(name: &str) -> String {
    let mut chars = name.chars();
    let simple = chars.next().map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if simple {
        name.to_string()
    } else {
        format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`"))
    }
}

/// Mask for a merge-set: one dotted path per leaf, so nested maps merge
/// instead of replacing their stored counterpart. Empty maps are leaves.
pub fn merge_field_paths(fields: &Fields) -> Vec<String> {
    fn walk(prefix: Option<&str>, fields: &Fields, out: &mut Vec<String>) {
        for (key, value) in fields {
            let path = match prefix {
                Some(parent) => format!("{}.{}", parent, field_path(key)),
                None => field_path(key),
            };
            match value {
                Value::Object(nested) if !nested.is_empty() => walk(Some(&path), nested, out),
                _ => out.push(path),
            }
        }
    }

    let mut out = Vec::new();
    walk(None, fields, &mut out);
    out
}

/// Last segment of `projects/p/databases/d/documents/<collection>/<id>`
fn document_id(name: &str) -> String {
    name.rsplit('/').next().unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;
    use crate::store::SortDirection;

    fn emulator_store_config() -> StoreConfig {
        StoreConfig {
            backend: StoreBackend::Firestore,
            project_id: Some("mfitness-test".to_string()),
            credentials_path: "unused.json".to_string(),
            credentials_json: None,
            emulator_host: Some("localhost:8080".to_string()),
            database: "(default)".to_string(),
            request_timeout_secs: 5,
        }
    }

    fn emulator_store() -> FirestoreStore {
        FirestoreStore::from_config(&emulator_store_config()).unwrap()
    }

    #[test]
    fn emulator_urls_need_no_credentials() {
        let store = emulator_store();
        assert_eq!(store.project_id(), "mfitness-test");
        assert_eq!(
            store.document_url("bookings", "abc").unwrap().as_str(),
            "http://localhost:8080/v1/projects/mfitness-test/databases/(default)/documents/bookings/abc"
        );
        assert!(store.rpc_url("runQuery").as_str().ends_with("/documents:runQuery"));
    }

    #[test]
    fn document_ids_are_path_encoded() {
        let store = emulator_store();
        let url = store.document_url("comments", "a/b c").unwrap();
        assert!(url.as_str().ends_with("/comments/a%2Fb%20c"));
        assert!(matches!(store.document_url("comments", ""), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn quotes_non_simple_field_paths() {
        assert_eq!(field_path("createdAt"), "createdAt");
        assert_eq!(field_path("_private"), "_private");
        assert_eq!(field_path("first-name"), "`first-name`");
        assert_eq!(field_path("9lives"), "`9lives`");
        assert_eq!(field_path("a`b"), "`a\\`b`");
    }

    #[test]
    fn merge_mask_lists_leaf_paths() {
        let body = json!({
            "address": {"city": "Colombo", "geo": {"lat": 6.9}},
            "first-name": "Ana",
            "prefs": {},
            "tags": ["a"]
        });
        let mut paths = merge_field_paths(body.as_object().unwrap());
        paths.sort();
        assert_eq!(paths, ["`first-name`", "address.city", "address.geo.lat", "prefs", "tags"]);
    }

    #[tokio::test]
    async fn merge_set_sends_leaf_mask() {
        use std::sync::{Arc, Mutex};

        use axum::{extract::RawQuery, Json, Router};

        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let recorder = seen.clone();
        let app = Router::new().fallback(move |RawQuery(query): RawQuery| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(query.unwrap_or_default());
                Json(json!({"name": "projects/p/databases/(default)/documents/users/u1"}))
            }
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let host = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let config = StoreConfig {
            emulator_host: Some(host),
            ..emulator_store_config()
        };
        let store = FirestoreStore::from_config(&config).unwrap();
        let fields = json!({"address": {"zip": "00100"}}).as_object().cloned().unwrap();
        store.set("users", "u1", fields, SetMode::Merge).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], "updateMask.fieldPaths=address.zip");
    }

    #[test]
    fn single_filter_query_shape() {
        let q = Query::new()
            .where_eq("approved", true)
            .order_by("createdAt", SortDirection::Desc)
            .limit(10);
        assert_eq!(
            structured_query("comments", &q),
            json!({"structuredQuery": {
                "from": [{"collectionId": "comments"}],
                "where": {"fieldFilter": {
                    "field": {"fieldPath": "approved"},
                    "op": "EQUAL",
                    "value": {"booleanValue": true}
                }},
                "orderBy": [{"field": {"fieldPath": "createdAt"}, "direction": "DESCENDING"}],
                "limit": 10
            }})
        );
    }

    #[test]
    fn multiple_filters_are_and_composed() {
        let q = Query::new().where_eq("date", "2024-06-01").where_eq("timeSlot", Value::Null);
        let body = structured_query("bookings", &q);
        let composite = &body["structuredQuery"]["where"]["compositeFilter"];
        assert_eq!(composite["op"], "AND");
        assert_eq!(composite["filters"].as_array().unwrap().len(), 2);
        assert_eq!(composite["filters"][1]["unaryFilter"]["op"], "IS_NULL");
        assert!(body["structuredQuery"].get("orderBy").is_none());
    }

    #[test]
    fn id_is_last_name_segment() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/bookings/XyZ123"),
            "XyZ123"
        );
    }
}
