#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`FakeBackend`] is a real HTTP server speaking the media API on an
//! ephemeral port, backed by in-memory maps. Tests drive it through the
//! REAL `HttpTransport` and `MediaClient`, so requests go over the wire
//! exactly as they would against the production backend.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};
use url::Url;

use atrium_kernel::{AppState, Config};
use atrium_media::InjectionPolicy;

/// Token the fake backend accepts.
pub const TEST_TOKEN: &str = "test-token";

/// In-memory media store.
#[derive(Default)]
pub struct Store {
    folders: Mutex<BTreeMap<i64, Value>>,
    files: Mutex<BTreeMap<i64, Value>>,
    uploads: Mutex<HashMap<i64, Vec<u8>>>,
    next_id: AtomicI64,
}

impl Store {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn folder_exists(&self, id: &Value) -> bool {
        match id.as_i64() {
            Some(id) => self.folders.lock().contains_key(&id),
            None => id.is_null(),
        }
    }

    /// Raw bytes received for an uploaded file.
    pub fn upload_bytes(&self, id: i64) -> Option<Vec<u8>> {
        self.uploads.lock().get(&id).cloned()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.lock().len()
    }
}

/// A running fake media backend.
pub struct FakeBackend {
    pub addr: SocketAddr,
    pub store: Arc<Store>,
}

impl FakeBackend {
    /// Bind to an ephemeral port and serve on the current runtime.
    pub async fn start() -> Self {
        let store = Arc::new(Store::default());
        let app = router(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, store }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// Host state wired to this backend through the real HTTP transport.
    pub fn app_state(&self, token: Option<&str>) -> AppState {
        let config = Config {
            auth_token: token.map(str::to_string),
            menu_injection: InjectionPolicy::Delegated,
            ..Config::new(self.url())
        };
        AppState::new(&config).unwrap()
    }
}

fn router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/api/media/folders", get(list_folders).post(create_folder))
        .route(
            "/api/media/folders/{id}",
            get(get_folder).put(update_folder).delete(delete_folder),
        )
        .route("/api/media/files", get(list_files).post(upload_file))
        .route(
            "/api/media/files/{id}",
            get(get_file).put(update_file).delete(delete_file),
        )
        .layer(middleware::from_fn(require_token))
        .with_state(store)
}

async fn require_token(request: Request, next: Next) -> Response {
    let expected = format!("Bearer {TEST_TOKEN}");
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthenticated."})))
            .into_response();
    }
    next.run(request).await
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response()
}

fn invalid(field: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"message": message, "errors": {field: [message]}})),
    )
        .into_response()
}

fn data(status: StatusCode, value: Value) -> Response {
    (status, Json(json!({"data": value}))).into_response()
}

fn filter_by(items: &BTreeMap<i64, Value>, key: &str, wanted: Option<&String>) -> Vec<Value> {
    items
        .values()
        .filter(|v| match wanted {
            Some(id) => v[key].as_i64().map(|n| n.to_string()).as_ref() == Some(id),
            None => true,
        })
        .cloned()
        .collect()
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
}

async fn list_folders(
    State(store): State<Arc<Store>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let folders = store.folders.lock();
    data(
        StatusCode::OK,
        Value::Array(filter_by(&folders, "parent_id", params.get("parent_id"))),
    )
}

async fn create_folder(State(store): State<Arc<Store>>, Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default();
    if name.is_empty() {
        return invalid("name", "The name field is required.");
    }
    let parent_id = body.get("parent_id").cloned().unwrap_or(Value::Null);
    if !store.folder_exists(&parent_id) {
        return invalid("parent_id", "The selected parent id is invalid.");
    }

    let id = store.next_id();
    let folder = json!({
        "id": id,
        "name": name,
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "parent_id": parent_id,
        "path": body.get("path").cloned().unwrap_or(Value::Null),
    });
    store.folders.lock().insert(id, folder.clone());
    data(StatusCode::CREATED, folder)
}

async fn get_folder(State(store): State<Arc<Store>>, Path(id): Path<i64>) -> Response {
    match store.folders.lock().get(&id) {
        Some(folder) => data(StatusCode::OK, folder.clone()),
        None => not_found(),
    }
}

async fn update_folder(
    State(store): State<Arc<Store>>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> Response {
    if let Some(parent) = patch.get("parent_id")
        && !store.folder_exists(parent)
    {
        return invalid("parent_id", "The selected parent id is invalid.");
    }
    let mut folders = store.folders.lock();
    let Some(folder) = folders.get_mut(&id) else {
        return not_found();
    };
    merge(folder, &patch);
    data(StatusCode::OK, folder.clone())
}

async fn delete_folder(State(store): State<Arc<Store>>, Path(id): Path<i64>) -> Response {
    match store.folders.lock().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

async fn list_files(
    State(store): State<Arc<Store>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let files = store.files.lock();
    data(
        StatusCode::OK,
        Value::Array(filter_by(&files, "folder_id", params.get("folder_id"))),
    )
}

async fn upload_file(State(store): State<Arc<Store>>, mut multipart: Multipart) -> Response {
    let mut upload: Option<(String, String, Vec<u8>)> = None;
    let mut folder_id = Value::Null;
    let mut description = Value::Null;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.unwrap().to_vec();
                upload = Some((filename, mime, bytes));
            }
            "folder_id" => {
                let text = field.text().await.unwrap();
                folder_id = text.parse::<i64>().map(Value::from).unwrap_or(Value::Null);
            }
            "description" => description = Value::from(field.text().await.unwrap()),
            _ => {}
        }
    }

    let Some((filename, mime, bytes)) = upload else {
        return invalid("file", "The file field is required.");
    };
    if !store.folder_exists(&folder_id) {
        return invalid("folder_id", "The selected folder id is invalid.");
    }

    let id = store.next_id();
    let file = json!({
        "id": id,
        "name": filename.rsplit_once('.').map_or(filename.as_str(), |(stem, _)| stem),
        "filename": filename,
        "path": format!("media/{id}/{filename}"),
        "url": format!("/storage/media/{id}/{filename}"),
        "mime_type": mime,
        "size": bytes.len(),
        "folder_id": folder_id,
        "description": description,
    });
    store.uploads.lock().insert(id, bytes);
    store.files.lock().insert(id, file.clone());
    data(StatusCode::CREATED, file)
}

async fn get_file(State(store): State<Arc<Store>>, Path(id): Path<i64>) -> Response {
    match store.files.lock().get(&id) {
        Some(file) => data(StatusCode::OK, file.clone()),
        None => not_found(),
    }
}

async fn update_file(
    State(store): State<Arc<Store>>,
    Path(id): Path<i64>,
    Json(patch): Json<Value>,
) -> Response {
    if let Some(folder) = patch.get("folder_id")
        && !store.folder_exists(folder)
    {
        return invalid("folder_id", "The selected folder id is invalid.");
    }
    let mut files = store.files.lock();
    let Some(file) = files.get_mut(&id) else {
        return not_found();
    };
    merge(file, &patch);
    data(StatusCode::OK, file.clone())
}

async fn delete_file(State(store): State<Arc<Store>>, Path(id): Path<i64>) -> Response {
    match store.files.lock().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
