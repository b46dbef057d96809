//! Atrium test utilities.
//!
//! Helpers for testing plugins and the host: a recording mock transport,
//! JSON fixtures shaped like backend responses, menu tree builders, and
//! assertion utilities.

use std::collections::VecDeque;

use async_trait::async_trait;
use atrium_sdk::TransportError;
use atrium_sdk::transport::{ApiRequest, ApiResponse, Transport};
use parking_lot::Mutex;
use serde_json::Value as JsonValue;

/// A [`Transport`] that replays queued responses and records every request.
///
/// When the queue runs dry, `send` fails with a request error so tests notice
/// unexpected extra calls.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .lock()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queue a JSON response.
    pub fn respond_json(self, status: u16, body: JsonValue) -> Self {
        self.respond(status, body.to_string())
    }

    /// Queue a transport failure.
    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .push_back(Err(TransportError::request(message)));
        self
    }

    /// All requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests sent so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::request("no response queued")))
    }
}

/// Backend-shaped JSON fixtures.
pub mod fixtures {
    use serde_json::{Value, json};

    /// Wrap a value in the `{ "data": ... }` envelope.
    pub fn data(value: Value) -> Value {
        json!({ "data": value })
    }

    /// A folder record.
    pub fn folder(id: i64, name: &str, parent_id: Option<i64>) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": null,
            "parent_id": parent_id,
            "path": null,
            "created_at": "2024-05-01T12:00:00.000000Z",
            "updated_at": "2024-05-01T12:00:00.000000Z"
        })
    }

    /// A plain-text file record.
    pub fn file(id: i64, name: &str, folder_id: Option<i64>) -> Value {
        json!({
            "id": id,
            "name": name,
            "filename": format!("{name}.txt"),
            "path": format!("media/{name}.txt"),
            "url": format!("/storage/media/{name}.txt"),
            "mime_type": "text/plain",
            "size": 128,
            "folder_id": folder_id,
            "user_id": 1,
            "description": null,
            "created_at": "2024-05-01T12:00:00.000000Z",
            "updated_at": "2024-05-01T12:00:00.000000Z"
        })
    }

    /// A PNG file record with dimensions.
    pub fn image(id: i64, name: &str, folder_id: Option<i64>) -> Value {
        json!({
            "id": id,
            "name": name,
            "filename": format!("{name}.png"),
            "path": format!("media/{name}.png"),
            "mime_type": "image/png",
            "size": 4096,
            "folder_id": folder_id,
            "width": 640,
            "height": 480
        })
    }

    /// A 422 body for a single failing field.
    pub fn validation_error(field: &str, message: &str) -> Value {
        json!({
            "message": message,
            "errors": { field: [message] }
        })
    }
}

/// Menu tree builders.
pub mod menus {
    use atrium_sdk::menu::MenuNode;

    /// A host root with a single dashboard entry at order 10.
    pub fn host_tree() -> MenuNode {
        MenuNode::new("root", "Root").child(MenuNode::new("dashboard", "Dashboard").path("/").order(10))
    }

    /// A root whose children carry the given orders, with ids `n0`, `n1`, ...
    pub fn with_orders(orders: &[Option<i32>]) -> MenuNode {
        orders
            .iter()
            .enumerate()
            .fold(MenuNode::new("root", "Root"), |root, (i, order)| {
                let node = MenuNode::new(format!("n{i}"), format!("Node {i}"));
                root.child(match order {
                    Some(o) => node.order(*o),
                    None => node,
                })
            })
    }

    /// Ids of the direct children, in order.
    pub fn child_ids(node: &MenuNode) -> Vec<String> {
        node.children.iter().map(|c| c.id.clone()).collect()
    }
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value does not have a specific key.
    pub fn lacks_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_none(),
            "Expected JSON to NOT have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap_or_default(),
            serde_json::to_string_pretty(expected).unwrap_or_default()
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }
}
