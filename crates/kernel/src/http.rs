//! Backend transport over `reqwest`.
//!
//! Resolves plugin request paths against the configured server URL and
//! attaches the bearer token. One request per call, never retried.

use async_trait::async_trait;
use atrium_sdk::TransportError;
use atrium_sdk::transport::{ApiRequest, ApiResponse, Body, Method, Part, Transport};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part as FormPart};
use tracing::debug;
use url::Url;

use crate::config::Config;

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpTransport {
    /// Create a transport from configuration.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.server_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Absolute URL for a request path, keeping any path prefix of the base URL.
    fn url_for(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| TransportError::request(format!("invalid request URL for '{path}': {e}")))
    }

    fn multipart(parts: Vec<Part>) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                Part::Text { name, value } => form.text(name, value),
                Part::File {
                    name,
                    filename,
                    mime_type,
                    bytes,
                } => {
                    let file = FormPart::bytes(bytes)
                        .file_name(filename)
                        .mime_str(&mime_type)
                        .map_err(|e| TransportError::request(format!("invalid MIME type: {e}")))?;
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.auth_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart(parts) => builder.multipart(Self::multipart(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::request(e.to_string()))?;

        debug!(method = %request.method, path = %request.path, status, size = body.len(), "backend response");
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
