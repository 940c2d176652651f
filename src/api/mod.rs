pub mod dto;
pub mod endpoints;
pub mod mock;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::AppError;
use crate::session::SessionStore;

pub use endpoints::LmsApi;
pub use mock::{MockTransport, RecordedRequest};

/// The four verbs every page uses against the backend. Implementations
/// return the decoded JSON body; non-2xx responses are errors.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError>;
    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, AppError>;
    async fn put(&self, path: &str, body: Value) -> Result<Value, AppError>;
    async fn delete(&self, path: &str) -> Result<Value, AppError>;
}

/// Percent-encodes `raw` so it travels as exactly one path segment. Dot
/// segments are refused since the URL parser would resolve them.
pub fn path_segment(raw: &str) -> Result<String, AppError> {
    if matches!(raw, "" | "." | "..") {
        return Err(AppError::Config(format!("Invalid path segment {:?}", raw)));
    }
    let mut scratch = Url::parse("http://segment.invalid/")
        .map_err(|e| AppError::Config(e.to_string()))?;
    scratch
        .path_segments_mut()
        .map_err(|_| AppError::Config("scratch URL has no path".to_string()))?
        .pop_if_empty()
        .push(raw);
    Ok(scratch.path().trim_start_matches('/').to_string())
}

pub struct HttpApiClient {
    client: Client,
    base_url: String,
    session: Option<SessionStore>,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Attach the store the bearer token is read from before each request.
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AppError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::Config(format!("Invalid request URL {}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let request = match &self.session {
            Some(session) => {
                let token = session.get_auth_token().await?;
                if token.is_empty() {
                    request
                } else {
                    request.header("Authorization", format!("Bearer {}", token))
                }
            }
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("backend responded {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let message = serde_json::from_str::<dto::MessageBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| AppError::Decode(format!("Failed to parse backend response: {}", e)))
    }
}

#[async_trait]
impl ApiTransport for HttpApiClient {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError> {
        let url = self.url(path, query)?;
        self.send(self.client.get(url)).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, AppError> {
        let url = self.url(path, &[])?;
        let request = self.client.post(url);
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        self.send(request).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, AppError> {
        let url = self.url(path, &[])?;
        self.send(self.client.put(url).json(&body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, AppError> {
        let url = self.url(path, &[])?;
        self.send(self.client.delete(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = HttpApiClient::new("http://localhost:8000/api/v1/").unwrap();
        assert_eq!(
            client.url("/courses", &[]).unwrap().as_str(),
            "http://localhost:8000/api/v1/courses"
        );
        assert_eq!(
            client.url("courses/3/class-sessions", &[]).unwrap().as_str(),
            "http://localhost:8000/api/v1/courses/3/class-sessions"
        );
        assert_eq!(
            client
                .url("/student/classes", &[("filter", "upcoming")])
                .unwrap()
                .as_str(),
            "http://localhost:8000/api/v1/student/classes?filter=upcoming"
        );
    }

    #[test]
    fn encoded_segments_stay_in_place() {
        let client = HttpApiClient::new("http://localhost:8000/api/v1").unwrap();

        let room = path_segment("../../admin/overview").unwrap();
        let url = client.url(&format!("/session/valid/{}", room), &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/session/valid/..%2F..%2Fadmin%2Foverview"
        );

        let room = path_segment("abc?filter=x#frag").unwrap();
        let url = client.url(&format!("/session/valid/{}", room), &[]).unwrap();
        assert_eq!(url.path(), "/api/v1/session/valid/abc%3Ffilter=x%23frag");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn dot_segments_are_refused() {
        for raw in ["", ".", ".."] {
            assert!(path_segment(raw).is_err(), "{:?} should be refused", raw);
        }
        assert_eq!(path_segment("%2e%2e").unwrap(), "%252e%252e");
        assert_eq!(path_segment("room-abc").unwrap(), "room-abc");
    }
}
