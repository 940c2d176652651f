use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::ApiTransport;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Ok(Value),
    Fail { status: u16, message: Option<String> },
}

/// In-process backend: answers from scripted replies and records every
/// request. A route with several replies queued hands them out in order and
/// keeps repeating the last one.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, method: Method, path: &str, body: Value) -> &Self {
        self.push_reply(method, path, Reply::Ok(body));
        self
    }

    pub fn fail(&self, method: Method, path: &str, status: u16, message: Option<&str>) -> &Self {
        self.push_reply(
            method,
            path,
            Reply::Fail {
                status,
                message: message.map(str::to_string),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn push_reply(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry((method, normalize(path)))
            .or_default()
            .push_back(reply);
    }

    fn respond(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value, AppError> {
        let path = normalize(path);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                method,
                path: path.clone(),
                query: query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body,
            });

        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        let reply = match replies.get_mut(&(method, path.clone())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Reply::Ok(value)) => Ok(value),
            Some(Reply::Fail { status, message }) => Err(AppError::Api { status, message }),
            None => Err(AppError::Api {
                status: 404,
                message: Some(format!("no mock reply for {:?} {}", method, path)),
            }),
        }
    }
}

fn normalize(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, AppError> {
        self.respond(Method::Get, path, query, None)
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, AppError> {
        self.respond(Method::Post, path, &[], body)
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, AppError> {
        self.respond(Method::Put, path, &[], Some(body))
    }

    async fn delete(&self, path: &str) -> Result<Value, AppError> {
        self.respond(Method::Delete, path, &[], None)
    }
}
