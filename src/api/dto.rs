//! Wire shapes that are not domain records: envelopes, error bodies and the
//! meeting lookups.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::ClassStatus;

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of `GET /session/valid/{room}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionValidity {
    pub valid: bool,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default, alias = "class_session_id")]
    pub session_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of `GET /courses/class-sessions/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomInfo {
    #[serde(rename = "roomName", alias = "room_name")]
    pub room_name: String,
    #[serde(default, rename = "displayName", alias = "display_name")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub class_status: ClassStatus,
}

/// Most list and detail endpoints wrap their payload as `{ "data": ... }`;
/// a few answer bare.
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, AppError> {
    match unwrap_data(body) {
        Value::Null => Ok(Vec::new()),
        value => Ok(serde_json::from_value(value)?),
    }
}

pub fn decode_one<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    match unwrap_data(body) {
        Value::Null => Err(AppError::Decode("response has no data".to_string())),
        value => Ok(serde_json::from_value(value)?),
    }
}
