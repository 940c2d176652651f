use tracing::warn;

use crate::error::AppError;

/// What a table widget shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    Loading,
    Empty,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> ListView<T> {
    pub fn from_result(result: Result<Vec<T>, AppError>, error_message: &str) -> Self {
        match result {
            Ok(items) if items.is_empty() => ListView::Empty,
            Ok(items) => ListView::Loaded(items),
            Err(e) => {
                warn!("{}: {}", error_message, e);
                ListView::Failed(error_message.to_string())
            }
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ListView::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListView::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What a single-record widget (a metric card, a detail panel) shows.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> WidgetState<T> {
    pub fn from_result(result: Result<T, AppError>, error_message: &str) -> Self {
        match result {
            Ok(value) => WidgetState::Ready(value),
            Err(e) => {
                warn!("{}: {}", error_message, e);
                WidgetState::Failed(error_message.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            WidgetState::Ready(value) => Some(value),
            _ => None,
        }
    }
}
