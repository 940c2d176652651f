use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Meeting widget error: {0}")]
    Widget(String),
}

impl AppError {
    /// Text a page shows for this failure: the backend's own message when it
    /// sent one, otherwise the page's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api { status: 401 | 403, .. })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_message() {
        let err = AppError::Api {
            status: 422,
            message: Some("Email already taken".to_string()),
        };
        assert_eq!(err.user_message("Failed"), "Email already taken");
    }

    #[test]
    fn user_message_falls_back() {
        let err = AppError::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Failed to create category."), "Failed to create category.");

        let err = AppError::Decode("eof".to_string());
        assert_eq!(err.user_message("Oops"), "Oops");
    }

    #[test]
    fn unauthorized_statuses() {
        assert!(AppError::Api { status: 401, message: None }.is_unauthorized());
        assert!(AppError::Api { status: 403, message: None }.is_unauthorized());
        assert!(!AppError::Api { status: 404, message: None }.is_unauthorized());
    }
}
