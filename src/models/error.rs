#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// The request never reached the backend, or no response came back.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a status outside 200-299.
    #[error("HTTP error: {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The response body did not match the expected structure.
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{field} out of range: {value} (expected {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl AppError {
    /// HTTP status code, if the backend responded at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub const fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Short message suitable for a screen's error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Unable to reach the analytics service".to_string(),
            Self::Http {
                status,
                status_text,
                ..
            } => format!("API Error: {status} {status_text}"),
            Self::Shape(_) => "Received data in an unexpected format".to_string(),
            Self::Config(msg) | Self::Validation(msg) => msg.clone(),
            Self::OutOfRange { .. } => self.to_string(),
        }
    }
}
