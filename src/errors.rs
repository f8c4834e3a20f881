use crate::engine::notice::Notice;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("habit {0} not found")]
    HabitNotFound(u64),

    #[error("mission {0} not found")]
    MissionNotFound(u64),

    #[error("reward {0} not found")]
    RewardNotFound(u64),

    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    /// Notices raised before the failure; sent alongside the message.
    pub notices: Vec<Notice>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            notices: Vec::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            notices: Vec::new(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            notices: Vec::new(),
        }
    }

    pub fn with_notices(mut self, notices: Vec<Notice>) -> Self {
        self.notices = notices;
        self
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::HabitNotFound(_)
            | EngineError::MissionNotFound(_)
            | EngineError::RewardNotFound(_) => Self::not_found(err.to_string()),
            EngineError::EmptyName { .. } => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = json!({
            "error": self.message,
            "status": self.status.as_u16(),
            "notices": self.notices,
        });
        (self.status, Json(body)).into_response()
    }
}
