use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::models::DeviceKind;

/// Error reported by the video SDK, carrying the SDK's error name
/// (e.g. `NotAllowedError`) and an optional numeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkError {
    pub name: String,
    pub message: String,
    pub code: Option<u32>,
}

impl SdkError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: u32) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for SdkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for SdkError {}

/// Why media capture failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaAccessKind {
    PermissionDenied,
    NotFound,
    NotReadable,
    Overconstrained,
    Unsupported,
    Other,
}

impl MediaAccessKind {
    fn from_error_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => Self::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" => Self::NotFound,
            "NotReadableError" | "TrackStartError" | "AbortError" => Self::NotReadable,
            "OverconstrainedError" | "ConstraintNotSatisfiedError" => Self::Overconstrained,
            "TypeError" => Self::Unsupported,
            _ => Self::Other,
        }
    }
}

/// A microphone or camera could not be opened
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name}: {message}")]
pub struct MediaAccessError {
    pub kind: MediaAccessKind,
    pub device: DeviceKind,
    pub name: String,
    pub message: String,
}

impl MediaAccessError {
    pub fn from_sdk(device: DeviceKind, err: SdkError) -> Self {
        Self {
            kind: MediaAccessKind::from_error_name(&err.name),
            device,
            name: err.name,
            message: err.message,
        }
    }

    pub fn no_device(device: DeviceKind) -> Self {
        Self {
            kind: MediaAccessKind::NotFound,
            device,
            name: "NotFoundError".to_string(),
            message: format!("No {} input device is available", device.label()),
        }
    }
}

/// Failure while obtaining a token or participating in a room
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    #[error("Token request failed with HTTP status {status}")]
    TokenStatus { status: u16 },

    #[error("Token request failed: {0}")]
    TokenTransport(String),

    #[error("{0}")]
    Connect(SdkError),

    #[error("{0}")]
    Disconnected(SdkError),
}

impl From<reqwest::Error> for JoinError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => JoinError::TokenStatus {
                status: status.as_u16(),
            },
            None => JoinError::TokenTransport(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("This browser is not supported.")]
    Unsupported,

    #[error(transparent)]
    MediaAccess(#[from] MediaAccessError),

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error("Invalid room form: {0}")]
    InvalidRoomForm(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(String),
}

impl AppError {
    /// Error name shown in the error modal label
    pub fn name(&self) -> &str {
        match self {
            AppError::Unsupported => "CapabilityError",
            AppError::MediaAccess(e) => &e.name,
            AppError::Join(JoinError::Connect(e)) | AppError::Join(JoinError::Disconnected(e)) => {
                &e.name
            }
            AppError::Join(_) => "JoinError",
            AppError::InvalidRoomForm(_) => "ValidationError",
            AppError::Storage(_) => "StorageError",
            AppError::BadRequest(_) => "BadRequest",
            AppError::InternalError(_) => "InternalError",
            AppError::JwtError(_) => "JwtError",
        }
    }

    /// Error message without the name prefix
    pub fn message(&self) -> String {
        match self {
            AppError::MediaAccess(e) => e.message.clone(),
            AppError::Join(JoinError::Connect(e)) | AppError::Join(JoinError::Disconnected(e)) => {
                e.message.clone()
            }
            AppError::InvalidRoomForm(msg)
            | AppError::Storage(msg)
            | AppError::BadRequest(msg)
            | AppError::InternalError(msg)
            | AppError::JwtError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) | AppError::InvalidRoomForm(_) => StatusCode::BAD_REQUEST,
            AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.message(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::JwtError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_media_access_kind_from_sdk_name() {
        let err = MediaAccessError::from_sdk(
            DeviceKind::Audio,
            SdkError::new("NotAllowedError", "Permission denied"),
        );
        assert_eq!(err.kind, MediaAccessKind::PermissionDenied);
        assert_eq!(err.to_string(), "NotAllowedError: Permission denied");

        let err = MediaAccessError::from_sdk(DeviceKind::Video, SdkError::new("Weird", ""));
        assert_eq!(err.kind, MediaAccessKind::Other);
    }

    #[test]
    fn test_name_and_message() {
        let err = AppError::Join(JoinError::Connect(
            SdkError::new("RoomMaxParticipantsExceededError", "Room contains too many Participants").with_code(53105),
        ));
        assert_eq!(err.name(), "RoomMaxParticipantsExceededError");
        assert_eq!(err.message(), "Room contains too many Participants");

        let err = AppError::Unsupported;
        assert_eq!(err.name(), "CapabilityError");
        assert_eq!(err.message(), "This browser is not supported.");

        let err = AppError::from(JoinError::TokenStatus { status: 500 });
        assert_eq!(err.name(), "JoinError");
        assert_eq!(err.message(), "Token request failed with HTTP status 500");
    }
}
