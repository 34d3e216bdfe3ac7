//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! # JSON-APIエラーレスポンス
//!
//! `ConsoleError`は`error_code()`と`status_code()`メソッドを提供し、
//! fabric8サービスと同じ形式のエラーレスポンス（`{"errors":[...]}`）を生成できます。

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// admin console error type
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Missing or invalid credential (identity could not be resolved)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Audit log persistence failure
    #[error("Database error: {0}")]
    Database(String),

    /// Downstream transport failure
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Invalid request parameter
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Returns the JSON-API error code string.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "unauthorized_error",
            Self::Database(_) => "internal_server_error",
            Self::Http(_) => "bad_gateway",
            Self::Validation(_) => "bad_parameter_error",
            Self::Config(_) => "internal_server_error",
            Self::Internal(_) => "internal_server_error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message shown to the caller.
    ///
    /// 認証エラーはバリアントのメッセージのみ（固定文言）を返し、
    /// それ以外は`Display`表現をそのまま返す。
    pub fn detail(&self) -> String {
        match self {
            Self::Unauthorized(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Converts this error to a JSON-API error document.
    pub fn to_json_api_error(&self) -> JsonApiErrors {
        JsonApiErrors {
            errors: vec![JsonApiError {
                id: Uuid::new_v4().to_string(),
                code: self.error_code().to_string(),
                status: self.status_code().as_u16().to_string(),
                detail: self.detail(),
            }],
        }
    }
}

/// JSON-APIエラードキュメント
///
/// # Example
///
/// ```json
/// {
///   "errors": [{
///     "id": "5d0e3c3f-0f6a-4d44-9b4e-3c4b0f0b6a54",
///     "code": "unauthorized_error",
///     "status": "401",
///     "detail": "invalid authorization token (invalid 'sub' claim)"
///   }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonApiErrors {
    /// The error entries
    pub errors: Vec<JsonApiError>,
}

/// JSON-APIエラー詳細
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonApiError {
    /// Unique error identifier (for log correlation)
    pub id: String,
    /// Error code (e.g., "unauthorized_error")
    pub code: String,
    /// HTTP status as string
    pub status: String,
    /// Human-readable error message
    pub detail: String,
}

/// Result type alias
pub type ConsoleResult<T> = Result<T, ConsoleError>;
