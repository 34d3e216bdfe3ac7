//! APIエラーレスポンス
//!
//! エラー応答の組み立てはハンドラーから切り離し、`AppState`経由で差し替え可能にする。

use crate::common::error::ConsoleError;
use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};

/// JSON-APIのContent-Type
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// エラーをHTTPレスポンスへ変換するコラボレーター
pub trait ErrorResponder: Send + Sync {
    /// エラーに対応するレスポンスを生成
    fn respond(&self, err: &ConsoleError) -> Response;
}

/// JSON-API形式（`{"errors":[...]}`）でエラーを返すデフォルト実装
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonApiErrorResponder;

impl ErrorResponder for JsonApiErrorResponder {
    fn respond(&self, err: &ConsoleError) -> Response {
        let mut response = (err.status_code(), Json(err.to_json_api_error())).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_API_CONTENT_TYPE),
        );
        response
    }
}
