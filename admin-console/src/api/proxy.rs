//! テナントサービスへの透過プロキシ
//!
//! 受信したリクエストをそのまま下流へ転送し、ステータス・ヘッダー・ボディを
//! 変更せずに返す。リトライやタイムアウトは設定しない。

use crate::common::error::ConsoleError;
use async_trait::async_trait;
use axum::{
    body::Body,
    extract::OriginalUri,
    http::{HeaderMap, HeaderName, HeaderValue, Request, StatusCode},
    response::Response,
};
use futures::TryStreamExt;
use std::io;
use tracing::debug;

/// 転送しないホップバイホップヘッダー
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// 下流サービスへのリクエスト転送
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// リクエストを`target_base_url`配下の同じパス・クエリへ転送する
    ///
    /// 下流からHTTPレスポンスが返った場合はステータスに関わらず`Ok`。
    /// 接続できなかった場合のみ`ConsoleError::Http`。
    async fn forward(
        &self,
        request: Request<Body>,
        target_base_url: &str,
    ) -> Result<Response, ConsoleError>;
}

/// reqwestによる転送実装
#[derive(Clone, Default)]
pub struct HttpForwarder {
    client: reqwest::Client,
}

impl HttpForwarder {
    /// 共有クライアントから生成
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name)
}

/// 転送先URLを組み立てる（ベースURL末尾の`/`は除去）
///
/// ネストされたルーターではURIからプレフィックスが除かれるため、
/// `OriginalUri`拡張があればそちらを優先する。
pub(crate) fn build_target_url(base_url: &str, request: &Request<Body>) -> String {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or_else(|| request.uri());
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    format!("{}{}", base_url.trim_end_matches('/'), path_and_query)
}

fn outbound_headers(headers: &HeaderMap) -> reqwest::header::HeaderMap {
    let mut outbound = reqwest::header::HeaderMap::new();
    for (name, value) in headers.iter() {
        let lower = name.as_str();
        // Host/Content-Lengthはreqwestが転送先とボディから設定する
        if is_hop_by_hop(lower) || lower == "host" || lower == "content-length" {
            continue;
        }
        if let (Ok(header_name), Ok(header_value)) = (
            reqwest::header::HeaderName::from_bytes(name.as_str().as_bytes()),
            reqwest::header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            outbound.append(header_name, header_value);
        }
    }
    outbound
}

/// 下流レスポンスをストリーミングのままaxumレスポンスへ変換
pub(crate) fn forward_streaming_response(response: reqwest::Response) -> Response {
    let status = response.status();
    let headers = response.headers().clone();
    let stream = response.bytes_stream().map_err(io::Error::other);
    let mut axum_response = Response::new(Body::from_stream(stream));
    *axum_response.status_mut() =
        StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

    let response_headers = axum_response.headers_mut();
    for (name, value) in headers.iter() {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        if let (Ok(header_name), Ok(header_value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            response_headers.append(header_name, header_value);
        }
    }
    axum_response
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(
        &self,
        request: Request<Body>,
        target_base_url: &str,
    ) -> Result<Response, ConsoleError> {
        let target_url = build_target_url(target_base_url, &request);
        let (parts, body) = request.into_parts();

        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ConsoleError::Internal(format!("Failed to read request body: {}", e)))?;

        let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
            .map_err(|e| ConsoleError::Validation(format!("Invalid method: {}", e)))?;

        debug!(method = %method, url = %target_url, "Forwarding request to tenant service");

        let response = self
            .client
            .request(method, &target_url)
            .headers(outbound_headers(&parts.headers))
            .body(body)
            .send()
            .await
            .map_err(|e| {
                ConsoleError::Http(format!("Failed to reach tenant service: {}", e))
            })?;

        Ok(forward_streaming_response(response))
    }
}
