//! # Todo Service エラー定義
//!
//! Todo Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//! レスポンスボディは RFC 9457 Problem Details（[`ErrorResponse`]）。

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

/// ディスパッチャが受け付けるメソッド（`Allow` ヘッダーの値）
pub const ALLOWED_METHODS: &str = "GET, POST, PATCH, DELETE";

/// Todo Service で発生するエラー
#[derive(Debug, Error)]
pub enum TodoError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 対応していない HTTP メソッド
    #[error("許可されていないメソッド: {0}")]
    MethodNotAllowed(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 解釈できない Content-Type のボディ
    #[error("対応していないメディアタイプ: {0}")]
    UnsupportedMediaType(String),
}

impl From<DomainError> for TodoError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::BadRequest(msg),
            err @ DomainError::NotFound { .. } => Self::NotFound(err.to_string()),
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let body = match &self {
            TodoError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            TodoError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            TodoError::MethodNotAllowed(msg) => {
                let body = ErrorResponse::method_not_allowed(msg.clone());
                return (
                    StatusCode::METHOD_NOT_ALLOWED,
                    [(header::ALLOW, ALLOWED_METHODS)],
                    Json(body),
                )
                    .into_response();
            }
            TodoError::Database(e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    error.kind = "database",
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
            TodoError::UnsupportedMediaType(msg) => {
                ErrorResponse::unsupported_media_type(msg.clone())
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
