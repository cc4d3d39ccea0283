//! # メソッドオーバーライドミドルウェア
//!
//! HTML フォームは `GET` と `POST` しか送れないため、
//! `POST /todos/{uid}?_method=DELETE` のようなリクエストを
//! 指定されたメソッドとして扱う。
//!
//! 差し替えるのは `POST` のみ。値は大文字小文字を区別せず、
//! `PATCH` と `DELETE` 以外は無視する。

use axum::{
    body::Body,
    extract::Query,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// オーバーライド用のクエリパラメータ
#[derive(Debug, Deserialize)]
struct MethodOverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// `_method` クエリパラメータからメソッドを決定する
fn override_method<B>(request: &Request<B>) -> Option<Method> {
    let Query(query) = Query::<MethodOverrideQuery>::try_from_uri(request.uri()).ok()?;
    match query.method?.to_ascii_uppercase().as_str() {
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// メソッドオーバーライドミドルウェア
pub async fn method_override(mut request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::POST
        && let Some(method) = override_method(&request)
    {
        tracing::debug!(%method, "メソッドをオーバーライドします");
        *request.method_mut() = method;
    }

    next.run(request).await
}
