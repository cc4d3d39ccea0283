//! # Canonical Log Line
//!
//! リクエスト1件につき1行、メソッド・パス・ステータス・レイテンシと
//! リダイレクト先をまとめたサマリログを出力する tower Layer。
//!
//! TraceLayer の内側に置くと、リクエストスパンの `request_id` と `user_id` が
//! このログにも載る:
//!
//! ```text
//! SetRequestIdLayer → TraceLayer → CanonicalLogLineLayer → router
//! ```
//!
//! `/health` 配下はプローブが高頻度で叩くため出力しない。

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response, header};
use tower::{Layer, Service};

fn is_probe_path(path: &str) -> bool {
    path == "/health" || path.starts_with("/health/")
}

/// Canonical Log Line を出力する Layer
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

/// 1行サマリの材料
struct LineSummary {
    method: String,
    path:   String,
    start:  Instant,
}

impl LineSummary {
    fn emit<B>(&self, response: &Response<B>) {
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok());
        tracing::info!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.status_code = response.status().as_u16(),
            http.location = location,
            http.latency_ms = self.latency_ms(),
            "リクエスト完了"
        );
    }

    fn emit_error(&self, err: &dyn std::fmt::Display) {
        tracing::error!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.latency_ms = self.latency_ms(),
            error.message = %err,
            "リクエスト処理エラー"
        );
    }

    fn latency_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner で呼び、self にはクローンを残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if is_probe_path(req.uri().path()) {
            return Box::pin(inner.call(req));
        }

        let summary = LineSummary {
            method: req.method().to_string(),
            path:   req.uri().path().to_owned(),
            start:  Instant::now(),
        };

        Box::pin(async move {
            let result = inner.call(req).await;
            match &result {
                Ok(response) => summary.emit(response),
                Err(err) => summary.emit_error(err),
            }
            result
        })
    }
}
