//! # インフラ層エラー定義
//!
//! PostgreSQL とのやり取りで発生するエラー。
//!
//! [`InfraError`] は種別（[`InfraErrorKind`]）に加えて、生成時点の
//! [`SpanTrace`] を保持する。リポジトリメソッドは `#[tracing::instrument]`
//! 付きなので、どの操作で失敗したかがスパンとして残る。
//! SpanTrace を記録するには subscriber に `tracing_error::ErrorLayer` が必要。

use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct InfraError {
    #[source]
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// SQL の実行失敗、接続・プール取得の失敗
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 上記に分類できない失敗
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    fn new(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::new(InfraErrorKind::Unexpected(msg.into()))
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::new(InfraErrorKind::Database(source))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    #[test]
    fn test_リポジトリのスパン内で生成するとspan_traceに残る() {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::debug_span!("delete_todo");
        let _enter = span.enter();

        let err = InfraError::from(sqlx::Error::PoolTimedOut);

        assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
        let trace = err.span_trace().to_string();
        assert!(trace.contains("delete_todo"), "SpanTrace: {trace}");
    }

    #[test]
    fn test_表示は種別のメッセージになる() {
        let err = InfraError::unexpected("ロック取得失敗");

        assert_eq!(err.to_string(), "予期しないエラー: ロック取得失敗");
    }

    #[test]
    fn test_sourceをたどるとsqlxのエラーに届く() {
        let err = InfraError::from(sqlx::Error::PoolTimedOut);

        let kind = err.source().unwrap();
        let root = kind.source().unwrap();

        assert!(root.downcast_ref::<sqlx::Error>().is_some());
    }
}
