//! # Observability 基盤
//!
//! - サブスクライバの初期化（`RUST_LOG` フィルタ + `LOG_FORMAT` 出力形式）
//! - UUID v7 による Request ID 生成
//! - HTTP リクエストスパンの構築
//!
//! 環境変数の読み取りは `from_lookup` に集約し、テストでは任意の
//! ルックアップ関数を渡して検証する。

use std::str::FromStr;

/// Request ID を運ぶ HTTP ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,todo=debug";

/// ログ出力形式
///
/// `LOG_FORMAT` の値を大文字小文字を区別せずに解釈する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1行1イベントの JSON（本番環境向け）
    Json,
    /// 人間向けの整形出力（開発環境向け）
    #[default]
    Pretty,
}

/// 解釈できない `LOG_FORMAT` の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// サービス名（起動時のルートスパンに付与する）
    pub service_name: String,
    pub log_format:   LogFormat,
    /// `RUST_LOG` 未設定時に使うフィルタ
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// 環境変数 `LOG_FORMAT` から出力形式を決定する
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// 任意のルックアップ関数から設定を組み立てる
    ///
    /// `LOG_FORMAT` が不正な場合は Pretty にフォールバックし、stderr に警告を出す
    /// （この時点ではまだ subscriber が無い）。
    pub fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let log_format = match lookup("LOG_FORMAT").map(|v| v.parse::<LogFormat>()) {
            None => LogFormat::default(),
            Some(Ok(format)) => format,
            Some(Err(UnknownLogFormat(value))) => {
                eprintln!("WARNING: unknown LOG_FORMAT={value:?}, falling back to pretty");
                LogFormat::default()
            }
        };
        Self::new(service_name, log_format)
    }
}

/// トレーシングを初期化する
///
/// `RUST_LOG` が設定されていればそれを、無ければ `default_filter` を使う。
/// `tracing_error::ErrorLayer` も登録し、インフラ層エラーが
/// 生成時点の SpanTrace を捕捉できるようにする。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_filter.as_str().into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

/// UUID v7 で Request ID を生成する
///
/// `SetRequestIdLayer` はクライアント提供の `x-request-id` を優先するため、
/// 生成はヘッダーが無いリクエストに限られる。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let value = http::HeaderValue::try_from(uuid::Uuid::now_v7().to_string()).ok()?;
        Some(tower_http::request_id::RequestId::new(value))
    }
}

/// `TraceLayer::make_span_with` に渡すリクエストスパン
///
/// `user_id` は空で作り、ユーザー識別ミドルウェアが後から記録する。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> TracingConfig {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        TracingConfig::from_lookup("todo-service", |key| {
            vars.get(key).map(|v| (*v).to_string())
        })
    }

    #[test]
    fn test_log_formatは大文字小文字を区別しない() {
        assert_eq!("json".parse(), Ok(LogFormat::Json));
        assert_eq!("JSON".parse(), Ok(LogFormat::Json));
        assert_eq!("Pretty".parse(), Ok(LogFormat::Pretty));
        assert_eq!(
            "yaml".parse::<LogFormat>(),
            Err(UnknownLogFormat("yaml".to_string()))
        );
    }

    #[test]
    fn test_log_format未設定ならprettyとデフォルトフィルタ() {
        let config = config_with(&[]);

        assert_eq!(
            config,
            TracingConfig {
                service_name:   "todo-service".to_string(),
                log_format:     LogFormat::Pretty,
                default_filter: "info,todo=debug".to_string(),
            }
        );
    }

    #[test]
    fn test_log_formatがjsonならjson出力() {
        assert_eq!(config_with(&[("LOG_FORMAT", "json")]).log_format, LogFormat::Json);
    }

    #[test]
    fn test_不正なlog_formatはprettyにフォールバックする() {
        assert_eq!(config_with(&[("LOG_FORMAT", "xml")]).log_format, LogFormat::Pretty);
    }
}

#[cfg(all(test, feature = "observability"))]
mod request_tests {
    use pretty_assertions::assert_eq;
    use tower_http::request_id::MakeRequestId;

    use super::*;

    #[test]
    fn test_make_request_uuid_v7がuuid_v7を生成する() {
        let request = http::Request::builder().uri("/todos").body(()).unwrap();

        let id = MakeRequestUuidV7.make_request_id(&request).unwrap();

        let uuid = uuid::Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[test]
    fn test_リクエストスパンの名前はrequest() {
        let subscriber = tracing_subscriber::registry();
        let _guard = tracing::subscriber::set_default(subscriber);
        let request = http::Request::builder()
            .uri("/todos?_method=DELETE")
            .header(REQUEST_ID_HEADER, "abc")
            .body(())
            .unwrap();

        let span = make_request_span(&request);

        assert_eq!(span.metadata().map(|m| m.name()), Some("request"));
    }
}
