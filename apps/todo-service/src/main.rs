//! # Todo Service サーバー
//!
//! Todo リストの CRUD を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `10`） |
//! | `COOKIE_SECURE` | No | `userid` Cookie に Secure 属性を付ける（デフォルト: `false`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,todo=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p todo-service
//!
//! # 本番環境
//! TODO_PORT=3000 DATABASE_URL=postgres://... LOG_FORMAT=json cargo run -p todo-service --release
//! ```
//!
//! テーブルは `migrations/` の DDL で事前に作成しておく。

use std::{net::SocketAddr, sync::Arc};

use todo_domain::clock::SystemClock;
use todo_infra::{db, repository::PostgresTodoRepository};
use todo_service::{app_builder::build_app, config::TodoConfig, middleware::CookieSettings};
use todo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Todo Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("todo-service");
    init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    // 設定読み込み
    let config = TodoConfig::from_env()?;

    tracing::info!(
        "Todo Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("データベースに接続しました");

    let app = build_app(
        Arc::new(PostgresTodoRepository::new(pool)),
        Arc::new(SystemClock),
        CookieSettings {
            secure: config.cookie_secure,
        },
    );

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Todo Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
