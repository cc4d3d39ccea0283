//! # Todo インフラ層
//!
//! 外部システム（PostgreSQL）との接続を担当する。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその PostgreSQL 実装を提供する。
//! ユースケース層はトレイト経由でのみ永続化にアクセスし、テストでは
//! インメモリのモック（`test-utils` feature）に差し替える。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プール
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装
//! - `mock` - テスト用インメモリリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::{db, repository::PostgresTodoRepository};
//!
//! let pool = db::create_pool("postgres://localhost/todo", 10).await?;
//! let repository = PostgresTodoRepository::new(pool);
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
