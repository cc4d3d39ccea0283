//! # リポジトリ
//!
//! - **依存性逆転**: ユースケース層はトレイトのみに依存する
//! - **データベース抽象化**: sqlx で PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
