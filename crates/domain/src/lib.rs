//! # Todo ドメイン層
//!
//! Todo サービスのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`todo`] - Todo エンティティと更新内容
//! - [`user`] - リクエストごとのユーザー識別子
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::todo::{Todo, TodoId};
//!
//! let todo = Todo::from_db(TodoId::new(), chrono::Utc::now(), "牛乳を買う".to_string(), false);
//! assert!(!todo.done());
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod todo;
pub mod user;

pub use error::DomainError;
