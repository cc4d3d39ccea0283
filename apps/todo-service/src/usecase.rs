//! # ユースケース層
//!
//! Todo Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと時計を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは HTTP の入出力変換のみ行い、分岐はユースケースに集約

pub mod todo;

pub use todo::{ApiOutcome, TodoBody, TodoCommand, TodoMethod, TodoPayload, TodoUseCaseImpl};
