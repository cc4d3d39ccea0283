//! # Todo 共有ユーティリティ
//!
//! Todo サービスの全クレートで使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, todo-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - HTTP / トレーシング関連の依存は `observability` feature の裏に置く

pub mod api_response;
#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
