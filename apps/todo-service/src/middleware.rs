//! # ミドルウェア
//!
//! - [`locals`]: `userid` Cookie からリクエストローカルなコンテキストを組み立てる
//! - [`method_override`]: HTML フォームの `?_method=` でメソッドを差し替える

pub mod locals;
pub mod method_override;

pub use locals::{CookieSettings, USERID_COOKIE, user_locals};
pub use method_override::method_override;
