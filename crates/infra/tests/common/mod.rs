//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用する時刻・エンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use todo_domain::todo::NewTodo;

/// テスト用の固定時刻（秒単位で進める）
pub fn test_at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

/// テスト用の作成内容
pub fn new_todo(text: &str, secs: i64) -> NewTodo {
    NewTodo {
        text:       text.to_string(),
        created_at: test_at(secs),
    }
}

/// テスト用の DATABASE_URL
pub fn database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set (check .env)")
}
