//! # ドメイン層エラー定義
//!
//! ドメインルール違反を表現するエラー型。
//! API 層でこのエラーを受け取り、HTTP ステータスに変換する。
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `Validation` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// 入力値がドメインルールに違反している
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 指定された識別子のエンティティが存在しない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Todo" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
