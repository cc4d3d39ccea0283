//! # API レスポンスエンベロープ
//!
//! JSON を返すエンドポイントの統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 統一レスポンス型
///
/// Todo 一覧のように本文を返すレスポンスは `{ "data": T }` 形式で包む。
///
/// ## 使用例
///
/// ```
/// use todo_shared::ApiResponse;
///
/// let response = ApiResponse::new(vec!["牛乳を買う"]);
/// assert_eq!(response.data.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
