//! # Todo
//!
//! Todo リストの1項目を表現するドメインモデル。
//!
//! ## ライフサイクル
//!
//! - 作成: 永続化層が `uid` を採番し、`done` は `false` で始まる
//! - 更新: 変更できるのは `text` と `done` のみ（[`TodoChanges`]）
//! - 削除: `uid` 指定で削除する
//!
//! `uid` と `created_at` は作成後に変わらない。

use chrono::{DateTime, Utc};

use crate::DomainError;

define_uuid_id! {
    /// Todo の一意識別子
    pub struct TodoId;
}

/// Todo エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    uid:        TodoId,
    created_at: DateTime<Utc>,
    text:       String,
    done:       bool,
}

impl Todo {
    /// データベースから Todo を復元する
    pub fn from_db(uid: TodoId, created_at: DateTime<Utc>, text: String, done: bool) -> Self {
        Self {
            uid,
            created_at,
            text,
            done,
        }
    }

    pub fn uid(&self) -> &TodoId {
        &self.uid
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn done(&self) -> bool {
        self.done
    }

    /// 変更内容を反映した Todo を返す
    ///
    /// `None` のフィールドは現在の値を維持する。
    pub fn apply(self, changes: &TodoChanges) -> Self {
        Self {
            text: changes.text.clone().unwrap_or(self.text),
            done: changes.done.unwrap_or(self.done),
            ..self
        }
    }
}

/// 作成する Todo の内容
///
/// `uid` は永続化層が採番するため持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub text:       String,
    pub created_at: DateTime<Utc>,
}

impl NewTodo {
    /// 作成内容を組み立てる
    ///
    /// `text` が無い場合はバリデーションエラー。空文字列は許容する。
    pub fn new(text: Option<String>, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let text = text.ok_or_else(|| DomainError::Validation("text は必須です".to_string()))?;
        Ok(Self {
            text,
            created_at: now,
        })
    }
}

/// Todo の更新内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub text: Option<String>,
    pub done: Option<bool>,
}
