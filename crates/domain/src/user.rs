//! # ユーザー識別子
//!
//! ブラウザごとに払い出す匿名ユーザー ID と、リクエストスコープの
//! コンテキスト [`Locals`] を定義する。

define_uuid_id! {
    /// 匿名ユーザーの識別子
    ///
    /// `userid` Cookie に保存され、同じブラウザからのリクエストを識別する。
    pub struct UserId;
}

/// リクエストローカルなコンテキスト
///
/// ミドルウェアが Cookie から組み立て、ハンドラは extensions 経由で受け取る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locals {
    pub userid: UserId,
}

impl Locals {
    pub fn new(userid: UserId) -> Self {
        Self { userid }
    }
}
