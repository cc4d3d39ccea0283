//! # Todo ディスパッチャ
//!
//! HTTP メソッド・リソースパス・ペイロードの組を、ちょうど1回の永続化操作に
//! 変換し、その結果を HTTP 応答の形に整える。
//!
//! | メソッド | 操作 | ステータス |
//! |---------|------|-----------|
//! | `GET` | 全件取得 | 200 |
//! | `POST` | 作成 | 201 |
//! | `PATCH` | 末尾セグメントの uid を部分更新 | 200 |
//! | `DELETE` | 末尾セグメントの uid を削除 | 200 |
//!
//! `GET` 以外は操作が成功すると結果を捨てて `/todos` への
//! 303 See Other に置き換える（HTML フォームの送信後遷移）。
//! 失敗した操作はリダイレクトせずエラーとして返す。

use std::sync::Arc;

use axum::http::StatusCode;
use strum::EnumString;
use todo_domain::{
    DomainError,
    clock::Clock,
    todo::{NewTodo, Todo, TodoChanges, TodoId},
};
use todo_infra::repository::TodoRepository;

use crate::error::TodoError;

/// 変更系メソッドのリダイレクト先
pub const TODOS_LOCATION: &str = "/todos";

/// ディスパッチャが扱う HTTP メソッド
///
/// 大文字小文字を区別せずにパースする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum TodoMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// リクエストペイロード
///
/// JSON とフォームのどちらから来ても同じ形に正規化される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPayload {
    pub text: Option<String>,
    pub done: Option<bool>,
}

/// 解決済みの永続化操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoCommand {
    List,
    Create { text: Option<String> },
    Update { uid: String, changes: TodoChanges },
    Delete { uid: String },
}

impl TodoCommand {
    /// メソッドとリソースパスから操作を決定する
    ///
    /// 対応していないメソッドは [`TodoError::MethodNotAllowed`]。
    /// この時点では永続化層に触れない。
    pub fn resolve(
        method: &str,
        resource: &str,
        payload: Option<TodoPayload>,
    ) -> Result<Self, TodoError> {
        let method: TodoMethod = method.parse().map_err(|_| {
            TodoError::MethodNotAllowed(format!("{method} メソッドには対応していません"))
        })?;
        let payload = payload.unwrap_or_default();

        Ok(match method {
            TodoMethod::Get => Self::List,
            TodoMethod::Post => Self::Create { text: payload.text },
            TodoMethod::Patch => Self::Update {
                uid:     trailing_segment(resource).to_string(),
                changes: TodoChanges {
                    text: payload.text,
                    done: payload.done,
                },
            },
            TodoMethod::Delete => Self::Delete {
                uid: trailing_segment(resource).to_string(),
            },
        })
    }
}

/// 永続化操作の結果
///
/// `Item` は変更系の結果で、応答ではリダイレクトに置き換わる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoBody {
    List(Vec<Todo>),
    Item(Todo),
}

/// ディスパッチの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    /// 一覧をステータスとともに返す
    Body { status: StatusCode, todos: Vec<Todo> },
    /// 303 See Other
    Redirect { location: &'static str },
}

/// リソースパスの最後の `/` 以降を返す
pub fn trailing_segment(resource: &str) -> &str {
    resource
        .rsplit_once('/')
        .map_or(resource, |(_, segment)| segment)
}

/// Todo ディスパッチャのユースケース
pub struct TodoUseCaseImpl {
    todo_repository: Arc<dyn TodoRepository>,
    clock:           Arc<dyn Clock>,
}

impl TodoUseCaseImpl {
    pub fn new(todo_repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            todo_repository,
            clock,
        }
    }

    /// リクエストを1回の永続化操作にディスパッチする
    #[tracing::instrument(skip_all, level = "debug", fields(%method, %resource))]
    pub async fn api(
        &self,
        method: &str,
        resource: &str,
        payload: Option<TodoPayload>,
    ) -> Result<ApiOutcome, TodoError> {
        let command = TodoCommand::resolve(method, resource, payload)?;

        match self.execute(command).await? {
            (status, TodoBody::List(todos)) => Ok(ApiOutcome::Body { status, todos }),
            (status, TodoBody::Item(todo)) => {
                tracing::debug!(
                    %status,
                    uid = %todo.uid(),
                    "操作が完了したため一覧へリダイレクトする"
                );
                Ok(ApiOutcome::Redirect {
                    location: TODOS_LOCATION,
                })
            }
        }
    }

    async fn execute(&self, command: TodoCommand) -> Result<(StatusCode, TodoBody), TodoError> {
        match command {
            TodoCommand::List => {
                let todos = self.todo_repository.find_all().await?;
                Ok((StatusCode::OK, TodoBody::List(todos)))
            }
            TodoCommand::Create { text } => {
                let new_todo = NewTodo::new(text, self.clock.now())?;
                let todo = self.todo_repository.create(&new_todo).await?;
                Ok((StatusCode::CREATED, TodoBody::Item(todo)))
            }
            TodoCommand::Update { uid, changes } => {
                let id = parse_uid(&uid)?;
                let todo = self
                    .todo_repository
                    .update(&id, &changes)
                    .await?
                    .ok_or_else(|| todo_not_found(&uid))?;
                Ok((StatusCode::OK, TodoBody::Item(todo)))
            }
            TodoCommand::Delete { uid } => {
                let id = parse_uid(&uid)?;
                let todo = self
                    .todo_repository
                    .delete(&id)
                    .await?
                    .ok_or_else(|| todo_not_found(&uid))?;
                Ok((StatusCode::OK, TodoBody::Item(todo)))
            }
        }
    }
}

/// UUID として解釈できない uid はどのレコードとも一致しない
fn parse_uid(uid: &str) -> Result<TodoId, TodoError> {
    TodoId::parse(uid).ok_or_else(|| todo_not_found(uid))
}

fn todo_not_found(uid: &str) -> TodoError {
    DomainError::NotFound {
        entity_type: "Todo",
        id:          uid.to_string(),
    }
    .into()
}
