//! # Todo ハンドラ
//!
//! `/todos` と `/todos/{uid}` の全メソッドを1つのハンドラで受け、
//! ディスパッチャ（[`TodoUseCaseImpl::api`]）に委譲する。
//!
//! ## エンドポイント
//!
//! - `GET /todos` - Todo 一覧（`{ "data": [...] }`）
//! - `POST /todos` - Todo 作成 → 303 `/todos`
//! - `PATCH /todos/{uid}` - Todo 更新 → 303 `/todos`
//! - `DELETE /todos/{uid}` - Todo 削除 → 303 `/todos`
//! - その他のメソッド - 405（`Allow` ヘッダー付き）
//!
//! ペイロードは JSON とフォーム（`application/x-www-form-urlencoded`）の両方を受け付ける。
//! ユーザー識別ミドルウェアが格納した [`Locals`] を前提とする。

use std::sync::Arc;

use axum::{
    Extension,
    Form,
    Json,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{Method, Uri, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use todo_domain::{todo::Todo, user::Locals};
use todo_shared::ApiResponse;

use crate::{
    error::TodoError,
    usecase::{ApiOutcome, TodoMethod, TodoPayload, TodoUseCaseImpl},
};

/// Todo API の共有状態
pub struct TodoState {
    pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// JSON ペイロード
#[derive(Debug, Deserialize)]
struct JsonPayload {
    text: Option<String>,
    done: Option<bool>,
}

impl From<JsonPayload> for TodoPayload {
    fn from(body: JsonPayload) -> Self {
        Self {
            text: body.text,
            done: body.done,
        }
    }
}

/// フォームペイロード
///
/// チェックボックスは `on` を送るため、`done` は文字列で受けてから解釈する。
#[derive(Debug, Deserialize)]
struct FormPayload {
    text: Option<String>,
    done: Option<String>,
}

impl TryFrom<FormPayload> for TodoPayload {
    type Error = TodoError;

    fn try_from(form: FormPayload) -> Result<Self, Self::Error> {
        let done = match form.done.as_deref() {
            None => None,
            Some(value) => Some(parse_form_flag(value).ok_or_else(|| {
                TodoError::BadRequest(format!("done の値が不正です: {value}"))
            })?),
        };
        Ok(Self {
            text: form.text,
            done,
        })
    }
}

fn parse_form_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Content-Type に応じてデコードしたペイロード
///
/// - `POST` / `PATCH` / `DELETE` 以外はボディを読まずに `None`
///   （`GET` は無視、その他のメソッドはディスパッチャが 405 にする）
/// - `application/json`: 空ボディは `None`
/// - `application/x-www-form-urlencoded`: フォームとして解釈
/// - それ以外: 空ボディは `None`、中身があれば 415
#[derive(Debug)]
pub struct Payload(pub Option<TodoPayload>);

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = TodoError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !reads_body(req.method()) {
            return Ok(Self(None));
        }

        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/json" => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| TodoError::BadRequest(e.body_text()))?;
                if bytes.is_empty() {
                    return Ok(Self(None));
                }
                let Json(body) = Json::<JsonPayload>::from_bytes(&bytes)
                    .map_err(|e| TodoError::BadRequest(e.body_text()))?;
                Ok(Self(Some(body.into())))
            }
            "application/x-www-form-urlencoded" => {
                let Form(form) = Form::<FormPayload>::from_request(req, state)
                    .await
                    .map_err(|e| TodoError::BadRequest(e.body_text()))?;
                Ok(Self(Some(form.try_into()?)))
            }
            _ => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|e| TodoError::BadRequest(e.body_text()))?;
                if bytes.is_empty() {
                    return Ok(Self(None));
                }
                let mime = if mime.is_empty() { "(未指定)" } else { mime.as_str() };
                Err(TodoError::UnsupportedMediaType(format!(
                    "Content-Type {mime} のボディは扱えません"
                )))
            }
        }
    }
}

/// ペイロードを使うメソッドか
fn reads_body(method: &Method) -> bool {
    matches!(
        method.as_str().parse::<TodoMethod>(),
        Ok(TodoMethod::Post | TodoMethod::Patch | TodoMethod::Delete)
    )
}

/// Todo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
    pub uid:        String,
    pub created_at: String,
    pub text:       String,
    pub done:       bool,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            uid:        todo.uid().to_string(),
            created_at: todo.created_at().to_rfc3339(),
            text:       todo.text().to_string(),
            done:       todo.done(),
        }
    }
}

// --- ハンドラ ---

/// ANY /todos, ANY /todos/{uid}
///
/// ## レスポンス
///
/// - `200 OK`: `GET` の一覧
/// - `303 See Other`: 変更系メソッドの成功
/// - `400 Bad Request`: ペイロード不正、`text` 欠落
/// - `404 Not Found`: uid に一致する Todo が無い
/// - `405 Method Not Allowed`: 対応していないメソッド
/// - `415 Unsupported Media Type`: JSON・フォーム以外のボディ
#[tracing::instrument(
    skip_all,
    fields(%method, path = %uri.path(), user_id = %locals.userid)
)]
pub async fn todos(
    State(state): State<Arc<TodoState>>,
    Extension(locals): Extension<Locals>,
    method: Method,
    uri: Uri,
    Payload(payload): Payload,
) -> Result<Response, TodoError> {
    let outcome = state
        .usecase
        .api(method.as_str(), uri.path(), payload)
        .await?;

    let response = match outcome {
        ApiOutcome::Body { status, todos } => {
            let items: Vec<TodoDto> = todos.iter().map(TodoDto::from).collect();
            (status, Json(ApiResponse::new(items))).into_response()
        }
        ApiOutcome::Redirect { location } => Redirect::to(location).into_response(),
    };
    Ok(response)
}
