//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **採番は DB 側**: `uid` は `gen_random_uuid()` で生成する
//! - **部分更新**: `COALESCE` で `None` のフィールドを現在値のまま残す
//! - **存在しない uid**: 更新・削除は `Ok(None)` を返し、判定はユースケース層に委ねる

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use todo_domain::todo::{NewTodo, Todo, TodoChanges, TodoId};
use uuid::Uuid;

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// 全 Todo を作成日時順で取得する
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// Todo を作成し、採番済みのレコードを返す
    async fn create(&self, new_todo: &NewTodo) -> Result<Todo, InfraError>;

    /// 指定したフィールドだけを更新する
    ///
    /// 該当する Todo が無ければ `Ok(None)`。
    async fn update(&self, uid: &TodoId, changes: &TodoChanges)
    -> Result<Option<Todo>, InfraError>;

    /// Todo を削除し、削除したレコードを返す
    ///
    /// 該当する Todo が無ければ `Ok(None)`。
    async fn delete(&self, uid: &TodoId) -> Result<Option<Todo>, InfraError>;

    /// データベースへの疎通を確認する（readiness 用）
    async fn ping(&self) -> Result<(), InfraError>;
}

/// `todos` テーブルの1行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    uid:        Uuid,
    created_at: DateTime<Utc>,
    text:       String,
    done:       bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo::from_db(TodoId::from_uuid(row.uid), row.created_at, row.text, row.done)
    }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT uid, created_at, text, done
            FROM todos
            ORDER BY created_at ASC, uid ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (created_at, text, done)
            VALUES ($1, $2, FALSE)
            RETURNING uid, created_at, text, done
            "#,
        )
        .bind(new_todo.created_at)
        .bind(&new_todo.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%uid))]
    async fn update(
        &self,
        uid: &TodoId,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET text = COALESCE($2, text),
                done = COALESCE($3, done)
            WHERE uid = $1
            RETURNING uid, created_at, text, done
            "#,
        )
        .bind(uid.as_uuid())
        .bind(changes.text.as_deref())
        .bind(changes.done)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%uid))]
    async fn delete(&self, uid: &TodoId) -> Result<Option<Todo>, InfraError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            DELETE FROM todos
            WHERE uid = $1
            RETURNING uid, created_at, text, done
            "#,
        )
        .bind(uid.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn ping(&self) -> Result<(), InfraError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresTodoRepository>();
    }

    #[test]
    fn test_行データからtodoに変換できる() {
        let uid = Uuid::now_v7();
        let created_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let row = TodoRow {
            uid,
            created_at,
            text: "牛乳を買う".to_string(),
            done: true,
        };

        let todo = Todo::from(row);

        assert_eq!(todo.uid().as_uuid(), &uid);
        assert_eq!(todo.created_at(), created_at);
        assert_eq!(todo.text(), "牛乳を買う");
        assert!(todo.done());
    }
}
