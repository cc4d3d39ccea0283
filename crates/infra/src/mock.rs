//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use todo_domain::todo::{NewTodo, Todo, TodoChanges, TodoId};

use crate::{error::InfraError, repository::TodoRepository};

// ===== MockTodoRepository =====

/// インメモリの TodoRepository
///
/// `set_failing(true)` にすると全メソッドがエラーを返す。
/// `call_count()` で永続化層が呼ばれた回数を確認できる。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
    todos:   Arc<Mutex<Vec<Todo>>>,
    failing: Arc<AtomicBool>,
    calls:   Arc<AtomicUsize>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_todo(&self, todo: Todo) {
        self.todos.lock().unwrap().push(todo);
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<(), InfraError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("モックリポジトリの障害"));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        self.enter()?;
        let mut todos = self.todos();
        todos.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.uid().as_uuid().cmp(b.uid().as_uuid()))
        });
        Ok(todos)
    }

    async fn create(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
        self.enter()?;
        let todo = Todo::from_db(
            TodoId::new(),
            new_todo.created_at,
            new_todo.text.clone(),
            false,
        );
        self.todos.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn update(
        &self,
        uid: &TodoId,
        changes: &TodoChanges,
    ) -> Result<Option<Todo>, InfraError> {
        self.enter()?;
        let mut todos = self.todos.lock().unwrap();
        let Some(slot) = todos.iter_mut().find(|t| t.uid() == uid) else {
            return Ok(None);
        };
        let updated = slot.clone().apply(changes);
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, uid: &TodoId) -> Result<Option<Todo>, InfraError> {
        self.enter()?;
        let mut todos = self.todos.lock().unwrap();
        let Some(index) = todos.iter().position(|t| t.uid() == uid) else {
            return Ok(None);
        };
        Ok(Some(todos.remove(index)))
    }

    async fn ping(&self) -> Result<(), InfraError> {
        self.enter()
    }
}
