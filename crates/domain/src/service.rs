use std::sync::Arc;

use tracing::info;

use crate::errors::TodoError;
use crate::repository::TodoRepository;
use crate::todo::{CreateTodoRequest, TodoId, TodoItem, TodoUpdate, UserId};

/// ToDo のビジネスロジック層
///
/// リポジトリは起動時に一度だけ構築して注入する。
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_todos(&self, user_id: &UserId) -> Result<Vec<TodoItem>, TodoError> {
        let items = self.repository.list_all(user_id).await?;
        info!(user_id = %user_id, count = items.len(), "ToDo一覧取得");
        Ok(items)
    }

    pub async fn get_todo(
        &self,
        todo_id: &TodoId,
        user_id: &UserId,
    ) -> Result<Option<TodoItem>, TodoError> {
        self.repository.get(todo_id, user_id).await
    }

    /// ID と作成日時を採番して保存する
    pub async fn create_todo(
        &self,
        user_id: &UserId,
        request: CreateTodoRequest,
    ) -> Result<TodoItem, TodoError> {
        let item = TodoItem::new(user_id.clone(), request.name, request.due_date);
        self.repository.create(&item).await?;

        info!(user_id = %user_id, todo_id = %item.todo_id, "ToDo作成");
        Ok(item)
    }

    /// 更新内容をそのまま返す
    pub async fn update_todo(
        &self,
        todo_id: &TodoId,
        user_id: &UserId,
        update: TodoUpdate,
    ) -> Result<TodoUpdate, TodoError> {
        self.repository.update(todo_id, user_id, &update).await?;

        info!(user_id = %user_id, todo_id = %todo_id, done = update.done, "ToDo更新");
        Ok(update)
    }

    pub async fn delete_todo(&self, todo_id: &TodoId, user_id: &UserId) -> Result<(), TodoError> {
        self.repository.delete(todo_id, user_id).await?;

        info!(user_id = %user_id, todo_id = %todo_id, "ToDo削除");
        Ok(())
    }
}
