//! プロセス内メモリを使う ToDo リポジトリ（テスト・ローカル実行用）

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{TodoError, TodoId, TodoItem, TodoRepository, TodoUpdate, UserId};
use tokio::sync::RwLock;

type Key = (UserId, TodoId);

/// 1 つの書き込みロックの下で上書きするので、同じキーへの同時更新は後勝ちになる。
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    items: Arc<RwLock<HashMap<Key, TodoItem>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_all(&self, user_id: &UserId) -> Result<Vec<TodoItem>, TodoError> {
        let items = self.items.read().await;

        let mut todos: Vec<TodoItem> = items
            .values()
            .filter(|item| &item.user_id == user_id)
            .cloned()
            .collect();
        // インデックスと同じく createdAt 昇順
        todos.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.todo_id.as_str().cmp(b.todo_id.as_str()))
        });

        Ok(todos)
    }

    async fn get(
        &self,
        todo_id: &TodoId,
        user_id: &UserId,
    ) -> Result<Option<TodoItem>, TodoError> {
        let items = self.items.read().await;
        Ok(items.get(&(user_id.clone(), todo_id.clone())).cloned())
    }

    async fn create(&self, item: &TodoItem) -> Result<(), TodoError> {
        let mut items = self.items.write().await;
        items.insert((item.user_id.clone(), item.todo_id.clone()), item.clone());
        Ok(())
    }

    async fn update(
        &self,
        todo_id: &TodoId,
        user_id: &UserId,
        update: &TodoUpdate,
    ) -> Result<(), TodoError> {
        let mut items = self.items.write().await;

        let item = items
            .get_mut(&(user_id.clone(), todo_id.clone()))
            .ok_or_else(|| TodoError::NotFound(todo_id.to_string()))?;
        item.apply(update);

        Ok(())
    }

    async fn delete(&self, todo_id: &TodoId, user_id: &UserId) -> Result<(), TodoError> {
        let mut items = self.items.write().await;
        items.remove(&(user_id.clone(), todo_id.clone()));
        Ok(())
    }
}
