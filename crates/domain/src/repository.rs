use async_trait::async_trait;

use crate::errors::TodoError;
use crate::todo::{TodoId, TodoItem, TodoUpdate, UserId};

/// ToDo の永続化操作
///
/// 各操作はストアへの単発の呼び出しで、リトライやキャッシュは行わない。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// ユーザーの全 ToDo を作成日時の昇順で取得する（ページングなし）
    async fn list_all(&self, user_id: &UserId) -> Result<Vec<TodoItem>, TodoError>;

    /// 複合キーで 1 件取得する
    async fn get(&self, todo_id: &TodoId, user_id: &UserId)
        -> Result<Option<TodoItem>, TodoError>;

    /// 無条件で保存する。同じキーは上書きされる
    async fn create(&self, item: &TodoItem) -> Result<(), TodoError>;

    /// name / dueDate / done を上書きする。存在しないキーは `TodoError::NotFound`
    async fn update(
        &self,
        todo_id: &TodoId,
        user_id: &UserId,
        update: &TodoUpdate,
    ) -> Result<(), TodoError>;

    /// 無条件で削除する。存在しないキーの削除も成功扱い
    async fn delete(&self, todo_id: &TodoId, user_id: &UserId) -> Result<(), TodoError>;
}
