use async_trait::async_trait;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use domain::{TodoError, TodoId, TodoItem, TodoRepository, TodoUpdate, UserId};
use tracing::debug;

use crate::models::{attributes, from_attribute_map, to_attribute_map, todo_key};
use crate::DynamoDbClient;

/// DynamoDB をストアとする ToDo リポジトリ
#[derive(Clone)]
pub struct DynamoDbTodoRepository {
    db: DynamoDbClient,
}

impl DynamoDbTodoRepository {
    pub fn new(db: DynamoDbClient) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    async fn list_all(&self, user_id: &UserId) -> Result<Vec<TodoItem>, TodoError> {
        debug!("ToDo一覧を取得中: user_id={}", user_id);

        let result = self
            .db
            .client()
            .query()
            .table_name(self.db.table_name())
            .index_name(self.db.created_at_index())
            .key_condition_expression("#userId = :userId")
            .expression_attribute_names("#userId", attributes::USER_ID)
            .expression_attribute_values(":userId", AttributeValue::S(user_id.as_str().to_string()))
            .send()
            .await
            .map_err(|e| self.db.convert_error("Query", e))?;

        let items = result
            .items()
            .iter()
            .map(from_attribute_map)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("ToDo一覧取得完了: {} 件", items.len());
        Ok(items)
    }

    async fn get(
        &self,
        todo_id: &TodoId,
        user_id: &UserId,
    ) -> Result<Option<TodoItem>, TodoError> {
        let result = self
            .db
            .client()
            .get_item()
            .table_name(self.db.table_name())
            .set_key(Some(todo_key(todo_id, user_id)))
            .send()
            .await
            .map_err(|e| self.db.convert_error("GetItem", e))?;

        result.item().map(from_attribute_map).transpose()
    }

    async fn create(&self, item: &TodoItem) -> Result<(), TodoError> {
        debug!("ToDoを保存中: todo_id={}", item.todo_id);

        self.db
            .client()
            .put_item()
            .table_name(self.db.table_name())
            .set_item(Some(to_attribute_map(item)))
            .send()
            .await
            .map_err(|e| self.db.convert_error("PutItem", e))?;

        Ok(())
    }

    async fn update(
        &self,
        todo_id: &TodoId,
        user_id: &UserId,
        update: &TodoUpdate,
    ) -> Result<(), TodoError> {
        debug!("ToDoを更新中: todo_id={}", todo_id);

        let result = self
            .db
            .client()
            .update_item()
            .table_name(self.db.table_name())
            .set_key(Some(todo_key(todo_id, user_id)))
            // 存在しないキーに部分的なレコードを作らない
            .condition_expression("attribute_exists(#todoId)")
            .update_expression("SET #name = :name, #dueDate = :dueDate, #done = :done")
            .expression_attribute_names("#todoId", attributes::TODO_ID)
            .expression_attribute_names("#name", attributes::NAME)
            .expression_attribute_names("#dueDate", attributes::DUE_DATE)
            .expression_attribute_names("#done", attributes::DONE)
            .expression_attribute_values(":name", AttributeValue::S(update.name.clone()))
            .expression_attribute_values(":dueDate", AttributeValue::S(update.due_date.clone()))
            .expression_attribute_values(":done", AttributeValue::Bool(update.done))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.as_service_error() {
                Some(UpdateItemError::ConditionalCheckFailedException(_)) => {
                    Err(TodoError::NotFound(todo_id.to_string()))
                }
                _ => Err(self.db.convert_error("UpdateItem", e)),
            },
        }
    }

    async fn delete(&self, todo_id: &TodoId, user_id: &UserId) -> Result<(), TodoError> {
        debug!("ToDoを削除中: todo_id={}", todo_id);

        self.db
            .client()
            .delete_item()
            .table_name(self.db.table_name())
            .set_key(Some(todo_key(todo_id, user_id)))
            .send()
            .await
            .map_err(|e| self.db.convert_error("DeleteItem", e))?;

        Ok(())
    }
}
