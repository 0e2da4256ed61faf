use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use domain::{TodoError, TodoId, TodoItem, UserId};
use std::collections::HashMap;

/// テーブルの属性名
pub mod attributes {
    pub const USER_ID: &str = "userId";
    pub const TODO_ID: &str = "todoId";
    pub const CREATED_AT: &str = "createdAt";
    pub const NAME: &str = "name";
    pub const DUE_DATE: &str = "dueDate";
    pub const DONE: &str = "done";
    pub const ATTACHMENT_URL: &str = "attachmentUrl";
}

/// 複合主キー `(userId, todoId)` を作成
pub fn todo_key(todo_id: &TodoId, user_id: &UserId) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            attributes::USER_ID.to_string(),
            AttributeValue::S(user_id.as_str().to_string()),
        ),
        (
            attributes::TODO_ID.to_string(),
            AttributeValue::S(todo_id.as_str().to_string()),
        ),
    ])
}

/// createdAt をソート可能な固定長文字列に変換
pub fn format_created_at(created_at: &DateTime<Utc>) -> String {
    domain::format_millis(created_at)
}

/// TodoItem を DynamoDB AttributeValue マップに変換
pub fn to_attribute_map(item: &TodoItem) -> HashMap<String, AttributeValue> {
    let mut map = todo_key(&item.todo_id, &item.user_id);

    map.insert(
        attributes::CREATED_AT.to_string(),
        AttributeValue::S(format_created_at(&item.created_at)),
    );
    map.insert(
        attributes::NAME.to_string(),
        AttributeValue::S(item.name.clone()),
    );
    map.insert(
        attributes::DUE_DATE.to_string(),
        AttributeValue::S(item.due_date.clone()),
    );
    map.insert(attributes::DONE.to_string(), AttributeValue::Bool(item.done));

    if let Some(url) = &item.attachment_url {
        map.insert(
            attributes::ATTACHMENT_URL.to_string(),
            AttributeValue::S(url.clone()),
        );
    }

    map
}

/// DynamoDB AttributeValue マップから TodoItem を復元
pub fn from_attribute_map(map: &HashMap<String, AttributeValue>) -> Result<TodoItem, TodoError> {
    let user_id = string_attr(map, attributes::USER_ID)?;
    let todo_id = string_attr(map, attributes::TODO_ID)?;

    let created_at_str = string_attr(map, attributes::CREATED_AT)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            TodoError::InvalidItem(format!("Invalid {}: {e}", attributes::CREATED_AT))
        })?;

    let done = map
        .get(attributes::DONE)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| missing(attributes::DONE))?;

    let attachment_url = map
        .get(attributes::ATTACHMENT_URL)
        .and_then(|v| v.as_s().ok())
        .cloned();

    Ok(TodoItem {
        user_id: UserId::from_string(user_id),
        todo_id: TodoId::from_string(todo_id),
        created_at,
        name: string_attr(map, attributes::NAME)?,
        due_date: string_attr(map, attributes::DUE_DATE)?,
        done,
        attachment_url,
    })
}

fn string_attr(map: &HashMap<String, AttributeValue>, name: &str) -> Result<String, TodoError> {
    map.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| missing(name))
}

fn missing(name: &str) -> TodoError {
    TodoError::InvalidItem(format!("Missing or invalid {name}"))
}
