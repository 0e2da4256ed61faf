use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use domain::{CreateTodoRequest, TodoItem, TodoService, TodoUpdate};
use serde::{Deserialize, Serialize};
use shared::AppError;

use crate::request::{caller_id, json_body, path_todo_id};
use crate::response::{empty_response, json_response};

/// ToDo一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub items: Vec<TodoItem>,
}

/// ToDo作成レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedTodoResponse {
    pub item: TodoItem,
}

/// ToDo更新レスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedTodoResponse {
    pub updated_todo_item: TodoUpdate,
}

/// GET /todos
pub async fn get_todos(
    request: ApiGatewayProxyRequest,
    service: TodoService,
) -> Result<ApiGatewayProxyResponse, AppError> {
    let user_id = caller_id(&request)?;

    let items = service.list_todos(&user_id).await?;

    json_response(200, &TodoListResponse { items })
}

/// POST /todos
pub async fn create_todo(
    request: ApiGatewayProxyRequest,
    service: TodoService,
) -> Result<ApiGatewayProxyResponse, AppError> {
    let user_id = caller_id(&request)?;
    let new_todo: CreateTodoRequest = json_body(&request)?;

    let item = service.create_todo(&user_id, new_todo).await?;

    json_response(200, &CreatedTodoResponse { item })
}

/// PATCH /todos/{todoId}
pub async fn update_todo(
    request: ApiGatewayProxyRequest,
    service: TodoService,
) -> Result<ApiGatewayProxyResponse, AppError> {
    let user_id = caller_id(&request)?;
    let todo_id = path_todo_id(&request)?;
    let update: TodoUpdate = json_body(&request)?;

    let updated_todo_item = service.update_todo(&todo_id, &user_id, update).await?;

    json_response(200, &UpdatedTodoResponse { updated_todo_item })
}

/// DELETE /todos/{todoId}
pub async fn delete_todo(
    request: ApiGatewayProxyRequest,
    service: TodoService,
) -> Result<ApiGatewayProxyResponse, AppError> {
    let user_id = caller_id(&request)?;
    let todo_id = path_todo_id(&request)?;

    service.delete_todo(&todo_id, &user_id).await?;

    Ok(empty_response(200))
}
