use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use domain::{TodoId, UserId};
use serde::de::DeserializeOwned;
use shared::AppError;

/// `/todos/{todoId}` のパスパラメータ名
pub const TODO_ID_PARAM: &str = "todoId";

/// 呼び出し元ユーザーを特定
pub fn caller_id(request: &ApiGatewayProxyRequest) -> Result<UserId, AppError> {
    shared::user_id_from_headers(&request.headers)
}

/// パスパラメータから TodoId を取り出す
pub fn path_todo_id(request: &ApiGatewayProxyRequest) -> Result<TodoId, AppError> {
    request
        .path_parameters
        .get(TODO_ID_PARAM)
        .filter(|id| !id.trim().is_empty())
        .map(|id| TodoId::from_string(id.clone()))
        .ok_or_else(|| {
            AppError::Validation(format!("パスパラメータ {TODO_ID_PARAM} がありません"))
        })
}

/// リクエストボディを JSON としてパース（Base64 エンコードされたボディにも対応）
pub fn json_body<T: DeserializeOwned>(request: &ApiGatewayProxyRequest) -> Result<T, AppError> {
    let body = request
        .body
        .as_deref()
        .filter(|body| !body.trim().is_empty())
        .ok_or_else(|| AppError::Deserialization("リクエストボディが必要です".to_string()))?;

    let parsed = if request.is_base64_encoded {
        let decoded = STANDARD
            .decode(body)
            .map_err(|e| AppError::Deserialization(format!("Base64 のデコードに失敗: {e}")))?;
        serde_json::from_slice(&decoded)
    } else {
        serde_json::from_str(body)
    };

    parsed.map_err(|e| AppError::Deserialization(format!("リクエストボディのパースエラー: {e}")))
}
