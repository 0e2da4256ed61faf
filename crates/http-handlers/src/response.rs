use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::ApiGatewayProxyResponse;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue};
use serde::Serialize;
use shared::AppError;

/// JSON ボディの成功レスポンスを作成
pub fn json_response(
    status_code: i64,
    body: &impl Serialize,
) -> Result<ApiGatewayProxyResponse, AppError> {
    let json = serde_json::to_string(body).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(ApiGatewayProxyResponse {
        status_code,
        headers,
        body: Some(Body::Text(json)),
        ..Default::default()
    })
}

/// ボディなしのレスポンスを作成
pub fn empty_response(status_code: i64) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code,
        body: Some(Body::Text(String::new())),
        ..Default::default()
    }
}
