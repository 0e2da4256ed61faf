use std::future::Future;

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN, VARY,
};
use http::{HeaderMap, HeaderValue};
use lambda_runtime::{Error, LambdaEvent};
use shared::{AppError, Config, ErrorResponse};
use tracing::info;

/// CORS 設定
#[derive(Debug, Clone)]
pub struct Cors {
    pub allow_origin: String,
    pub allow_credentials: bool,
}

impl Default for Cors {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_credentials: true,
        }
    }
}

impl Cors {
    /// レスポンスヘッダーに CORS ヘッダーを追加
    ///
    /// 資格情報を許可する場合、ワイルドカードはブラウザに拒否されるのでリクエストの Origin を返す。
    pub fn apply(&self, headers: &mut HeaderMap, request_origin: Option<&str>) {
        let origin = match request_origin {
            Some(origin) if self.allow_credentials && self.allow_origin == "*" => {
                headers.insert(VARY, HeaderValue::from_static("Origin"));
                origin
            }
            _ => self.allow_origin.as_str(),
        };

        let origin =
            HeaderValue::from_str(origin).unwrap_or_else(|_| HeaderValue::from_static("*"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);

        if self.allow_credentials {
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
    }
}

/// 全ハンドラー共通のミドルウェア（CORS とエラーレスポンス変換）
#[derive(Debug, Clone, Default)]
pub struct Middleware {
    pub cors: Cors,
    pub include_error_details: bool,
}

impl Middleware {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cors: Cors::default(),
            include_error_details: config.include_error_details(),
        }
    }

    /// Lambda イベントを受け取り、ハンドラーを実行する
    ///
    /// アプリケーションエラーはすべて HTTP レスポンスに変換するので、Lambda としては失敗しない。
    pub async fn handle<F, Fut>(
        &self,
        event: LambdaEvent<ApiGatewayProxyRequest>,
        handler: F,
    ) -> Result<ApiGatewayProxyResponse, Error>
    where
        F: FnOnce(ApiGatewayProxyRequest) -> Fut,
        Fut: Future<Output = Result<ApiGatewayProxyResponse, AppError>>,
    {
        let (request, context) = event.into_parts();
        Ok(self.process(request, &context.request_id, handler).await)
    }

    pub async fn process<F, Fut>(
        &self,
        request: ApiGatewayProxyRequest,
        request_id: &str,
        handler: F,
    ) -> ApiGatewayProxyResponse
    where
        F: FnOnce(ApiGatewayProxyRequest) -> Fut,
        Fut: Future<Output = Result<ApiGatewayProxyResponse, AppError>>,
    {
        let origin = request
            .headers
            .get(ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        info!(
            method = %request.http_method,
            path = request.path.as_deref().unwrap_or_default(),
            request_id,
            "リクエスト受信"
        );

        let mut response = match handler(request).await {
            Ok(response) => response,
            Err(error) => {
                error.log(request_id);
                self.error_response(&error, request_id)
            }
        };

        self.cors.apply(&mut response.headers, origin.as_deref());

        info!(status = response.status_code, request_id, "レスポンス送信");
        response
    }

    /// AppError を JSON エラーレスポンスに変換
    fn error_response(&self, error: &AppError, request_id: &str) -> ApiGatewayProxyResponse {
        let body = ErrorResponse::from_app_error(
            error,
            request_id.to_string(),
            self.include_error_details,
        )
        .to_json()
        .unwrap_or_else(|_| {
            r#"{"code":"SERIALIZATION_ERROR","message":"エラーレスポンスの生成に失敗しました"}"#
                .to_string()
        });

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        ApiGatewayProxyResponse {
            status_code: error.http_status_code(),
            headers,
            body: Some(Body::Text(body)),
            ..Default::default()
        }
    }
}
