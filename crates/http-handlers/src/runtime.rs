use std::future::Future;
use std::sync::Arc;

use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use domain::TodoService;
use infrastructure::{DynamoDbClient, DynamoDbTodoRepository};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::{init_tracing, AppError, Config};
use tracing::{error, info};

use crate::middleware::Middleware;

/// ウォームインスタンスの間で共有する依存関係
#[derive(Clone)]
pub struct App {
    pub service: TodoService,
    pub middleware: Arc<Middleware>,
}

impl App {
    pub fn new(service: TodoService, middleware: Middleware) -> Self {
        Self {
            service,
            middleware: Arc::new(middleware),
        }
    }

    /// 環境変数の設定から DynamoDB リポジトリを組み立てる（コールドスタート時に一度だけ）
    pub async fn from_config(config: &Config) -> Self {
        let db = DynamoDbClient::new(config).await;
        let repository = Arc::new(DynamoDbTodoRepository::new(db));

        Self::new(
            TodoService::new(repository),
            Middleware::from_config(config),
        )
    }
}

/// ハンドラーを Lambda ランタイムで起動する
pub async fn serve<H, Fut>(name: &'static str, handler: H) -> Result<(), Error>
where
    H: Fn(ApiGatewayProxyRequest, TodoService) -> Fut + Copy + Send + Sync + 'static,
    Fut: Future<Output = Result<ApiGatewayProxyResponse, AppError>> + Send,
{
    if let Err(e) = init_tracing() {
        eprintln!("トレーシング初期化エラー: {e}");
        // トレーシング初期化に失敗してもアプリケーションは継続
    }

    let config = Config::from_env().map_err(|e| {
        error!("設定読み込みエラー: {}", e);
        e
    })?;
    let app = App::from_config(&config).await;

    info!(
        handler = name,
        table = %config.todos_table,
        index = %config.todos_created_at_index,
        "Lambda を開始中..."
    );

    run(service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| {
        let app = app.clone();
        async move {
            app.middleware
                .handle(event, |request| handler(request, app.service.clone()))
                .await
        }
    }))
    .await
}
