use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::Client;
use domain::TodoError;
use shared::{Config, StoreEndpoint};
use tracing::info;

/// DynamoDB クライアントとテーブル設定
///
/// 接続先は `Config::store_endpoint` で起動時に一度だけ決まり、以降のリクエストで共有する。
#[derive(Clone)]
pub struct DynamoDbClient {
    client: Client,
    table_name: String,
    created_at_index: String,
}

impl DynamoDbClient {
    pub async fn new(config: &Config) -> Self {
        let loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        let loader = match &config.store_endpoint {
            StoreEndpoint::Managed => {
                info!(region = %config.aws_region, "マネージドDynamoDBに接続");
                loader.region(aws_config::Region::new(config.aws_region.clone()))
            }
            StoreEndpoint::Local { endpoint_url } => {
                info!(endpoint = %endpoint_url, "ローカルDynamoDBに接続");
                loader
                    .region(aws_config::Region::new("localhost"))
                    .endpoint_url(endpoint_url)
                    .credentials_provider(Credentials::new("local", "local", None, None, "local"))
            }
        };

        let sdk_config = loader.load().await;

        Self::from_client(
            Client::new(&sdk_config),
            &config.todos_table,
            &config.todos_created_at_index,
        )
    }

    pub fn from_client(client: Client, table_name: &str, created_at_index: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            created_at_index: created_at_index.to_string(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn created_at_index(&self) -> &str {
        &self.created_at_index
    }

    /// SDK エラーを原因の連鎖ごと文字列化して TodoError に変換
    pub fn convert_error<E, R>(&self, operation: &str, error: SdkError<E, R>) -> TodoError
    where
        E: std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        TodoError::DynamoDb(format!(
            "{operation} failed: {}",
            DisplayErrorContext(&error)
        ))
    }
}
