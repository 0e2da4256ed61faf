use std::env;

use crate::errors::AppError;

const DEFAULT_CREATED_AT_INDEX: &str = "CreatedAtIndex";
const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:8000";
const DEFAULT_ENVIRONMENT: &str = "prod";

/// DynamoDB への接続先（起動時に一度だけ決定する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEndpoint {
    /// AWS のマネージド DynamoDB
    Managed,
    /// DynamoDB Local などのローカルエンドポイント
    Local { endpoint_url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub todos_table: String,
    pub todos_created_at_index: String,
    pub store_endpoint: StoreEndpoint,
    pub environment: String,
    pub aws_region: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let todos_table = lookup("TODOS_TABLE")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration("TODOS_TABLE が設定されていません".to_string())
            })?;

        let store_endpoint = if lookup("IS_OFFLINE").is_some_and(|v| is_truthy(&v)) {
            StoreEndpoint::Local {
                endpoint_url: lookup("DYNAMODB_LOCAL_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_LOCAL_ENDPOINT.to_string()),
            }
        } else {
            StoreEndpoint::Managed
        };

        Ok(Config {
            todos_table,
            todos_created_at_index: lookup("TODOS_CREATED_AT_INDEX")
                .unwrap_or_else(|| DEFAULT_CREATED_AT_INDEX.to_string()),
            store_endpoint,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        })
    }

    /// DynamoDB Local 向けのテスト用設定
    pub fn local(todos_table: &str, endpoint_url: &str) -> Self {
        Config {
            todos_table: todos_table.to_string(),
            todos_created_at_index: DEFAULT_CREATED_AT_INDEX.to_string(),
            store_endpoint: StoreEndpoint::Local {
                endpoint_url: endpoint_url.to_string(),
            },
            environment: "local".to_string(),
            aws_region: "localhost".to_string(),
        }
    }

    /// エラーレスポンスに詳細を含めるか（開発環境のみ）
    pub fn include_error_details(&self) -> bool {
        matches!(self.environment.as_str(), "dev" | "local")
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
