use domain::TodoError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// アプリケーション全体で使用されるエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    // インフラストラクチャエラー
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // 認証エラー
    #[error("Authentication failed: {0}")]
    Authentication(String),

    // ビジネスロジックエラー
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    // システムエラー
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// エラーの分類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// クライアントエラー（4xx相当）
    Client,
    /// サーバーエラー（5xx相当）
    Server,
    /// 一時的なエラー
    Transient,
}

/// エラーの重要度
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// エラーメタデータ
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
}

impl AppError {
    /// エラーメタデータを取得
    pub fn metadata(&self) -> ErrorMetadata {
        let (code, category, severity) = match self {
            AppError::DynamoDb(msg) => {
                if is_dynamodb_transient(msg) {
                    ("DYNAMODB_ERROR", ErrorCategory::Transient, ErrorSeverity::Warning)
                } else {
                    ("DYNAMODB_ERROR", ErrorCategory::Server, ErrorSeverity::Error)
                }
            }
            AppError::Serialization(_) => {
                ("SERIALIZATION_ERROR", ErrorCategory::Server, ErrorSeverity::Error)
            }
            AppError::Deserialization(_) => {
                ("INVALID_REQUEST_BODY", ErrorCategory::Client, ErrorSeverity::Info)
            }
            AppError::Authentication(_) => {
                ("AUTHENTICATION_ERROR", ErrorCategory::Client, ErrorSeverity::Warning)
            }
            AppError::NotFound(_) => ("NOT_FOUND", ErrorCategory::Client, ErrorSeverity::Info),
            AppError::Validation(_) => {
                ("VALIDATION_ERROR", ErrorCategory::Client, ErrorSeverity::Info)
            }
            AppError::Configuration(_) => {
                ("CONFIGURATION_ERROR", ErrorCategory::Server, ErrorSeverity::Critical)
            }
            AppError::Internal(_) => {
                ("INTERNAL_ERROR", ErrorCategory::Server, ErrorSeverity::Critical)
            }
        };

        ErrorMetadata {
            code,
            category,
            severity,
        }
    }

    /// HTTPステータスコードを取得
    pub fn http_status_code(&self) -> i64 {
        match self.metadata().category {
            ErrorCategory::Client => match self {
                AppError::NotFound(_) => 404,
                AppError::Authentication(_) => 401,
                _ => 400,
            },
            ErrorCategory::Server | ErrorCategory::Transient => 500,
        }
    }

    /// ユーザー向けメッセージを取得
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "リソースが見つかりません".to_string(),
            AppError::Authentication(_) => "認証に失敗しました".to_string(),
            AppError::Validation(_) | AppError::Deserialization(_) => {
                "入力データが無効です".to_string()
            }
            _ => "予期しないエラーが発生しました".to_string(),
        }
    }

    /// 重要度に応じたレベルでログに記録
    pub fn log(&self, request_id: &str) {
        let metadata = self.metadata();

        match metadata.severity {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                tracing::error!(
                    error = %self,
                    code = metadata.code,
                    category = ?metadata.category,
                    request_id,
                    "Error occurred"
                );
            }
            ErrorSeverity::Warning => {
                tracing::warn!(
                    error = %self,
                    code = metadata.code,
                    category = ?metadata.category,
                    request_id,
                    "Warning occurred"
                );
            }
            ErrorSeverity::Info => {
                tracing::info!(
                    error = %self,
                    code = metadata.code,
                    category = ?metadata.category,
                    request_id,
                    "Client error occurred"
                );
            }
        }
    }
}

impl From<TodoError> for AppError {
    fn from(error: TodoError) -> Self {
        match error {
            TodoError::NotFound(id) => AppError::NotFound(format!("Todo {id}")),
            TodoError::DynamoDb(msg) => AppError::DynamoDb(msg),
            TodoError::InvalidItem(msg) => AppError::Internal(msg),
        }
    }
}

/// スロットリングなど一時的な DynamoDB エラーかどうかを判定
fn is_dynamodb_transient(error_message: &str) -> bool {
    let transient_errors = [
        "ThrottlingException",
        "ProvisionedThroughputExceededException",
        "ServiceUnavailable",
        "InternalServerError",
        "RequestLimitExceeded",
    ];

    transient_errors
        .iter()
        .any(|&err| error_message.contains(err))
}

/// 標準化されたエラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// エラーコード
    pub code: String,
    /// ユーザー向けメッセージ
    pub message: String,
    /// 詳細情報（開発環境のみ）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub request_id: String,
    pub timestamp: String,
}

impl ErrorResponse {
    /// AppErrorからErrorResponseを作成
    pub fn from_app_error(error: &AppError, request_id: String, include_details: bool) -> Self {
        Self {
            code: error.metadata().code.to_string(),
            message: error.user_message(),
            details: include_details.then(|| error.to_string()),
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self).map_err(|e| AppError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata() {
        let metadata = AppError::NotFound("test".to_string()).metadata();

        assert_eq!(metadata.code, "NOT_FOUND");
        assert_eq!(metadata.category, ErrorCategory::Client);
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(AppError::NotFound("test".to_string()).http_status_code(), 404);
        assert_eq!(
            AppError::Authentication("test".to_string()).http_status_code(),
            401
        );
        assert_eq!(AppError::Validation("test".to_string()).http_status_code(), 400);
        assert_eq!(
            AppError::Deserialization("test".to_string()).http_status_code(),
            400
        );
        assert_eq!(AppError::Internal("test".to_string()).http_status_code(), 500);
        assert_eq!(
            AppError::DynamoDb("ThrottlingException: Rate exceeded".to_string())
                .http_status_code(),
            500
        );
    }

    #[test]
    fn test_todo_error_conversion_keeps_cause() {
        let error: AppError =
            TodoError::DynamoDb("DeleteItem failed: connection refused".to_string()).into();

        assert_eq!(
            error,
            AppError::DynamoDb("DeleteItem failed: connection refused".to_string())
        );

        let error: AppError = TodoError::NotFound("01HX".to_string()).into();
        assert_eq!(error.http_status_code(), 404);
    }

    #[test]
    fn test_error_response_creation() {
        let error = AppError::NotFound("Todo not found".to_string());
        let response = ErrorResponse::from_app_error(&error, "req-123".to_string(), false);

        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "リソースが見つかりません");
        assert_eq!(response.request_id, "req-123");
        assert!(response.details.is_none());

        let json = response.to_json().unwrap();
        assert!(json.contains("\"requestId\":\"req-123\""));
    }

    #[test]
    fn test_error_response_with_details() {
        let error = AppError::DynamoDb("ThrottlingException".to_string());
        let response = ErrorResponse::from_app_error(&error, "req-1".to_string(), true);

        assert_eq!(
            response.details.as_deref(),
            Some("DynamoDB error: ThrottlingException")
        );
    }

    #[test]
    fn test_dynamodb_transient_detection() {
        assert!(is_dynamodb_transient("ThrottlingException: Rate exceeded"));
        assert!(is_dynamodb_transient("ServiceUnavailable"));
        assert!(!is_dynamodb_transient("ValidationException: Invalid input"));
    }
}
