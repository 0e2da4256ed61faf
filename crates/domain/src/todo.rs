use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ToDo の識別子（サーバー側で生成する ULID）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// 既存の ID 文字列から作成（パスパラメータ・ストアの値用）
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 呼び出し元ユーザーの識別子（トークンの sub クレーム）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザーごとの ToDo アイテム
///
/// `(user_id, todo_id)` で一意に識別される。`created_at` は作成後に変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: UserId,
    pub todo_id: TodoId,
    #[serde(with = "millis_timestamp")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub due_date: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// 新しい未完了の ToDo を作成
    pub fn new(user_id: UserId, name: String, due_date: String) -> Self {
        Self {
            user_id,
            todo_id: TodoId::new(),
            created_at: now_millis(),
            name,
            due_date,
            done: false,
            attachment_url: None,
        }
    }

    /// 更新内容を上書き適用（部分更新はしない）
    pub fn apply(&mut self, update: &TodoUpdate) {
        self.name = update.name.clone();
        self.due_date = update.due_date.clone();
        self.done = update.done;
    }
}

/// ToDo 更新ペイロード（3 フィールドすべてを上書きする）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub name: String,
    pub due_date: String,
    pub done: bool,
}

/// ToDo 作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub name: String,
    pub due_date: String,
}

/// ミリ秒に丸めた現在時刻
///
/// インデックスのソートキーは固定長の RFC3339 文字列で保存するため、精度を揃えておく。
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ミリ秒固定の RFC3339 文字列（例: `2024-01-01T09:30:00.000Z`）
pub fn format_millis(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `createdAt` を常にミリ秒付きの固定長でシリアライズする
pub mod millis_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_millis(timestamp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&value)
            .map(|timestamp| timestamp.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
