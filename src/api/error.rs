//! APIエラー型
//!
//! バックエンドのエラーレスポンスを分類し、画面にそのまま表示できる1行の文言へ変換します。

use serde::Deserialize;
use std::collections::BTreeMap;

/// フィールド単位の検証エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// APIエラー型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401（セッションはクリア済み、サインインへ遷移済み）
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("credential rejected"))]
    Unauthorized { message: Option<String> },

    /// バックエンドの構造化された検証エラー
    #[error("Validation failed: {}", join_fields(fields))]
    Validation { fields: Vec<FieldError> },

    /// その他の非成功ステータス
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";
const NETWORK_MESSAGE: &str = "Unable to reach the server. Please check your connection.";
const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// FastAPI形式のエラーボディ
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Items(Vec<DetailItem>),
}

#[derive(Debug, Deserialize)]
struct DetailItem {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl ApiError {
    /// 非成功レスポンスのボディから分類
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();

        match parsed {
            Some(ErrorBody {
                detail: Some(Detail::Items(items)),
                ..
            }) if !items.is_empty() => ApiError::Validation {
                fields: items.into_iter().map(DetailItem::into_field_error).collect(),
            },
            Some(ErrorBody {
                detail: Some(Detail::Message(message)),
                ..
            })
            | Some(ErrorBody {
                message: Some(message),
                ..
            }) => ApiError::Rejected { status, message },
            _ => ApiError::Rejected {
                status,
                message: GENERIC_MESSAGE.to_string(),
            },
        }
    }

    /// 401用。ボディにメッセージがあれば保持する
    pub fn unauthorized(body: &str) -> Self {
        let message = match ApiError::from_response(401, body) {
            ApiError::Rejected { message, .. } if message != GENERIC_MESSAGE => Some(message),
            _ => None,
        };
        ApiError::Unauthorized { message }
    }

    /// フィールドごとにメッセージを `", "` で連結
    pub fn field_messages(&self) -> BTreeMap<String, String> {
        let mut grouped: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        if let ApiError::Validation { fields } = self {
            for field in fields {
                grouped
                    .entry(field.field.clone())
                    .or_default()
                    .push(&field.message);
            }
        }
        grouped
            .into_iter()
            .map(|(field, messages)| (field, messages.join(", ")))
            .collect()
    }

    /// 画面に表示する1行の文言
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { message } => message
                .clone()
                .unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
            ApiError::Validation { .. } => self
                .field_messages()
                .into_iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect::<Vec<_>>()
                .join("; "),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
            ApiError::Decode(_) => GENERIC_MESSAGE.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl DetailItem {
    fn into_field_error(self) -> FieldError {
        // loc は ["body", "email"] の形。"body" などの位置情報を除いた末尾を採用
        let field = self
            .loc
            .iter()
            .rev()
            .find_map(|v| v.as_str())
            .filter(|s| !matches!(*s, "body" | "query" | "path"))
            .unwrap_or("request")
            .to_string();
        FieldError {
            field,
            message: self.msg,
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}
