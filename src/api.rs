pub mod client; // バックエンドAPIクライアント
pub mod error; // APIエラー分類
pub mod models; // リクエスト/レスポンス型

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, FieldError};
pub use models::{AnswerReply, CurrentUser, QuestionReply};
