//! バックエンドAPIのリクエスト/レスポンス型

use serde::{Deserialize, Serialize};

use crate::interview::InterviewType;
use crate::session::{ResumeId, SessionId};

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// `/auth/me` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeUploadResponse {
    pub resume_id: ResumeId,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartSessionRequest {
    pub resume_id: ResumeId,
    pub interview_type: InterviewType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: SessionId,
}

/// `/interview/question` の生レスポンス
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 次の質問、または面接終了
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionReply {
    Question(String),
    Completed(String),
}

pub const DEFAULT_COMPLETION_MESSAGE: &str =
    "Interview completed! Thank you for your answers. Preparing your feedback...";

impl From<QuestionResponse> for QuestionReply {
    fn from(response: QuestionResponse) -> Self {
        let question = response
            .question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        match (response.completed.unwrap_or(false), question) {
            (false, Some(question)) => QuestionReply::Question(question),
            // 完了フラグ、または質問なしでメッセージのみの場合は終了扱い
            _ => QuestionReply::Completed(
                response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_COMPLETION_MESSAGE.to_string()),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest<'a> {
    pub session_id: SessionId,
    pub question: &'a str,
    pub answer: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub follow_up_question: Option<String>,
}

/// 回答送信の結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerReply {
    pub follow_up_question: Option<String>,
}

impl From<AnswerResponse> for AnswerReply {
    fn from(response: AnswerResponse) -> Self {
        Self {
            follow_up_question: response
                .follow_up_question
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
        }
    }
}
