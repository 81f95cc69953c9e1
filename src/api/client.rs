//! バックエンドAPIクライアント
//!
//! すべてのリクエストに保存済みトークンをBearerとして付与し、
//! 401レスポンスを受けた場合はセッションをクリアしてサインイン画面へ遷移させたうえで
//! 呼び出し元へエラーを返します。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiResult};
use super::models::*;
use crate::config_manager::ApiConfig;
use crate::feedback::FeedbackReport;
use crate::interview::flow::InterviewBackend;
use crate::interview::InterviewType;
use crate::navigation::{Navigator, Route};
use crate::session::{ResumeId, SessionId, SessionStore};

/// バックエンドAPIクライアント
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// トークンを付与したリクエストを作成
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.session.credential() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// 送信してステータスを検査
    async fn send(&self, path: &str, builder: RequestBuilder) -> ApiResult<Response> {
        let started = std::time::Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::error!(path = path, "❌ [API] Request failed: {}", e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        tracing::debug!(
            path = path,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "📨 [API] Response received"
        );

        if status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            self.handle_unauthorized(path);
            return Err(ApiError::unauthorized(&body));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_response(status.as_u16(), &body);
            tracing::warn!(path = path, status = status.as_u16(), "⚠️ [API] {}", error);
            return Err(error);
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        builder: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.send(path, builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// 401: セッションをクリアしてサインインへ
    fn handle_unauthorized(&self, path: &str) {
        tracing::warn!(path = path, "🔒 [API] Unauthorized, clearing session");
        self.session.clear();
        self.navigator.navigate(Route::SignIn);
    }

    /// POST /auth/signup
    pub async fn signup(&self, full_name: &str, email: &str, password: &str) -> ApiResult<()> {
        let path = "/auth/signup";
        let body = SignupRequest {
            full_name,
            email,
            password,
        };
        self.send(path, self.request(Method::POST, path).json(&body))
            .await?;
        Ok(())
    }

    /// POST /auth/login（フォームエンコード）
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let path = "/auth/login";
        let builder = self
            .request(Method::POST, path)
            .form(&[("username", email), ("password", password)]);
        let token: TokenResponse = self.send_json(path, builder).await?;
        Ok(token.access_token)
    }

    /// GET /auth/me
    pub async fn me(&self) -> ApiResult<CurrentUser> {
        let path = "/auth/me";
        self.send_json(path, self.request(Method::GET, path)).await
    }

    /// POST /resume/upload（multipart）
    pub async fn upload_resume(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<ResumeId> {
        let path = "/resume/upload";
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(crate::forms::PDF_MIME)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response: ResumeUploadResponse = self
            .send_json(path, self.request(Method::POST, path).multipart(form))
            .await?;
        Ok(response.resume_id)
    }

    /// POST /interview-session/start
    pub async fn start_session(
        &self,
        resume_id: ResumeId,
        interview_type: InterviewType,
    ) -> ApiResult<SessionId> {
        let path = "/interview-session/start";
        let body = StartSessionRequest {
            resume_id,
            interview_type,
        };
        let response: StartSessionResponse = self
            .send_json(path, self.request(Method::POST, path).json(&body))
            .await?;
        Ok(response.session_id)
    }

    /// POST /interview/question
    ///
    /// 引数はボディではなくクエリ文字列で渡す。
    pub async fn next_question(
        &self,
        session_id: SessionId,
        interview_type: InterviewType,
        resume_id: ResumeId,
    ) -> ApiResult<QuestionReply> {
        let path = "/interview/question";
        let query = [
            ("session_id", session_id.to_string()),
            ("interview_type", interview_type.as_str().to_string()),
            ("resume_id", resume_id.to_string()),
        ];
        let response: QuestionResponse = self
            .send_json(path, self.request(Method::POST, path).query(&query))
            .await?;
        Ok(response.into())
    }

    /// POST /interview/answer
    pub async fn submit_answer(
        &self,
        session_id: SessionId,
        question: &str,
        answer: &str,
    ) -> ApiResult<AnswerReply> {
        let path = "/interview/answer";
        let body = AnswerRequest {
            session_id,
            question,
            answer,
        };
        let response: AnswerResponse = self
            .send_json(path, self.request(Method::POST, path).json(&body))
            .await?;
        Ok(response.into())
    }

    /// POST /interview/feedback?session_id=
    pub async fn feedback(&self, session_id: SessionId) -> ApiResult<FeedbackReport> {
        let path = "/interview/feedback";
        let query = [("session_id", session_id.to_string())];
        self.send_json(path, self.request(Method::POST, path).query(&query))
            .await
    }
}

#[async_trait]
impl InterviewBackend for ApiClient {
    async fn start_session(
        &self,
        resume_id: ResumeId,
        interview_type: InterviewType,
    ) -> ApiResult<SessionId> {
        ApiClient::start_session(self, resume_id, interview_type).await
    }

    async fn next_question(
        &self,
        session_id: SessionId,
        interview_type: InterviewType,
        resume_id: ResumeId,
    ) -> ApiResult<QuestionReply> {
        ApiClient::next_question(self, session_id, interview_type, resume_id).await
    }

    async fn submit_answer(
        &self,
        session_id: SessionId,
        question: &str,
        answer: &str,
    ) -> ApiResult<AnswerReply> {
        ApiClient::submit_answer(self, session_id, question, answer).await
    }

    async fn feedback(&self, session_id: SessionId) -> ApiResult<FeedbackReport> {
        ApiClient::feedback(self, session_id).await
    }
}
