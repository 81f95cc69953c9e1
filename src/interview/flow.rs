//! 面接チャットフロー
//!
//! 質問取得 → 回答待ち → 回答送信 →（深掘り質問があれば回答待ちへ、なければ次の質問取得）を
//! 繰り返し、バックエンドの完了通知でフィードバック画面へ進みます。
//!
//! メイン質問は5問（バックエンド側で制御）。深掘り質問はメイン質問のサブターンとして扱い、
//! 質問カウンターは進めません。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::models::{ChatMessage, ChatRole, InterviewType};
use crate::api::{AnswerReply, ApiResult, QuestionReply};
use crate::feedback::FeedbackReport;
use crate::navigation::{Navigator, Route};
use crate::session::{ResumeId, SessionId, SessionStore};
use crate::voice::VoicePlayback;

/// メイン質問数
pub const QUESTION_LIMIT: u32 = 5;

/// 完了メッセージ表示からフィードバック画面へ遷移するまでの待機時間
pub const COMPLETION_DELAY: Duration = Duration::from_secs(3);

/// 深掘り質問の連続回数の警告しきい値（デフォルト）
pub const DEFAULT_FOLLOW_UP_WARN_THRESHOLD: u32 = 3;

/// 面接関連のバックエンド操作
#[async_trait]
pub trait InterviewBackend: Send + Sync {
    async fn start_session(
        &self,
        resume_id: ResumeId,
        interview_type: InterviewType,
    ) -> ApiResult<SessionId>;

    async fn next_question(
        &self,
        session_id: SessionId,
        interview_type: InterviewType,
        resume_id: ResumeId,
    ) -> ApiResult<QuestionReply>;

    async fn submit_answer(
        &self,
        session_id: SessionId,
        question: &str,
        answer: &str,
    ) -> ApiResult<AnswerReply>;

    async fn feedback(&self, session_id: SessionId) -> ApiResult<FeedbackReport>;
}

/// フローの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// 面接タイプ未確定（フロー開始前）
    #[default]
    AwaitingType,
    FetchingQuestion,
    AwaitingAnswer,
    SubmittingAnswer,
    AwaitingFollowUpAnswer,
    Completed,
}

impl FlowState {
    /// 回答入力を受け付ける状態か
    pub fn accepts_answer(&self) -> bool {
        matches!(
            self,
            FlowState::AwaitingAnswer | FlowState::AwaitingFollowUpAnswer
        )
    }
}

/// フロー操作の前提条件エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Operation not allowed in state {0:?}")]
    InvalidState(FlowState),

    #[error("Please enter an answer before submitting")]
    EmptyAnswer,

    #[error("Nothing to retry")]
    NothingToRetry,
}

/// 再試行対象の操作
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingAction {
    FetchQuestion,
    SubmitAnswer(String),
}

/// フロー開始時の結果
pub enum EntryOutcome {
    Ready(InterviewFlow),
    /// 前提条件を満たさないためリダイレクト済み
    Redirected(Route),
}

/// フローが使用する依存
#[derive(Clone)]
pub struct FlowContext {
    pub backend: Arc<dyn InterviewBackend>,
    pub navigator: Arc<dyn Navigator>,
    pub store: SessionStore,
    pub playback: VoicePlayback,
    pub follow_up_warn_threshold: u32,
}

/// 面接チャットフロー
pub struct InterviewFlow {
    backend: Arc<dyn InterviewBackend>,
    navigator: Arc<dyn Navigator>,
    playback: VoicePlayback,
    resume_id: ResumeId,
    session_id: SessionId,
    interview_type: InterviewType,
    state: FlowState,
    messages: Vec<ChatMessage>,
    question_count: u32,
    current_question: Option<String>,
    follow_ups_in_row: u32,
    follow_up_warn_threshold: u32,
    error: Option<String>,
    pending: Option<PendingAction>,
}

impl InterviewFlow {
    /// 面接画面に入る
    ///
    /// 面接タイプはクエリ → 保存済みの値の順に解決します。面接タイプ・履歴書ID・
    /// セッションIDのいずれかが欠けている場合は面接設定画面へ遷移します。
    pub fn enter(context: FlowContext, query_type: Option<InterviewType>) -> EntryOutcome {
        let FlowContext {
            backend,
            navigator,
            store,
            playback,
            follow_up_warn_threshold,
        } = context;

        let interview_type = match query_type {
            Some(t) => {
                store.set_interview_type(t);
                Some(t)
            }
            None => store.interview_type(),
        };

        let (Some(interview_type), Some(resume_id), Some(session_id)) = (
            interview_type,
            store.resume_reference(),
            store.session_reference(),
        ) else {
            tracing::warn!(
                has_type = interview_type.is_some(),
                has_resume = store.resume_reference().is_some(),
                has_session = store.session_reference().is_some(),
                "⚠️ [INTERVIEW] Missing interview prerequisites, redirecting to setup"
            );
            navigator.navigate(Route::InterviewSetup);
            return EntryOutcome::Redirected(Route::InterviewSetup);
        };

        tracing::info!(
            session_id = %session_id,
            interview_type = %interview_type,
            "🎙️ [INTERVIEW] Entering interview chat"
        );

        EntryOutcome::Ready(Self {
            backend,
            navigator,
            playback,
            resume_id,
            session_id,
            interview_type,
            state: FlowState::FetchingQuestion,
            messages: Vec::new(),
            question_count: 0,
            current_question: None,
            follow_ups_in_row: 0,
            follow_up_warn_threshold,
            error: None,
            pending: None,
        })
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn interview_type(&self) -> InterviewType {
        self.interview_type
    }

    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    /// 回答済みのメイン質問数
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    /// 表示上の質問番号（1〜5）
    pub fn display_question_number(&self) -> u32 {
        (self.question_count + 1).min(QUESTION_LIMIT)
    }

    /// 進捗率（0〜100）
    ///
    /// 「Question X of 5」の表示番号と同じ値から計算する。完了後は100。
    pub fn progress_percentage(&self) -> u8 {
        if self.state == FlowState::Completed {
            return 100;
        }
        (self.display_question_number() * 100 / QUESTION_LIMIT) as u8
    }

    /// 画面に表示するエラー
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_retry(&self) -> bool {
        self.pending.is_some()
    }

    pub fn playback(&self) -> &VoicePlayback {
        &self.playback
    }

    /// 次の質問を取得
    pub async fn fetch_question(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::FetchingQuestion {
            return Err(FlowError::InvalidState(self.state));
        }

        tracing::info!(
            session_id = %self.session_id,
            question_number = self.display_question_number(),
            "❓ [INTERVIEW] Fetching next question"
        );

        match self
            .backend
            .next_question(self.session_id, self.interview_type, self.resume_id)
            .await
        {
            Ok(QuestionReply::Question(question)) => {
                self.clear_error();
                self.push_ai_message(&question);
                self.current_question = Some(question);
                self.state = FlowState::AwaitingAnswer;
            }
            Ok(QuestionReply::Completed(message)) => {
                tracing::info!(
                    session_id = %self.session_id,
                    "🏁 [INTERVIEW] Interview completed"
                );
                self.clear_error();
                self.push_ai_message(&message);
                self.current_question = None;
                self.state = FlowState::Completed;
            }
            Err(e) => {
                tracing::error!("❌ [INTERVIEW] Failed to fetch question: {}", e);
                self.error = Some(e.user_message());
                self.pending = Some(PendingAction::FetchQuestion);
            }
        }
        Ok(())
    }

    /// 回答を送信
    ///
    /// 深掘り質問が返ればそれを表示して回答待ちに戻り、なければ質問カウンターを進めて
    /// 次の質問を1度だけ取得します。失敗時は送信前の状態に戻します。
    pub async fn submit_answer(&mut self, answer: &str) -> Result<(), FlowError> {
        if !self.state.accepts_answer() {
            return Err(FlowError::InvalidState(self.state));
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(FlowError::EmptyAnswer);
        }
        let Some(question) = self.current_question.clone() else {
            return Err(FlowError::InvalidState(self.state));
        };

        let previous_state = self.state;
        self.state = FlowState::SubmittingAnswer;

        tracing::info!(
            session_id = %self.session_id,
            answer_length = answer.len(),
            "📝 [INTERVIEW] Submitting answer"
        );

        let reply = match self
            .backend
            .submit_answer(self.session_id, &question, answer)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("❌ [INTERVIEW] Failed to submit answer: {}", e);
                self.state = previous_state;
                self.error = Some(e.user_message());
                self.pending = Some(PendingAction::SubmitAnswer(answer.to_string()));
                return Ok(());
            }
        };

        self.clear_error();
        self.messages.push(ChatMessage::user(answer));

        match reply.follow_up_question {
            Some(follow_up) => {
                self.follow_ups_in_row += 1;
                if self.follow_ups_in_row > self.follow_up_warn_threshold {
                    tracing::warn!(
                        follow_ups = self.follow_ups_in_row,
                        question_number = self.display_question_number(),
                        "⚠️ [INTERVIEW] Long follow-up chain under one main question"
                    );
                }
                self.push_ai_message(&follow_up);
                self.current_question = Some(follow_up);
                self.state = FlowState::AwaitingFollowUpAnswer;
                Ok(())
            }
            None => {
                self.follow_ups_in_row = 0;
                self.question_count += 1;
                self.current_question = None;
                self.state = FlowState::FetchingQuestion;
                self.fetch_question().await
            }
        }
    }

    /// 直前に失敗した操作をやり直す（ユーザー操作時のみ）
    pub async fn retry(&mut self) -> Result<(), FlowError> {
        match self.pending.clone() {
            Some(PendingAction::FetchQuestion) => self.fetch_question().await,
            Some(PendingAction::SubmitAnswer(answer)) => self.submit_answer(&answer).await,
            None => Err(FlowError::NothingToRetry),
        }
    }

    /// 完了後、一定時間待ってからフィードバック画面へ遷移
    pub async fn finish(&self) -> Result<Route, FlowError> {
        if self.state != FlowState::Completed {
            return Err(FlowError::InvalidState(self.state));
        }

        tokio::time::sleep(COMPLETION_DELAY).await;

        let route = Route::Feedback {
            session_id: Some(self.session_id),
        };
        tracing::info!("📋 [INTERVIEW] Moving to feedback: {}", route);
        self.navigator.navigate(route.clone());
        Ok(route)
    }

    fn push_ai_message(&mut self, text: &str) {
        self.messages.push(ChatMessage::new(ChatRole::Ai, text));
        self.playback.speak(text);
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.pending = None;
    }
}
