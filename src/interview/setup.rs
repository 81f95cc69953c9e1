//! 面接タイプ選択

use super::flow::InterviewBackend;
use super::models::InterviewType;
use crate::api::ApiError;
use crate::navigation::{Navigator, Route};
use crate::session::{SessionId, SessionStore};

/// 面接設定画面の準備結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// 選択可能な面接タイプ
    Cards(Vec<InterviewType>),
    /// 履歴書未アップロードのためリダイレクト済み
    Redirected(Route),
}

/// 面接設定画面を表示できるか判定する
pub fn prepare_setup(store: &SessionStore, navigator: &dyn Navigator) -> SetupOutcome {
    if store.resume_reference().is_none() {
        tracing::info!("📄 [SETUP] No resume uploaded, redirecting to upload screen");
        navigator.navigate(Route::UploadResume);
        return SetupOutcome::Redirected(Route::UploadResume);
    }
    SetupOutcome::Cards(InterviewType::ALL.to_vec())
}

/// 面接開始時のエラー
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("Please upload your resume first")]
    MissingResume,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StartError {
    pub fn user_message(&self) -> String {
        match self {
            StartError::MissingResume => self.to_string(),
            StartError::Api(e) => e.user_message(),
        }
    }
}

/// 面接セッションを開始してチャット画面へ遷移
pub async fn start_interview(
    backend: &dyn InterviewBackend,
    store: &SessionStore,
    navigator: &dyn Navigator,
    interview_type: InterviewType,
) -> Result<SessionId, StartError> {
    let resume_id = store.resume_reference().ok_or(StartError::MissingResume)?;

    tracing::info!(
        resume_id = %resume_id,
        interview_type = %interview_type,
        "🚀 [SETUP] Starting interview session"
    );

    let session_id = backend.start_session(resume_id, interview_type).await?;

    store.set_session_reference(session_id);
    store.set_interview_type(interview_type);

    navigator.navigate(Route::InterviewChat {
        interview_type: Some(interview_type),
    });
    Ok(session_id)
}
