//! 面接チャット画面用フック
//!
//! `InterviewFlow` は非同期操作をまたいで保持するため `tokio::sync::Mutex` に格納し、
//! 各操作の後で画面表示用のスナップショットを `Signal` に反映します。

use std::sync::Arc;

use dioxus::prelude::*;
use tokio::sync::Mutex;

use crate::gui::app_context::use_app_context;
use crate::interview::{
    ChatMessage, EntryOutcome, FlowState, InterviewFlow, InterviewType, QUESTION_LIMIT,
};
use crate::voice::{append_transcript, CaptureState, VoiceCapture, VoicePlayback};

/// 画面表示用のフロー状態
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSnapshot {
    /// 面接タイプ解決前（リダイレクト時を含む）は `AwaitingType`
    pub state: FlowState,
    pub interview_type: Option<InterviewType>,
    pub messages: Vec<ChatMessage>,
    pub question_number: u32,
    pub question_limit: u32,
    pub progress: u8,
    pub error: Option<String>,
    pub can_retry: bool,
}

impl Default for ChatSnapshot {
    fn default() -> Self {
        Self {
            state: FlowState::default(),
            interview_type: None,
            messages: Vec::new(),
            question_number: 1,
            question_limit: QUESTION_LIMIT,
            progress: 0,
            error: None,
            can_retry: false,
        }
    }
}

impl ChatSnapshot {
    pub fn from_flow(flow: &InterviewFlow) -> Self {
        Self {
            state: flow.state(),
            interview_type: Some(flow.interview_type()),
            messages: flow.messages().to_vec(),
            question_number: flow.display_question_number(),
            question_limit: QUESTION_LIMIT,
            progress: flow.progress_percentage(),
            error: flow.error().map(str::to_string),
            can_retry: flow.can_retry(),
        }
    }

    pub fn accepts_answer(&self) -> bool {
        self.state.accepts_answer()
    }

    pub fn is_completed(&self) -> bool {
        self.state == FlowState::Completed
    }
}

/// 面接チャットハンドル
#[derive(Clone)]
pub struct InterviewChatHandle {
    pub snapshot: Signal<ChatSnapshot>,
    pub answer: Signal<String>,
    /// 質問取得・回答送信中
    pub busy: Signal<bool>,
    /// 入力エラーなどの一時的な通知
    pub notice: Signal<Option<String>>,
    pub capture_state: Signal<CaptureState>,
    pub voice_error: Signal<Option<String>>,
    pub playback_enabled: Signal<bool>,
    flow: Arc<Mutex<Option<InterviewFlow>>>,
    capture: Arc<parking_lot::Mutex<VoiceCapture>>,
    playback: VoicePlayback,
}

impl InterviewChatHandle {
    pub fn voice_input_supported(&self) -> bool {
        self.capture.lock().is_supported()
    }

    pub fn playback_supported(&self) -> bool {
        self.playback.is_supported()
    }

    /// 回答を送信
    pub fn submit(&self) {
        let text = self.answer.peek().clone();
        let flow = self.flow.clone();
        let mut snapshot = self.snapshot;
        let mut answer = self.answer;
        let mut busy = self.busy;
        let mut notice = self.notice;

        if *busy.peek() {
            return;
        }

        self.stop_capture();

        spawn(async move {
            busy.set(true);
            notice.set(None);
            let mut guard = flow.lock().await;
            if let Some(flow) = guard.as_mut() {
                match flow.submit_answer(&text).await {
                    Ok(()) => {
                        if flow.error().is_none() {
                            answer.set(String::new());
                        }
                    }
                    Err(e) => {
                        tracing::debug!("📝 [CHAT_HOOK] Submit rejected: {}", e);
                        notice.set(Some(e.to_string()));
                    }
                }
                snapshot.set(ChatSnapshot::from_flow(flow));
                busy.set(false);
                finish_if_completed(flow).await;
            } else {
                busy.set(false);
            }
        });
    }

    /// 失敗した操作の再試行
    pub fn retry(&self) {
        let flow = self.flow.clone();
        let mut snapshot = self.snapshot;
        let mut answer = self.answer;
        let mut busy = self.busy;

        if *busy.peek() {
            return;
        }

        spawn(async move {
            busy.set(true);
            let mut guard = flow.lock().await;
            if let Some(flow) = guard.as_mut() {
                let was_submitting = flow.state().accepts_answer();
                if let Err(e) = flow.retry().await {
                    tracing::debug!("🔁 [CHAT_HOOK] Retry rejected: {}", e);
                }
                if was_submitting && flow.error().is_none() {
                    answer.set(String::new());
                }
                snapshot.set(ChatSnapshot::from_flow(flow));
                busy.set(false);
                finish_if_completed(flow).await;
            } else {
                busy.set(false);
            }
        });
    }

    /// 音声入力の開始/停止
    pub fn toggle_capture(&self) {
        let mut capture_state = self.capture_state;
        let mut voice_error = self.voice_error;

        let mut capture = self.capture.lock();
        if capture.is_active() {
            capture.request_stop();
        } else if let Err(e) = capture.start() {
            tracing::debug!("🎤 [CHAT_HOOK] Voice input unavailable: {}", e);
        }
        capture_state.set(capture.state());
        voice_error.set(capture.error().map(str::to_string));
    }

    /// 読み上げの有効/無効を切り替え
    pub fn toggle_playback(&self) {
        let mut playback_enabled = self.playback_enabled;
        self.playback.set_enabled(!self.playback.is_enabled());
        playback_enabled.set(self.playback.is_enabled());
    }

    fn stop_capture(&self) {
        let mut capture_state = self.capture_state;
        let mut capture = self.capture.lock();
        capture.request_stop();
        capture_state.set(capture.state());
    }
}

async fn finish_if_completed(flow: &InterviewFlow) {
    if flow.state() != FlowState::Completed {
        return;
    }
    if let Err(e) = flow.finish().await {
        tracing::warn!("⚠️ [CHAT_HOOK] Failed to finish interview: {}", e);
    }
}

/// 面接チャットフック
pub fn use_interview_chat(query_type: Option<InterviewType>) -> InterviewChatHandle {
    let context = use_app_context();

    let (flow, initial) = use_hook({
        let services = context.services.clone();
        move || match InterviewFlow::enter(services.flow_context(), query_type) {
            EntryOutcome::Ready(flow) => {
                let initial = ChatSnapshot::from_flow(&flow);
                (Arc::new(Mutex::new(Some(flow))), initial)
            }
            EntryOutcome::Redirected(route) => {
                tracing::debug!("🧭 [CHAT_HOOK] Entry redirected to {}", route);
                (Arc::new(Mutex::new(None)), ChatSnapshot::default())
            }
        }
    });

    let mut snapshot = use_signal(move || initial);
    let answer = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let notice = use_signal(|| None::<String>);
    let mut capture_state = use_signal(CaptureState::default);
    let mut voice_error = use_signal(|| None::<String>);

    let playback = context.services.playback.clone();
    let playback_enabled = use_signal({
        let playback = playback.clone();
        move || playback.is_enabled()
    });

    // 最初の質問を取得
    use_hook({
        let flow = flow.clone();
        move || {
            spawn(async move {
                let mut guard = flow.lock().await;
                let Some(flow) = guard.as_mut() else {
                    return;
                };
                busy.set(true);
                if let Err(e) = flow.fetch_question().await {
                    tracing::warn!("⚠️ [CHAT_HOOK] Initial fetch skipped: {}", e);
                }
                snapshot.set(ChatSnapshot::from_flow(flow));
                busy.set(false);
                finish_if_completed(flow).await;
            });
        }
    });

    // 音声認識イベントループ
    let capture = use_hook({
        let recognizer = context.services.recognizer.clone();
        let mut answer = answer;
        move || {
            let (capture, mut events) = VoiceCapture::new(recognizer);
            let capture = Arc::new(parking_lot::Mutex::new(capture));
            let loop_capture = capture.clone();
            spawn(async move {
                while let Some(event) = events.recv().await {
                    let (segment, state, error) = {
                        let mut capture = loop_capture.lock();
                        let segment = capture.handle_event(event);
                        (segment, capture.state(), capture.error().map(str::to_string))
                    };
                    if let Some(segment) = segment {
                        answer.with_mut(|draft| append_transcript(draft, &segment));
                    }
                    capture_state.set(state);
                    voice_error.set(error);
                }
            });
            capture
        }
    });

    // 画面離脱時は読み上げと音声入力を止める
    use_drop({
        let capture = capture.clone();
        let playback = playback.clone();
        move || {
            playback.cancel();
            capture.lock().request_stop();
        }
    });

    InterviewChatHandle {
        snapshot,
        answer,
        busy,
        notice,
        capture_state,
        voice_error,
        playback_enabled,
        flow,
        capture,
        playback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_awaits_type() {
        let snapshot = ChatSnapshot::default();
        assert_eq!(snapshot.state, FlowState::AwaitingType);
        assert_eq!(snapshot.interview_type, None);
        assert!(!snapshot.accepts_answer());
        assert!(!snapshot.is_completed());
        assert_eq!(snapshot.question_number, 1);
        assert_eq!(snapshot.question_limit, 5);
    }

    #[test]
    fn test_snapshot_accepts_answer_only_while_waiting() {
        let mut snapshot = ChatSnapshot::default();
        snapshot.state = FlowState::AwaitingFollowUpAnswer;
        assert!(snapshot.accepts_answer());
        snapshot.state = FlowState::SubmittingAnswer;
        assert!(!snapshot.accepts_answer());
        snapshot.state = FlowState::Completed;
        assert!(snapshot.is_completed());
    }
}
