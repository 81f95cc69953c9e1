//! 音声入力の状態管理
//!
//! 認識器が予期せず終了した場合は、ユーザーが停止を要求していない限り自動で再開します。
//! 状態は `Idle` / `Capturing` / `StoppingRequested` の3つで、再開の可否は
//! 認識器の `Ended` を受け取った時点の状態だけで決まります。

use std::sync::Arc;

use tokio::sync::mpsc;

use super::{RecognizerEvent, SpeechRecognizer, VoiceError};

/// 音声入力の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
    /// 停止要求済み、認識器の終了待ち
    StoppingRequested,
}

/// 音声入力コントローラー
pub struct VoiceCapture {
    recognizer: Arc<dyn SpeechRecognizer>,
    events: mpsc::UnboundedSender<RecognizerEvent>,
    state: CaptureState,
    error: Option<String>,
}

impl VoiceCapture {
    /// コントローラーとイベント受信側を作成
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
    ) -> (Self, mpsc::UnboundedReceiver<RecognizerEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                recognizer,
                events,
                state: CaptureState::Idle,
                error: None,
            },
            receiver,
        )
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// 直近の認識エラー（画面表示用）
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 音声入力を開始
    pub fn start(&mut self) -> Result<(), VoiceError> {
        match self.state {
            CaptureState::Capturing => Ok(()),
            // 認識器はまだ終了していないので、Ended受信時に再開させる
            CaptureState::StoppingRequested => {
                self.state = CaptureState::Capturing;
                Ok(())
            }
            CaptureState::Idle => {
                self.error = None;
                if let Err(e) = self.recognizer.start(self.events.clone()) {
                    tracing::warn!("🎤 [VOICE] Failed to start capture: {}", e);
                    self.error = Some(e.to_string());
                    return Err(e);
                }
                tracing::info!("🎤 [VOICE] Capture started");
                self.state = CaptureState::Capturing;
                Ok(())
            }
        }
    }

    /// ユーザーによる停止要求
    pub fn request_stop(&mut self) {
        if self.state == CaptureState::Capturing {
            tracing::info!("🎤 [VOICE] Stop requested");
            self.state = CaptureState::StoppingRequested;
            self.recognizer.stop();
        }
    }

    /// 認識器イベントを処理し、回答欄に追記する確定テキストを返す
    pub fn handle_event(&mut self, event: RecognizerEvent) -> Option<String> {
        match event {
            RecognizerEvent::Transcript { text, is_final } => {
                if !is_final || self.state == CaptureState::Idle {
                    return None;
                }
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            RecognizerEvent::Ended => {
                match self.state {
                    CaptureState::Capturing => {
                        // 再開の失敗は表示しない（認識器側の一時的な競合のため）
                        if let Err(e) = self.recognizer.start(self.events.clone()) {
                            tracing::debug!("🎤 [VOICE] Restart failed, capture stopped: {}", e);
                            self.state = CaptureState::Idle;
                        } else {
                            tracing::debug!("🎤 [VOICE] Recognizer ended, restarted");
                        }
                    }
                    CaptureState::StoppingRequested => {
                        tracing::info!("🎤 [VOICE] Capture stopped");
                        self.state = CaptureState::Idle;
                    }
                    CaptureState::Idle => {}
                }
                None
            }
            RecognizerEvent::Error(message) => {
                tracing::warn!("🎤 [VOICE] Recognition error: {}", message);
                self.error = Some(message);
                self.state = CaptureState::Idle;
                self.recognizer.stop();
                None
            }
        }
    }
}

/// 確定した認識結果を回答欄の末尾に追記
pub fn append_transcript(draft: &mut String, segment: &str) {
    if segment.is_empty() {
        return;
    }
    if !draft.is_empty() && !draft.ends_with(char::is_whitespace) {
        draft.push(' ');
    }
    draft.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct ScriptedRecognizer {
        starts: AtomicUsize,
        stops: AtomicUsize,
        fail_start: AtomicBool,
    }

    impl SpeechRecognizer for ScriptedRecognizer {
        fn is_supported(&self) -> bool {
            true
        }

        fn start(&self, _events: mpsc::UnboundedSender<RecognizerEvent>) -> Result<(), VoiceError> {
            if self.fail_start.load(Ordering::SeqCst) {
                return Err(VoiceError::Recognition("already started".to_string()));
            }
            self.starts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn capture() -> (VoiceCapture, Arc<ScriptedRecognizer>) {
        let recognizer = Arc::new(ScriptedRecognizer::default());
        let (capture, _rx) = VoiceCapture::new(recognizer.clone());
        (capture, recognizer)
    }

    #[test]
    fn test_unexpected_end_restarts() {
        let (mut capture, recognizer) = capture();
        capture.start().unwrap();

        capture.handle_event(RecognizerEvent::Ended);

        assert_eq!(capture.state(), CaptureState::Capturing);
        assert_eq!(recognizer.starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_end_after_stop_request_goes_idle() {
        let (mut capture, recognizer) = capture();
        capture.start().unwrap();
        capture.request_stop();
        assert_eq!(capture.state(), CaptureState::StoppingRequested);

        capture.handle_event(RecognizerEvent::Ended);

        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(recognizer.starts.load(Ordering::SeqCst), 1);
        assert_eq!(recognizer.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_restart_requested_before_end_arrives() {
        let (mut capture, recognizer) = capture();
        capture.start().unwrap();
        capture.request_stop();
        capture.start().unwrap();

        capture.handle_event(RecognizerEvent::Ended);

        assert_eq!(capture.state(), CaptureState::Capturing);
        assert_eq!(recognizer.starts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_restart_failure_is_swallowed() {
        let (mut capture, recognizer) = capture();
        capture.start().unwrap();
        recognizer.fail_start.store(true, Ordering::SeqCst);

        capture.handle_event(RecognizerEvent::Ended);

        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(capture.error(), None);
    }

    #[test]
    fn test_error_surfaces_and_stops() {
        let (mut capture, _recognizer) = capture();
        capture.start().unwrap();

        capture.handle_event(RecognizerEvent::Error("not-allowed".to_string()));

        assert_eq!(capture.state(), CaptureState::Idle);
        assert_eq!(capture.error(), Some("not-allowed"));

        // エラー後のEndedでは再開しない
        capture.handle_event(RecognizerEvent::Ended);
        assert_eq!(capture.state(), CaptureState::Idle);
    }

    #[test]
    fn test_only_final_transcripts_are_returned() {
        let (mut capture, _recognizer) = capture();
        capture.start().unwrap();

        let interim = capture.handle_event(RecognizerEvent::Transcript {
            text: "I have worked".to_string(),
            is_final: false,
        });
        let finalized = capture.handle_event(RecognizerEvent::Transcript {
            text: " I have worked with Rust ".to_string(),
            is_final: true,
        });

        assert_eq!(interim, None);
        assert_eq!(finalized.as_deref(), Some("I have worked with Rust"));
    }

    #[test]
    fn test_unsupported_recognizer_cannot_start() {
        let (mut capture, _rx) = VoiceCapture::new(Arc::new(super::super::UnsupportedRecognizer));
        assert!(!capture.is_supported());
        assert!(capture.start().is_err());
        assert_eq!(capture.state(), CaptureState::Idle);
        assert!(capture.error().is_some());
    }

    #[test]
    fn test_append_transcript_spacing() {
        let mut draft = String::new();
        append_transcript(&mut draft, "First part.");
        append_transcript(&mut draft, "Second part.");
        assert_eq!(draft, "First part. Second part.");

        let mut draft = "Typed ".to_string();
        append_transcript(&mut draft, "spoken");
        assert_eq!(draft, "Typed spoken");
    }
}
