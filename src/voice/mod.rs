//! 音声入出力
//!
//! 音声認識（回答入力）と音声合成（質問の読み上げ）をトレイトで抽象化し、
//! 未対応環境では何もしない実装に差し替えられるようにします。

pub mod backends;
pub mod capture;
pub mod config;
pub mod playback;

use async_trait::async_trait;
use tokio::sync::mpsc;

pub use backends::VoicevoxSynthesizer;
pub use capture::{append_transcript, CaptureState, VoiceCapture};
pub use config::{PlaybackBackendType, VoiceConfig, VoicevoxConfig};
pub use playback::VoicePlayback;

/// 音声入出力のエラー型
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("この環境では音声機能を利用できません")]
    Unsupported,

    #[error("音声認識エラー: {0}")]
    Recognition(String),

    #[error("接続に失敗しました: {0}")]
    Connection(String),

    #[error("HTTPリクエストに失敗しました: {0}")]
    Http(#[from] reqwest::Error),

    #[error("音声出力エラー: {0}")]
    AudioOutput(String),

    #[error("音声デコードエラー: {0}")]
    AudioDecode(String),
}

/// 音声認識器から届くイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerEvent {
    /// 認識結果（`is_final` が false の途中結果は回答欄に反映しない）
    Transcript { text: String, is_final: bool },
    /// 認識セッションが終了した
    Ended,
    /// 認識エラー
    Error(String),
}

/// 音声認識器
pub trait SpeechRecognizer: Send + Sync {
    fn is_supported(&self) -> bool;

    /// 認識を開始し、イベントを `events` へ送る
    fn start(&self, events: mpsc::UnboundedSender<RecognizerEvent>) -> Result<(), VoiceError>;

    fn stop(&self);
}

/// 音声合成器
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn is_supported(&self) -> bool;

    /// テキストを読み上げ（再生完了まで待機）
    async fn speak(&self, text: &str) -> Result<(), VoiceError>;

    /// 再生中の読み上げを中断
    fn cancel(&self);

    fn name(&self) -> &'static str;
}

/// 音声認識に対応していない環境用
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedRecognizer;

impl SpeechRecognizer for UnsupportedRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&self, _events: mpsc::UnboundedSender<RecognizerEvent>) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }

    fn stop(&self) {}
}

/// 読み上げ無効時の合成器
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    fn is_supported(&self) -> bool {
        false
    }

    async fn speak(&self, _text: &str) -> Result<(), VoiceError> {
        Ok(())
    }

    fn cancel(&self) {}

    fn name(&self) -> &'static str {
        "silent"
    }
}
