//! 質問の読み上げ
//!
//! 新しい読み上げの前に必ず再生中の読み上げを中断し、発話が重ならないようにします。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::{SilentSynthesizer, SpeechSynthesizer};

/// 読み上げコントローラー
#[derive(Clone)]
pub struct VoicePlayback {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    enabled: Arc<AtomicBool>,
    current: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl VoicePlayback {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        let enabled = synthesizer.is_supported();
        Self {
            synthesizer,
            enabled: Arc::new(AtomicBool::new(enabled)),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// 読み上げなし
    pub fn silent() -> Self {
        Self::new(Arc::new(SilentSynthesizer))
    }

    pub fn is_supported(&self) -> bool {
        self.synthesizer.is_supported()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// 読み上げの有効/無効を切り替え（無効化時は再生中の読み上げも止める）
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled
            .store(enabled && self.is_supported(), Ordering::SeqCst);
        if !enabled {
            self.cancel();
        }
    }

    /// テキストをバックグラウンドで読み上げ
    pub fn speak(&self, text: &str) {
        if !self.is_enabled() || text.trim().is_empty() {
            return;
        }

        self.cancel();

        let synthesizer = self.synthesizer.clone();
        let text = text.to_string();
        let handle = tokio::spawn(async move {
            tracing::debug!(
                "📢 [PLAYBACK] 読み上げ開始: {}",
                text.chars().take(50).collect::<String>()
            );
            match synthesizer.speak(&text).await {
                Ok(()) => tracing::debug!("✅ [PLAYBACK] 読み上げ完了"),
                Err(e) => tracing::warn!("❌ [PLAYBACK] 読み上げエラー: {}", e),
            }
        });
        *self.current.lock() = Some(handle);
    }

    /// 再生中の読み上げを中断
    pub fn cancel(&self) {
        if let Some(handle) = self.current.lock().take() {
            handle.abort();
        }
        self.synthesizer.cancel();
    }
}
