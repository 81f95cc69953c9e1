//! VOICEVOXバックエンド実装

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use crate::voice::config::VoicevoxConfig;
use crate::voice::{SpeechSynthesizer, VoiceError};

/// VOICEVOXエンジンで合成し、rodioで再生する
pub struct VoicevoxSynthesizer {
    config: VoicevoxConfig,
    client: reqwest::Client,
    /// 再生中のシンク（中断用）
    current_sink: Arc<Mutex<Option<Arc<rodio::Sink>>>>,
}

impl VoicevoxSynthesizer {
    /// 新しいインスタンスを作成
    pub fn new(config: VoicevoxConfig) -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            config,
            client,
            current_sink: Arc::new(Mutex::new(None)),
        })
    }

    /// 接続テスト
    pub async fn test_connection(&self) -> Result<bool, VoiceError> {
        let url = format!("{}/version", self.config.base_url());

        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let version = response.text().await.unwrap_or_default();
                tracing::info!("✅ VOICEVOX接続成功 (バージョン: {})", version.trim());
                Ok(true)
            }
            Ok(response) => {
                tracing::warn!("⚠️ VOICEVOX接続失敗: ステータス {}", response.status());
                Ok(false)
            }
            Err(e) => {
                tracing::error!("❌ VOICEVOX接続エラー: {}", e);
                Err(VoiceError::Connection(format!(
                    "VOICEVOXに接続できません: {}",
                    e
                )))
            }
        }
    }

    /// audio_queryを取得し、音量・話速を適用
    async fn get_audio_query(&self, text: &str) -> Result<serde_json::Value, VoiceError> {
        let url = format!(
            "{}/audio_query?speaker={}&text={}",
            self.config.base_url(),
            self.config.speaker_id,
            urlencoding::encode(text),
        );

        let response = self.client.post(&url).send().await?;
        if !response.status().is_success() {
            return Err(VoiceError::Connection(format!(
                "audio_queryに失敗: ステータス {}",
                response.status()
            )));
        }

        let mut query: serde_json::Value = response.json().await?;
        if let Some(obj) = query.as_object_mut() {
            obj.insert(
                "volumeScale".to_string(),
                serde_json::json!(self.config.volume_scale),
            );
            obj.insert(
                "speedScale".to_string(),
                serde_json::json!(self.config.speed_scale),
            );
        }
        Ok(query)
    }

    /// 音声合成を実行
    async fn synthesize(&self, audio_query: &serde_json::Value) -> Result<Vec<u8>, VoiceError> {
        let url = format!(
            "{}/synthesis?speaker={}",
            self.config.base_url(),
            self.config.speaker_id
        );

        let response = self.client.post(&url).json(audio_query).send().await?;
        if !response.status().is_success() {
            return Err(VoiceError::Connection(format!(
                "synthesisに失敗: ステータス {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// WAVデータを再生（ブロッキング）
    fn play_wav_blocking(
        wav_bytes: Vec<u8>,
        slot: Arc<Mutex<Option<Arc<rodio::Sink>>>>,
    ) -> Result<(), VoiceError> {
        use rodio::{Decoder, OutputStream, Sink};
        use std::io::Cursor;

        // 音声出力ストリームはこのスレッド上で保持する
        let (_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| VoiceError::AudioOutput(format!("音声出力の初期化に失敗: {}", e)))?;

        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| VoiceError::AudioOutput(format!("音声シンクの作成に失敗: {}", e)))?;

        let source = Decoder::new(Cursor::new(wav_bytes))
            .map_err(|e| VoiceError::AudioDecode(format!("WAVデコードに失敗: {}", e)))?;

        let sink = Arc::new(sink);
        sink.append(source);
        *slot.lock() = Some(sink.clone());

        sink.sleep_until_end();

        let mut current = slot.lock();
        if current.as_ref().is_some_and(|s| Arc::ptr_eq(s, &sink)) {
            *current = None;
        }
        Ok(())
    }
}

#[async_trait]
impl SpeechSynthesizer for VoicevoxSynthesizer {
    fn is_supported(&self) -> bool {
        true
    }

    async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        if text.is_empty() {
            return Ok(());
        }

        tracing::debug!("🔊 VOICEVOXに送信: {}", text);

        let audio_query = self.get_audio_query(text).await?;
        let wav_bytes = self.synthesize(&audio_query).await?;

        let slot = self.current_sink.clone();
        tokio::task::spawn_blocking(move || Self::play_wav_blocking(wav_bytes, slot))
            .await
            .map_err(|e| VoiceError::AudioOutput(format!("再生タスクエラー: {}", e)))??;

        Ok(())
    }

    fn cancel(&self) {
        if let Some(sink) = self.current_sink.lock().take() {
            tracing::debug!("🔇 VOICEVOX再生を中断");
            sink.stop();
        }
    }

    fn name(&self) -> &'static str {
        "VOICEVOX"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_without_playback_is_noop() {
        let synthesizer = VoicevoxSynthesizer::new(VoicevoxConfig::default()).unwrap();
        synthesizer.cancel();
        assert!(synthesizer.current_sink.lock().is_none());
        assert_eq!(synthesizer.name(), "VOICEVOX");
    }

    #[tokio::test]
    async fn test_unreachable_engine_reports_connection_error() {
        let config = VoicevoxConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            ..VoicevoxConfig::default()
        };
        let synthesizer = VoicevoxSynthesizer::new(config).unwrap();
        assert!(matches!(
            synthesizer.test_connection().await,
            Err(VoiceError::Connection(_))
        ));
    }
}
