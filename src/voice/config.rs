//! 音声設定構造体

use serde::{Deserialize, Serialize};

/// 読み上げバックエンドの種類
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PlaybackBackendType {
    /// 無効
    #[default]
    None,
    /// VOICEVOX
    Voicevox,
}

impl std::fmt::Display for PlaybackBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackBackendType::None => write!(f, "無効"),
            PlaybackBackendType::Voicevox => write!(f, "VOICEVOX"),
        }
    }
}

/// VOICEVOX固有設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicevoxConfig {
    /// ホスト名
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 話者ID
    pub speaker_id: i32,
    /// 音量スケール (0.0〜2.0、デフォルト1.0)
    #[serde(default = "default_scale")]
    pub volume_scale: f32,
    /// 話速スケール (0.5〜2.0、デフォルト1.0)
    #[serde(default = "default_scale")]
    pub speed_scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl Default for VoicevoxConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 50021,
            speaker_id: 1,
            volume_scale: 1.0,
            speed_scale: 1.0,
        }
    }
}

impl VoicevoxConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// 音声入出力設定
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VoiceConfig {
    /// 質問の読み上げバックエンド
    #[serde(default)]
    pub playback: PlaybackBackendType,
    /// VOICEVOX設定
    #[serde(default)]
    pub voicevox: VoicevoxConfig,
}
