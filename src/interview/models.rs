use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 面接タイプ
///
/// ワイヤー上の値は `"Technical"` / `"HR"` / `"Aptitude"`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterviewType {
    Technical,
    #[serde(rename = "HR")]
    Hr,
    Aptitude,
}

impl InterviewType {
    pub const ALL: [InterviewType; 3] = [
        InterviewType::Technical,
        InterviewType::Hr,
        InterviewType::Aptitude,
    ];

    /// APIに送る値
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewType::Technical => "Technical",
            InterviewType::Hr => "HR",
            InterviewType::Aptitude => "Aptitude",
        }
    }

    /// カードの見出し
    pub fn title(&self) -> &'static str {
        match self {
            InterviewType::Technical => "Technical Interview",
            InterviewType::Hr => "HR Interview",
            InterviewType::Aptitude => "Aptitude Interview",
        }
    }

    /// カードの説明文
    pub fn description(&self) -> &'static str {
        match self {
            InterviewType::Technical => "Test your coding and technical problem-solving skills",
            InterviewType::Hr => "Practice common HR questions and behavioral interviews",
            InterviewType::Aptitude => "Test your logical reasoning and analytical skills",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            InterviewType::Technical => "💻",
            InterviewType::Hr => "👔",
            InterviewType::Aptitude => "🧠",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知の面接タイプ
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown interview type: {0}")]
pub struct UnknownInterviewType(pub String);

impl FromStr for InterviewType {
    type Err = UnknownInterviewType;

    // 大文字小文字は区別しない（バックエンドも小文字化して判定する）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" => Ok(InterviewType::Technical),
            "hr" => Ok(InterviewType::Hr),
            "aptitude" => Ok(InterviewType::Aptitude),
            _ => Err(UnknownInterviewType(s.to_string())),
        }
    }
}

/// 発言者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Ai,
    User,
}

/// チャット画面のメッセージ（画面の生存期間のみ保持）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Ai, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    /// 表示用の時刻
    pub fn formatted_time(&self) -> String {
        self.timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string()
    }
}
