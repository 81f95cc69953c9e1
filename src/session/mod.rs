//! ローカルセッション管理
//!
//! 認証トークン・履歴書ID・面接セッションIDを保持し、再起動をまたいで永続化します。
//!
//! ## 構成
//!
//! - `SessionStore`: 画面に渡すセッションコンテキスト（型付きアクセサと一括クリア）
//! - `SessionBackend`: 永続化先（ファイル / メモリ）

mod backend;
mod store;

use serde::{Deserialize, Serialize};

pub use backend::{FileBackend, MemoryBackend, SessionBackend, SessionData};
pub use store::SessionStore;

/// 履歴書アップロード後にバックエンドが払い出すID
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct ResumeId(pub i64);

/// 面接セッション開始時にバックエンドが払い出すID
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(transparent)]
pub struct SessionId(pub i64);

/// セッション保存関連のエラー型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// 保存先ディレクトリを決定できない
    #[error("Failed to determine data directory")]
    NoDataDir,

    /// I/Oエラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML解析エラー
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOMLシリアライズエラー
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
