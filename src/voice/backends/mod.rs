//! 読み上げバックエンド実装

pub mod voicevox;

pub use voicevox::VoicevoxSynthesizer;
