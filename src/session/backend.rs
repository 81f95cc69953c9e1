//! セッションの永続化先

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{StoreError, StoreResult};

/// 文字列キーと値の対応表
pub type SessionData = BTreeMap<String, String>;

/// セッション永続化トレイト
pub trait SessionBackend: Send + Sync {
    /// 保存済みの値を読み込む（未保存なら空）
    fn load(&self) -> StoreResult<SessionData>;

    /// 値を丸ごと書き込む
    fn persist(&self, data: &SessionData) -> StoreResult<()>;
}

/// TOMLファイルへ保存するバックエンド
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// 指定ディレクトリ配下の `session.toml` を使用
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join("session.toml"),
        }
    }

    /// XDGデータディレクトリを使用
    pub fn with_default_dir() -> StoreResult<Self> {
        let data_dir = directories::ProjectDirs::from("dev", "prepmate", "prepmate")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StoreError::NoDataDir)?;

        Ok(Self::new(data_dir))
    }

    /// ファイルパスを取得
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> StoreResult<SessionData> {
        if !self.path.exists() {
            return Ok(SessionData::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn persist(&self, data: &SessionData) -> StoreResult<()> {
        if data.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        // ディレクトリが存在しない場合は作成
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(data)?)?;
        Ok(())
    }
}

/// メモリ上のみで保持するバックエンド
#[derive(Default)]
pub struct MemoryBackend {
    data: Mutex<SessionData>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> StoreResult<SessionData> {
        Ok(self.data.lock().clone())
    }

    fn persist(&self, data: &SessionData) -> StoreResult<()> {
        *self.data.lock() = data.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_backend_persists_entries() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested"));

        let mut data = SessionData::new();
        data.insert("token".to_string(), "abc".to_string());
        data.insert("resume_id".to_string(), "12".to_string());
        backend.persist(&data).unwrap();

        let reopened = FileBackend::new(dir.path().join("nested"));
        assert_eq!(reopened.load().unwrap(), data);
    }

    #[test]
    fn test_file_backend_removes_file_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());

        let mut data = SessionData::new();
        data.insert("token".to_string(), "abc".to_string());
        backend.persist(&data).unwrap();
        assert!(backend.path().exists());

        backend.persist(&SessionData::new()).unwrap();
        assert!(!backend.path().exists());
    }
}
