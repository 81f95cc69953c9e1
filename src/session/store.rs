//! セッションコンテキスト

use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;

use super::backend::{FileBackend, MemoryBackend, SessionBackend, SessionData};
use super::{ResumeId, SessionId, StoreResult};
use crate::interview::InterviewType;

const KEY_TOKEN: &str = "token";
const KEY_RESUME_ID: &str = "resume_id";
const KEY_SESSION_ID: &str = "session_id";
const KEY_INTERVIEW_TYPE: &str = "interview_type";

struct StoreInner {
    backend: Box<dyn SessionBackend>,
    /// 初回アクセスまで `None`（遅延読み込み）
    entries: RwLock<Option<SessionData>>,
}

/// 各画面に渡すセッションコンテキスト
///
/// クローンは同じ状態を共有します。書き込みは即座に永続化先へ反映され、
/// 永続化の失敗はログに残すのみでメモリ上の更新は維持されます。
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// 任意のバックエンドで作成
    pub fn new(backend: impl SessionBackend + 'static) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                backend: Box::new(backend),
                entries: RwLock::new(None),
            }),
        }
    }

    /// メモリのみのストア
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// XDGデータディレクトリのファイルに保存するストア
    pub fn with_default_dir() -> StoreResult<Self> {
        Ok(Self::new(FileBackend::with_default_dir()?))
    }

    /// 認証トークンを保存
    pub fn set_credential(&self, token: impl Into<String>) {
        self.set(KEY_TOKEN, token.into());
    }

    /// 認証トークンを取得
    pub fn credential(&self) -> Option<String> {
        self.get(KEY_TOKEN)
    }

    /// トークンが存在するか
    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    pub fn set_resume_reference(&self, id: ResumeId) {
        self.set(KEY_RESUME_ID, id.to_string());
    }

    pub fn resume_reference(&self) -> Option<ResumeId> {
        self.get_parsed(KEY_RESUME_ID)
    }

    pub fn set_session_reference(&self, id: SessionId) {
        self.set(KEY_SESSION_ID, id.to_string());
    }

    pub fn session_reference(&self) -> Option<SessionId> {
        self.get_parsed(KEY_SESSION_ID)
    }

    /// 面接タイプを保存（チャット画面のフォールバック用）
    pub fn set_interview_type(&self, interview_type: InterviewType) {
        self.set(KEY_INTERVIEW_TYPE, interview_type.as_str().to_string());
    }

    pub fn interview_type(&self) -> Option<InterviewType> {
        self.get_parsed(KEY_INTERVIEW_TYPE)
    }

    /// すべての値を削除（ログアウト・401時）
    pub fn clear(&self) {
        let mut guard = self.inner.entries.write();
        let entries = guard.get_or_insert_with(SessionData::new);
        entries.clear();
        tracing::info!("🧹 [SESSION] Session cleared");
        self.persist(entries);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.ensure_loaded();
        self.inner
            .entries
            .read()
            .as_ref()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key = key, value = %raw, "⚠️ [SESSION] Ignoring unparsable entry");
                None
            }
        }
    }

    fn set(&self, key: &str, value: String) {
        self.ensure_loaded();
        let mut guard = self.inner.entries.write();
        let entries = guard.get_or_insert_with(SessionData::new);
        entries.insert(key.to_string(), value);
        tracing::debug!(key = key, "💾 [SESSION] Entry stored");
        self.persist(entries);
    }

    fn ensure_loaded(&self) {
        if self.inner.entries.read().is_some() {
            return;
        }

        let mut guard = self.inner.entries.write();
        if guard.is_none() {
            let loaded = self.inner.backend.load().unwrap_or_else(|e| {
                tracing::warn!("⚠️ [SESSION] Failed to load session, starting empty: {}", e);
                SessionData::new()
            });
            tracing::debug!(entries = loaded.len(), "📂 [SESSION] Session loaded");
            *guard = Some(loaded);
        }
    }

    fn persist(&self, entries: &SessionData) {
        if let Err(e) = self.inner.backend.persist(entries) {
            tracing::error!("❌ [SESSION] Failed to persist session: {}", e);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("resume_id", &self.resume_reference())
            .field("session_id", &self.session_reference())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_reference_round_trip() {
        let store = SessionStore::in_memory();
        store.set_resume_reference(ResumeId(31));
        assert_eq!(store.resume_reference(), Some(ResumeId(31)));
    }

    #[test]
    fn test_clear_empties_every_getter() {
        let store = SessionStore::in_memory();
        store.set_credential("token");
        store.set_resume_reference(ResumeId(1));
        store.set_session_reference(SessionId(2));
        store.set_interview_type(InterviewType::Technical);

        store.clear();

        assert_eq!(store.credential(), None);
        assert_eq!(store.resume_reference(), None);
        assert_eq!(store.session_reference(), None);
        assert_eq!(store.interview_type(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_is_authenticated_tracks_credential() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());
        store.set_credential("abc");
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::in_memory();
        let other = store.clone();
        store.set_session_reference(SessionId(9));
        assert_eq!(other.session_reference(), Some(SessionId(9)));
    }

    #[test]
    fn test_unparsable_id_reads_as_absent() {
        let backend = MemoryBackend::new();
        let mut data = SessionData::new();
        data.insert(KEY_RESUME_ID.to_string(), "not-a-number".to_string());
        backend.persist(&data).unwrap();

        let store = SessionStore::new(backend);
        assert_eq!(store.resume_reference(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = SessionStore::new(FileBackend::new(dir.path()));
            store.set_credential("persisted-token");
            store.set_session_reference(SessionId(5));
        }

        let reopened = SessionStore::new(FileBackend::new(dir.path()));
        assert_eq!(reopened.credential().as_deref(), Some("persisted-token"));
        assert_eq!(reopened.session_reference(), Some(SessionId(5)));
    }
}
