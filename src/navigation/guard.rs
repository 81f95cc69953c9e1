//! ルートガード

use super::{Navigator, Route};
use crate::session::SessionStore;

/// ガード判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 画面を表示してよい
    Render,
    /// 指定ルートへリダイレクト済み
    Redirect(Route),
}

/// 認証済みかどうかを同期的に判定し、未認証ならサインインへ遷移する
///
/// トークンの有効性はバックエンドが判定するため、ここでは存在のみを確認します。
pub fn guard(store: &SessionStore, navigator: &dyn Navigator) -> GuardDecision {
    if store.is_authenticated() {
        GuardDecision::Render
    } else {
        tracing::info!("🔒 [GUARD] No credential, redirecting to sign-in");
        navigator.navigate(Route::SignIn);
        GuardDecision::Redirect(Route::SignIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Route>>);

    impl Navigator for Recorder {
        fn navigate(&self, route: Route) {
            self.0.lock().push(route);
        }
    }

    #[test]
    fn test_guard_redirects_without_credential() {
        let store = SessionStore::in_memory();
        let recorder = Recorder::default();

        assert_eq!(
            guard(&store, &recorder),
            GuardDecision::Redirect(Route::SignIn)
        );
        assert_eq!(*recorder.0.lock(), vec![Route::SignIn]);
    }

    #[test]
    fn test_guard_renders_with_credential() {
        let store = SessionStore::in_memory();
        store.set_credential("token-abc");
        let recorder = Recorder::default();

        assert_eq!(guard(&store, &recorder), GuardDecision::Render);
        assert!(recorder.0.lock().is_empty());
    }
}
