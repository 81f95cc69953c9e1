//! 認証ワークフロー
//!
//! 新規登録・ログイン・ログアウトと、ログイン中ユーザーの取得。

use crate::api::{ApiClient, ApiResult, CurrentUser};
use crate::forms::{validate_login, validate_signup, FormError, LoginForm, SignupForm};
use crate::navigation::{Navigator, Route};
use crate::session::SessionStore;

/// 新規登録し、そのままログインしてダッシュボードへ遷移
pub async fn sign_up(
    api: &ApiClient,
    store: &SessionStore,
    navigator: &dyn Navigator,
    form: &SignupForm,
) -> Result<(), FormError> {
    validate_signup(form)?;

    let email = form.email.trim();
    tracing::info!("🔐 [AUTH] Creating account");
    api.signup(form.full_name.trim(), email, &form.password)
        .await?;

    let token = api.login(email, &form.password).await?;
    store.set_credential(token);
    tracing::info!("✅ [AUTH] Account created and signed in");

    navigator.navigate(Route::Dashboard);
    Ok(())
}

/// ログインしてダッシュボードへ遷移
pub async fn sign_in(
    api: &ApiClient,
    store: &SessionStore,
    navigator: &dyn Navigator,
    form: &LoginForm,
) -> Result<(), FormError> {
    validate_login(form)?;

    tracing::info!("🔐 [AUTH] Signing in");
    let token = api.login(form.email.trim(), &form.password).await?;
    store.set_credential(token);
    tracing::info!("✅ [AUTH] Signed in");

    navigator.navigate(Route::Dashboard);
    Ok(())
}

/// ログイン中のユーザー
pub async fn current_user(api: &ApiClient) -> ApiResult<CurrentUser> {
    api.me().await
}

/// ログアウト（セッションを破棄してサインインへ）
pub fn logout(store: &SessionStore, navigator: &dyn Navigator) {
    tracing::info!("👋 [AUTH] Logging out");
    store.clear();
    navigator.navigate(Route::SignIn);
}
