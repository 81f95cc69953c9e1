//! 履歴書アップロード

use crate::api::ApiClient;
use crate::forms::{validate_resume_file, FormError, ResumeFile};
use crate::navigation::{Navigator, Route};
use crate::session::{ResumeId, SessionStore};

/// 履歴書を検証してアップロードし、面接設定画面へ遷移
///
/// PDF以外・10MB超のファイルはネットワーク呼び出し前に拒否します。
pub async fn upload_resume(
    api: &ApiClient,
    store: &SessionStore,
    navigator: &dyn Navigator,
    file: ResumeFile,
) -> Result<ResumeId, FormError> {
    validate_resume_file(&file)?;

    tracing::info!(
        file_name = %file.name,
        size = %file.formatted_size(),
        "📤 [RESUME] Uploading resume"
    );

    let resume_id = api.upload_resume(&file.name, file.bytes).await?;
    store.set_resume_reference(resume_id);
    tracing::info!(resume_id = %resume_id, "✅ [RESUME] Resume uploaded");

    navigator.navigate(Route::InterviewSetup);
    Ok(resume_id)
}

/// ファイルダイアログでPDFを選択して読み込む（キャンセル時は `None`）
pub async fn pick_resume_file() -> std::io::Result<Option<ResumeFile>> {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_title("履歴書（PDF）を選択")
        .add_filter("PDF", &["pdf"])
        .add_filter("すべてのファイル", &["*"])
        .pick_file()
        .await
    else {
        tracing::debug!("📁 File dialog cancelled");
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    let bytes = tokio::fs::read(&path).await?;
    let name = handle.file_name();
    tracing::info!("📁 Selected resume: {}", path.display());

    Ok(Some(ResumeFile::new(name, bytes)))
}
