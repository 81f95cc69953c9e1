use dioxus::prelude::*;

use crate::forms::{validate_resume_file, ResumeFile};
use crate::gui::{
    app_context::use_app_context,
    styles::theme::{get_button_class, CssClasses},
};
use crate::resume;

/// 履歴書アップロード画面
#[component]
pub fn UploadResumePage() -> Element {
    let context = use_app_context();
    let mut selected = use_signal(|| None::<ResumeFile>);
    let mut error = use_signal(|| None::<String>);
    let mut uploading = use_signal(|| false);

    let on_pick = move |_| {
        spawn(async move {
            match resume::pick_resume_file().await {
                Ok(Some(file)) => {
                    // 選択時点で検証し、問題があればすぐに表示する
                    error.set(validate_resume_file(&file).err().map(|e| e.to_string()));
                    selected.set(Some(file));
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("📁 Failed to read selected file: {}", e);
                    error.set(Some(format!("Failed to read file: {}", e)));
                }
            }
        });
    };

    let on_upload = move |_| {
        if uploading() {
            return;
        }
        let Some(file) = selected() else {
            error.set(Some(crate::forms::ValidationError::NoFile.to_string()));
            return;
        };
        let context = context.clone();
        spawn(async move {
            uploading.set(true);
            error.set(None);
            let services = &context.services;
            if let Err(e) =
                resume::upload_resume(&services.api, &services.store, services.navigator(), file)
                    .await
            {
                tracing::warn!("📤 Resume upload failed: {}", e);
                error.set(Some(e.user_message()));
            }
            uploading.set(false);
        });
    };

    let file_label = match &*selected.read() {
        Some(file) => format!("{} ({})", file.name, file.formatted_size()),
        None => "No file selected".to_string(),
    };

    rsx! {
        div {
            class: format!("{} {}", CssClasses::CARD, CssClasses::AUTH_CARD),
            h2 { class: CssClasses::PAGE_TITLE, "Upload your resume" }
            p { class: CssClasses::PAGE_SUBTITLE, "PDF only, up to 10MB" }

            if let Some(message) = error() {
                div { class: CssClasses::ERROR_MESSAGE, "{message}" }
            }

            div {
                class: CssClasses::FORM_GROUP,
                button {
                    class: get_button_class(CssClasses::BTN_SECONDARY),
                    disabled: uploading(),
                    onclick: on_pick,
                    "📁 Choose PDF"
                }
                span { style: "margin-top: 8px; color: #718096;", "{file_label}" }
            }

            button {
                class: get_button_class(CssClasses::BTN_PRIMARY),
                style: "width: 100%;",
                disabled: uploading() || selected.read().is_none(),
                onclick: on_upload,
                if uploading() { "Uploading..." } else { "Upload Resume" }
            }
        }
    }
}
