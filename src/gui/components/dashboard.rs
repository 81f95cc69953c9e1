use dioxus::prelude::*;

use crate::auth;
use crate::gui::{
    app_context::use_app_context,
    styles::theme::{get_button_class, CssClasses},
};
use crate::navigation::Route;

/// ダッシュボード
#[component]
pub fn DashboardPage() -> Element {
    let context = use_app_context();

    // ログイン中ユーザーを取得（401時はクライアント側でサインインへ遷移する）
    let api = context.services.api.clone();
    let user = use_resource(move || {
        let api = api.clone();
        async move { auth::current_user(&api).await.map_err(|e| e.user_message()) }
    });

    let has_resume = context.services.store.resume_reference().is_some();
    let last_session = context.services.store.session_reference();

    let greeting = match &*user.read() {
        Some(Ok(user)) => format!("Welcome, {}!", user.full_name),
        Some(Err(_)) => "Welcome!".to_string(),
        None => "Loading your profile...".to_string(),
    };
    let profile_error = match &*user.read() {
        Some(Err(message)) => Some(message.clone()),
        _ => None,
    };

    let upload_context = context.clone();
    let setup_context = context.clone();

    rsx! {
        h1 { class: CssClasses::PAGE_TITLE, "{greeting}" }
        p { class: CssClasses::PAGE_SUBTITLE, "What would you like to do today?" }

        if let Some(message) = profile_error {
            div { class: CssClasses::ERROR_MESSAGE, "{message}" }
        }

        div {
            class: CssClasses::CARD_GRID,

            div {
                class: CssClasses::CARD,
                div { class: CssClasses::TYPE_ICON, "📄" }
                h3 { "Upload Resume" }
                p {
                    if has_resume {
                        "Your resume is on file. Upload a new one to get different questions."
                    } else {
                        "Upload your resume so questions can be tailored to your experience."
                    }
                }
                button {
                    class: get_button_class(CssClasses::BTN_PRIMARY),
                    onclick: move |_| upload_context.navigate(Route::UploadResume),
                    if has_resume { "Replace Resume" } else { "Upload Resume" }
                }
            }

            div {
                class: CssClasses::CARD,
                div { class: CssClasses::TYPE_ICON, "🎙️" }
                h3 { "Start Interview" }
                p { "Choose an interview type and answer five tailored questions." }
                button {
                    class: get_button_class(CssClasses::BTN_PRIMARY),
                    disabled: !has_resume,
                    onclick: move |_| setup_context.navigate(Route::InterviewSetup),
                    "Start Interview"
                }
            }

            if let Some(session_id) = last_session {
                div {
                    class: CssClasses::CARD,
                    div { class: CssClasses::TYPE_ICON, "📊" }
                    h3 { "Latest Feedback" }
                    p { "Review the feedback from your most recent interview." }
                    button {
                        class: get_button_class(CssClasses::BTN_SECONDARY),
                        onclick: move |_| context.navigate(Route::Feedback { session_id: Some(session_id) }),
                        "View Feedback"
                    }
                }
            }
        }
    }
}
