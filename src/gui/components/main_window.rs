use dioxus::prelude::*;

use crate::gui::{
    app_context::{use_app_context, AppContextProvider},
    components::{
        DashboardPage, FeedbackPage, HomePage, InterviewChatPage, InterviewSetupPage, NavBar,
        Protected, SignInPage, SignUpPage, UploadResumePage,
    },
    styles::theme::{get_embedded_css, CssClasses},
};
use crate::navigation::Route;

/// メインウィンドウコンポーネント
#[component]
pub fn MainWindow() -> Element {
    rsx! {
        // CSSスタイルをdocument headに注入
        document::Style {
            {get_embedded_css()}
        }

        AppContextProvider {
            div {
                class: CssClasses::APP,
                NavBar {}
                RouteView {}
            }
        }
    }
}

/// 現在のルートに対応する画面
#[component]
fn RouteView() -> Element {
    let context = use_app_context();
    let route = (context.route)();

    tracing::debug!("🖥️ RouteView: Rendering {}", route);

    // 同じ画面でもクエリが変われば作り直す
    let key = route.path();

    let page = match route.clone() {
        Route::Home => rsx! { HomePage {} },
        Route::SignIn => rsx! { SignInPage {} },
        Route::SignUp => rsx! { SignUpPage {} },
        Route::Dashboard => rsx! { DashboardPage {} },
        Route::UploadResume => rsx! { UploadResumePage {} },
        Route::InterviewSetup => rsx! { InterviewSetupPage {} },
        Route::InterviewChat { interview_type } => rsx! { InterviewChatPage { interview_type } },
        Route::Feedback { session_id } => rsx! { FeedbackPage { session_id } },
    };

    if route.requires_session() {
        rsx! {
            div {
                key: "{key}",
                class: CssClasses::PAGE,
                Protected { {page} }
            }
        }
    } else {
        rsx! {
            div {
                key: "{key}",
                class: CssClasses::PAGE,
                {page}
            }
        }
    }
}
