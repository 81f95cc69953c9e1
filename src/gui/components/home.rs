use dioxus::prelude::*;

use crate::gui::{
    app_context::use_app_context,
    styles::theme::{get_button_class, CssClasses},
};
use crate::interview::InterviewType;
use crate::navigation::Route;

/// ランディング画面
#[component]
pub fn HomePage() -> Element {
    let context = use_app_context();
    let signed_in = context.services.store.is_authenticated();
    let primary_route = if signed_in { Route::Dashboard } else { Route::SignUp };
    let primary_label = if signed_in { "Go to Dashboard" } else { "Get Started" };

    rsx! {
        div {
            style: "text-align: center; padding: 40px 0;",
            h1 { class: CssClasses::PAGE_TITLE, "Practice interviews with an AI interviewer" }
            p {
                class: CssClasses::PAGE_SUBTITLE,
                "Upload your resume, pick an interview type and get tailored questions with detailed feedback."
            }
            button {
                class: get_button_class(CssClasses::BTN_PRIMARY),
                onclick: move |_| context.navigate(primary_route.clone()),
                "{primary_label}"
            }
        }

        div {
            class: CssClasses::CARD_GRID,
            for interview_type in InterviewType::ALL {
                div {
                    key: "{interview_type}",
                    class: CssClasses::CARD,
                    div { class: CssClasses::TYPE_ICON, "{interview_type.icon()}" }
                    h3 { "{interview_type.title()}" }
                    p { "{interview_type.description()}" }
                }
            }
        }
    }
}
