use dioxus::prelude::*;

use crate::feedback::{resolve_session, FeedbackReport, FeedbackState, FeedbackView};
use crate::gui::{
    app_context::use_app_context,
    styles::theme::{get_button_class, get_score_class, CssClasses},
};
use crate::navigation::Route;
use crate::session::SessionId;

/// フィードバック画面
#[component]
pub fn FeedbackPage(session_id: Option<SessionId>) -> Element {
    let context = use_app_context();
    let resolved = use_hook(|| {
        resolve_session(session_id, &context.services.store, context.services.navigator())
    });

    let backend = context.services.backend();
    let report = use_resource(move || {
        let backend = backend.clone();
        async move {
            match resolved {
                Some(session_id) => {
                    let mut view = FeedbackView::new(session_id);
                    let state = view.load(backend.as_ref()).await.clone();
                    state
                }
                None => FeedbackState::Loading,
            }
        }
    });

    if resolved.is_none() {
        return rsx! {};
    }

    let state = report.read().clone().unwrap_or(FeedbackState::Loading);

    rsx! {
        h1 { class: CssClasses::PAGE_TITLE, "Interview Feedback" }

        match state {
            FeedbackState::Loading => rsx! {
                div { class: CssClasses::LOADING, "⏳ Analyzing your interview..." }
            },
            FeedbackState::Failed(message) => rsx! {
                div { class: CssClasses::ERROR_MESSAGE, "{message}" }
            },
            FeedbackState::Loaded(report) => rsx! {
                ReportView { report }
            },
        }

        div {
            style: "text-align: center; margin-top: 24px;",
            button {
                class: get_button_class(CssClasses::BTN_PRIMARY),
                onclick: move |_| context.navigate(Route::Dashboard),
                "Back to Dashboard"
            }
        }
    }
}

#[component]
fn ReportView(report: FeedbackReport) -> Element {
    let tier = report.tier();

    rsx! {
        div {
            class: CssClasses::CARD,

            div {
                class: get_score_class(tier),
                "{report.formatted_score()}"
                span { style: "font-size: 1rem;", "{tier.badge()} {tier.label()}" }
            }

            FeedbackList { title: "💪 Strengths", items: report.strengths.clone() }
            FeedbackList { title: "🔧 Areas to Improve", items: report.weaknesses.clone() }

            if !report.communication_feedback.is_empty() {
                div {
                    class: CssClasses::FEEDBACK_SECTION,
                    h3 { "🗣️ Communication" }
                    p { "{report.communication_feedback}" }
                }
            }

            if !report.technical_feedback.is_empty() {
                div {
                    class: CssClasses::FEEDBACK_SECTION,
                    h3 { "🧠 Technical" }
                    p { "{report.technical_feedback}" }
                }
            }

            FeedbackList { title: "💡 Suggestions", items: report.suggestions.clone() }
        }
    }
}

#[component]
fn FeedbackList(title: &'static str, items: Vec<String>) -> Element {
    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: CssClasses::FEEDBACK_SECTION,
            h3 { "{title}" }
            ul {
                for item in items.iter() {
                    li { "{item}" }
                }
            }
        }
    }
}
