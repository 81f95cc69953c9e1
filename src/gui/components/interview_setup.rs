use dioxus::prelude::*;

use crate::gui::{app_context::use_app_context, styles::theme::CssClasses};
use crate::interview::{prepare_setup, start_interview, InterviewType, SetupOutcome};

/// 面接タイプ選択画面
#[component]
pub fn InterviewSetupPage() -> Element {
    let context = use_app_context();
    let outcome = use_hook(|| prepare_setup(&context.services.store, context.services.navigator()));
    let mut starting = use_signal(|| None::<InterviewType>);
    let mut error = use_signal(|| None::<String>);

    let SetupOutcome::Cards(types) = outcome else {
        return rsx! {};
    };

    let busy = starting().is_some();

    rsx! {
        h1 { class: CssClasses::PAGE_TITLE, "Choose your interview type" }
        p { class: CssClasses::PAGE_SUBTITLE, "Questions are tailored to your resume and the type you pick." }

        if let Some(message) = error() {
            div { class: CssClasses::ERROR_MESSAGE, "{message}" }
        }

        div {
            class: CssClasses::CARD_GRID,
            for interview_type in types {
                div {
                    key: "{interview_type}",
                    class: format!("{} {}", CssClasses::CARD, CssClasses::TYPE_CARD),
                    style: if busy { "pointer-events: none; opacity: 0.6;" } else { "" },
                    onclick: {
                        let context = context.clone();
                        move |_| {
                            if starting().is_some() {
                                return;
                            }
                            let context = context.clone();
                            spawn(async move {
                                starting.set(Some(interview_type));
                                error.set(None);
                                let services = &context.services;
                                if let Err(e) = start_interview(
                                    services.api.as_ref(),
                                    &services.store,
                                    services.navigator(),
                                    interview_type,
                                )
                                .await
                                {
                                    tracing::warn!("🚀 Failed to start interview: {}", e);
                                    error.set(Some(e.user_message()));
                                }
                                starting.set(None);
                            });
                        }
                    },
                    div { class: CssClasses::TYPE_ICON, "{interview_type.icon()}" }
                    h3 { "{interview_type.title()}" }
                    p { "{interview_type.description()}" }
                    if starting() == Some(interview_type) {
                        div { class: CssClasses::TYPING_INDICATOR, "Starting..." }
                    }
                }
            }
        }
    }
}
