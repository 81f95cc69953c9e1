use dioxus::prelude::*;

use crate::gui::{
    hooks::use_interview_chat,
    styles::theme::{get_button_class, get_message_class, CssClasses},
};
use crate::interview::{FlowState, InterviewType};
use crate::voice::CaptureState;

/// 面接チャット画面
#[component]
pub fn InterviewChatPage(interview_type: Option<InterviewType>) -> Element {
    let chat = use_interview_chat(interview_type);
    let snapshot = (chat.snapshot)();
    let mut answer = chat.answer;
    let busy = (chat.busy)();

    let state = snapshot.state;
    if state == FlowState::AwaitingType {
        // 前提条件不足で面接設定画面へ遷移中
        return rsx! {};
    }

    let title = snapshot
        .interview_type
        .map(|t| format!("{} {}", t.icon(), t.title()))
        .unwrap_or_else(|| "Interview".to_string());

    let can_type = snapshot.accepts_answer() && !busy;
    let waiting_label = match state {
        FlowState::FetchingQuestion => Some("Interviewer is preparing the next question..."),
        FlowState::SubmittingAnswer => Some("Evaluating your answer..."),
        _ if busy => Some("Evaluating your answer..."),
        _ => None,
    };

    let capture_state = (chat.capture_state)();
    let mic_class = if capture_state == CaptureState::Capturing {
        format!("{} {}", get_button_class(CssClasses::BTN_ICON), CssClasses::MIC_ACTIVE)
    } else {
        get_button_class(CssClasses::BTN_ICON)
    };
    let mic_title = match capture_state {
        CaptureState::Idle => "Start voice input",
        CaptureState::Capturing => "Stop voice input",
        CaptureState::StoppingRequested => "Stopping...",
    };
    let speaker_icon = if (chat.playback_enabled)() { "🔊" } else { "🔇" };

    let submit_chat = chat.clone();
    let key_chat = chat.clone();
    let retry_chat = chat.clone();
    let mic_chat = chat.clone();
    let speaker_chat = chat.clone();

    rsx! {
        div {
            class: CssClasses::CHAT_LAYOUT,

            div {
                class: CssClasses::CHAT_HEADER,
                h2 { style: "margin: 0;", "{title}" }
                span { "Question {snapshot.question_number} of {snapshot.question_limit}" }
            }

            div {
                class: CssClasses::PROGRESS_BAR,
                div {
                    class: CssClasses::PROGRESS_FILL,
                    style: "width: {snapshot.progress}%;",
                }
            }

            div {
                class: CssClasses::MESSAGE_LIST,
                for message in snapshot.messages.iter() {
                    div {
                        key: "{message.id}",
                        class: get_message_class(message.role),
                        "{message.text}"
                        span { class: CssClasses::MESSAGE_TIMESTAMP, "{message.formatted_time()}" }
                    }
                }

                if let Some(label) = waiting_label {
                    div { class: CssClasses::TYPING_INDICATOR, "{label}" }
                }

                if snapshot.is_completed() {
                    div {
                        class: CssClasses::INFO_MESSAGE,
                        "✅ Interview complete! Preparing your feedback..."
                    }
                }
            }

            if let Some(error) = snapshot.error.clone() {
                div {
                    class: CssClasses::ERROR_MESSAGE,
                    "{error} "
                    if snapshot.can_retry {
                        button {
                            class: CssClasses::BTN_LINK,
                            disabled: busy,
                            onclick: move |_| retry_chat.retry(),
                            "Retry"
                        }
                    }
                }
            }

            if let Some(notice) = (chat.notice)() {
                div { class: CssClasses::ERROR_MESSAGE, "{notice}" }
            }

            if let Some(voice_error) = (chat.voice_error)() {
                div { class: CssClasses::ERROR_MESSAGE, "🎤 {voice_error}" }
            }

            if !snapshot.is_completed() {
                div {
                    class: CssClasses::ANSWER_BOX,
                    textarea {
                        class: format!("{} {}", CssClasses::FORM_INPUT, CssClasses::ANSWER_INPUT),
                        placeholder: "Type your answer... (Enter to send, Shift+Enter for a new line)",
                        value: "{answer}",
                        disabled: !can_type,
                        oninput: move |event| answer.set(event.value()),
                        onkeydown: move |event: KeyboardEvent| {
                            if event.key() == Key::Enter && !event.modifiers().contains(Modifiers::SHIFT) {
                                event.prevent_default();
                                key_chat.submit();
                            }
                        },
                    }
                    button {
                        class: mic_class,
                        title: mic_title,
                        disabled: !chat.voice_input_supported() || !can_type,
                        onclick: move |_| mic_chat.toggle_capture(),
                        "🎤"
                    }
                    button {
                        class: get_button_class(CssClasses::BTN_ICON),
                        title: "Toggle question playback",
                        disabled: !chat.playback_supported(),
                        onclick: move |_| speaker_chat.toggle_playback(),
                        "{speaker_icon}"
                    }
                    button {
                        class: get_button_class(CssClasses::BTN_PRIMARY),
                        disabled: !can_type || answer.read().trim().is_empty(),
                        onclick: move |_| submit_chat.submit(),
                        "Send"
                    }
                }
            }
        }
    }
}
