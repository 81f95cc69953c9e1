use dioxus::prelude::*;

use crate::auth;
use crate::forms::{LoginForm, SignupForm};
use crate::gui::{
    app_context::use_app_context,
    styles::theme::{get_button_class, CssClasses},
};
use crate::navigation::Route;

/// サインイン画面
#[component]
pub fn SignInPage() -> Element {
    let context = use_app_context();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let submit_context = context.clone();
    let on_submit = move |event: FormEvent| {
        event.prevent_default();
        if submitting() {
            return;
        }
        let context = submit_context.clone();
        let form = LoginForm {
            email: email(),
            password: password(),
        };
        spawn(async move {
            submitting.set(true);
            error.set(None);
            let services = &context.services;
            if let Err(e) =
                auth::sign_in(&services.api, &services.store, services.navigator(), &form).await
            {
                tracing::warn!("🔐 Sign-in failed: {}", e);
                error.set(Some(e.user_message()));
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: format!("{} {}", CssClasses::CARD, CssClasses::AUTH_CARD),
            h2 { class: CssClasses::PAGE_TITLE, "Welcome back" }
            p { class: CssClasses::PAGE_SUBTITLE, "Sign in to continue your interview practice" }

            if let Some(message) = error() {
                div { class: CssClasses::ERROR_MESSAGE, "{message}" }
            }

            form {
                onsubmit: on_submit,

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "Email" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |event| email.set(event.value()),
                    }
                }

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "Password" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "password",
                        value: "{password}",
                        oninput: move |event| password.set(event.value()),
                    }
                }

                button {
                    class: get_button_class(CssClasses::BTN_PRIMARY),
                    style: "width: 100%;",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign In" }
                }
            }

            div {
                class: CssClasses::FORM_FOOTER,
                "Don't have an account? "
                button {
                    class: CssClasses::BTN_LINK,
                    onclick: move |_| context.navigate(Route::SignUp),
                    "Sign up"
                }
            }
        }
    }
}

/// 新規登録画面
#[component]
pub fn SignUpPage() -> Element {
    let context = use_app_context();
    let mut full_name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let submit_context = context.clone();
    let on_submit = move |event: FormEvent| {
        event.prevent_default();
        if submitting() {
            return;
        }
        let context = submit_context.clone();
        let form = SignupForm {
            full_name: full_name(),
            email: email(),
            password: password(),
            confirm_password: confirm_password(),
        };
        spawn(async move {
            submitting.set(true);
            error.set(None);
            let services = &context.services;
            if let Err(e) =
                auth::sign_up(&services.api, &services.store, services.navigator(), &form).await
            {
                tracing::warn!("🔐 Sign-up failed: {}", e);
                error.set(Some(e.user_message()));
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: format!("{} {}", CssClasses::CARD, CssClasses::AUTH_CARD),
            h2 { class: CssClasses::PAGE_TITLE, "Create your account" }
            p { class: CssClasses::PAGE_SUBTITLE, "Start practicing interviews in minutes" }

            if let Some(message) = error() {
                div { class: CssClasses::ERROR_MESSAGE, "{message}" }
            }

            form {
                onsubmit: on_submit,

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "Full name" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "text",
                        value: "{full_name}",
                        oninput: move |event| full_name.set(event.value()),
                    }
                }

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "Email" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: "{email}",
                        oninput: move |event| email.set(event.value()),
                    }
                }

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "Password" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "password",
                        placeholder: "At least 6 characters",
                        value: "{password}",
                        oninput: move |event| password.set(event.value()),
                    }
                }

                div {
                    class: CssClasses::FORM_GROUP,
                    label { class: CssClasses::FORM_LABEL, "Confirm password" }
                    input {
                        class: CssClasses::FORM_INPUT,
                        r#type: "password",
                        value: "{confirm_password}",
                        oninput: move |event| confirm_password.set(event.value()),
                    }
                }

                button {
                    class: get_button_class(CssClasses::BTN_PRIMARY),
                    style: "width: 100%;",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Creating account..." } else { "Sign Up" }
                }
            }

            div {
                class: CssClasses::FORM_FOOTER,
                "Already have an account? "
                button {
                    class: CssClasses::BTN_LINK,
                    onclick: move |_| context.navigate(Route::SignIn),
                    "Sign in"
                }
            }
        }
    }
}
