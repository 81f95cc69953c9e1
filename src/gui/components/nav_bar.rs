use dioxus::prelude::*;

use crate::auth;
use crate::gui::{
    app_context::use_app_context,
    styles::theme::{get_button_class, CssClasses},
};
use crate::navigation::Route;

/// 画面上部のナビゲーションバー
#[component]
pub fn NavBar() -> Element {
    let context = use_app_context();
    // ルート変更のたびに認証状態を再評価する
    let _ = (context.route)();
    let signed_in = context.services.store.is_authenticated();

    let brand_context = context.clone();
    let home_route = if signed_in { Route::Dashboard } else { Route::Home };

    rsx! {
        nav {
            class: CssClasses::NAV_BAR,

            span {
                class: CssClasses::NAV_BRAND,
                onclick: move |_| brand_context.navigate(home_route.clone()),
                "🎯 PrepMate"
            }

            div {
                class: CssClasses::NAV_LINKS,
                if signed_in {
                    button {
                        class: get_button_class(CssClasses::BTN_SECONDARY),
                        onclick: {
                            let context = context.clone();
                            move |_| context.navigate(Route::Dashboard)
                        },
                        "Dashboard"
                    }
                    button {
                        class: get_button_class(CssClasses::BTN_SECONDARY),
                        onclick: {
                            let context = context.clone();
                            move |_| {
                                context.services.playback.cancel();
                                auth::logout(&context.services.store, context.services.navigator());
                            }
                        },
                        "Logout"
                    }
                } else {
                    button {
                        class: get_button_class(CssClasses::BTN_SECONDARY),
                        onclick: {
                            let context = context.clone();
                            move |_| context.navigate(Route::SignIn)
                        },
                        "Sign In"
                    }
                    button {
                        class: get_button_class(CssClasses::BTN_SECONDARY),
                        onclick: {
                            let context = context.clone();
                            move |_| context.navigate(Route::SignUp)
                        },
                        "Sign Up"
                    }
                }
            }
        }
    }
}
