use dioxus::prelude::*;

use crate::gui::app_context::use_app_context;
use crate::navigation::guard::{guard, GuardDecision};

/// 認証済みの場合のみ子要素を表示するラッパー
///
/// 未認証の場合は子要素を一度も描画せずにサインイン画面へ遷移します。
#[component]
pub fn Protected(children: Element) -> Element {
    let context = use_app_context();
    let decision = use_hook(|| guard(&context.services.store, context.services.navigator()));

    match decision {
        GuardDecision::Render => children,
        GuardDecision::Redirect(_) => rsx! {},
    }
}
