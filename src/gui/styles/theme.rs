//! PrepMateの配色とCSSクラス定義

use crate::feedback::ScoreTier;
use crate::interview::ChatRole;

/// 画面で使うCSSクラス名
pub struct CssClasses;

impl CssClasses {
    // アプリケーション
    pub const APP: &'static str = "app";
    pub const NAV_BAR: &'static str = "nav-bar";
    pub const NAV_BRAND: &'static str = "nav-brand";
    pub const NAV_LINKS: &'static str = "nav-links";
    pub const PAGE: &'static str = "page";
    pub const CARD: &'static str = "card";
    pub const CARD_GRID: &'static str = "card-grid";
    pub const PAGE_TITLE: &'static str = "page-title";
    pub const PAGE_SUBTITLE: &'static str = "page-subtitle";

    // フォーム
    pub const AUTH_CARD: &'static str = "auth-card";
    pub const FORM_GROUP: &'static str = "form-group";
    pub const FORM_LABEL: &'static str = "form-label";
    pub const FORM_INPUT: &'static str = "form-input";
    pub const FORM_FOOTER: &'static str = "form-footer";

    // ボタン
    pub const BTN: &'static str = "btn";
    pub const BTN_PRIMARY: &'static str = "btn-primary";
    pub const BTN_SECONDARY: &'static str = "btn-secondary";
    pub const BTN_DANGER: &'static str = "btn-danger";
    pub const BTN_LINK: &'static str = "btn-link";
    pub const BTN_ICON: &'static str = "btn-icon";

    // 面接タイプ
    pub const TYPE_CARD: &'static str = "type-card";
    pub const TYPE_ICON: &'static str = "type-icon";

    // チャット
    pub const CHAT_LAYOUT: &'static str = "chat-layout";
    pub const CHAT_HEADER: &'static str = "chat-header";
    pub const PROGRESS_BAR: &'static str = "progress-bar";
    pub const PROGRESS_FILL: &'static str = "progress-fill";
    pub const MESSAGE_LIST: &'static str = "message-list";
    pub const CHAT_MESSAGE: &'static str = "chat-message";
    pub const MESSAGE_TIMESTAMP: &'static str = "message-timestamp";
    pub const TYPING_INDICATOR: &'static str = "typing-indicator";
    pub const ANSWER_BOX: &'static str = "answer-box";
    pub const ANSWER_INPUT: &'static str = "answer-input";
    pub const MIC_ACTIVE: &'static str = "mic-active";

    // フィードバック
    pub const SCORE_CIRCLE: &'static str = "score-circle";
    pub const FEEDBACK_SECTION: &'static str = "feedback-section";

    // 状態表示
    pub const LOADING: &'static str = "loading";
    pub const ERROR_MESSAGE: &'static str = "error-message";
    pub const INFO_MESSAGE: &'static str = "info-message";
}

/// チャットメッセージのCSSクラス
pub fn get_message_class(role: ChatRole) -> String {
    let role_class = match role {
        ChatRole::Ai => "ai",
        ChatRole::User => "user",
    };
    format!("{} {}", CssClasses::CHAT_MESSAGE, role_class)
}

/// ボタンのCSSクラス
pub fn get_button_class(variant: &str) -> String {
    format!("{} {}", CssClasses::BTN, variant)
}

/// スコア表示のCSSクラス
pub fn get_score_class(tier: ScoreTier) -> String {
    format!("{} {}", CssClasses::SCORE_CIRCLE, tier.css_class())
}

/// 埋め込みCSS
pub fn get_embedded_css() -> &'static str {
    r#"
* { box-sizing: border-box; }

body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: #f4f6fa;
    color: #1f2937;
}

.app { min-height: 100vh; display: flex; flex-direction: column; }

.nav-bar {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 14px 28px;
    background: linear-gradient(135deg, #2b6cb0 0%, #1e4e79 100%);
    color: white;
}
.nav-brand { font-size: 1.3rem; font-weight: 700; cursor: pointer; }
.nav-links { display: flex; gap: 10px; }

.page { flex: 1; padding: 32px; max-width: 1000px; width: 100%; margin: 0 auto; }
.page-title { font-size: 1.8rem; margin: 0 0 6px 0; }
.page-subtitle { color: #718096; margin: 0 0 24px 0; }

.card {
    background: white;
    border-radius: 12px;
    padding: 24px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.06);
}
.card-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 18px; }

.auth-card { max-width: 420px; margin: 40px auto; }
.form-group { display: flex; flex-direction: column; margin-bottom: 14px; }
.form-label { font-size: 0.9rem; font-weight: 600; margin-bottom: 6px; }
.form-input {
    padding: 10px 12px;
    border: 1px solid #d1d5db;
    border-radius: 8px;
    font-size: 1rem;
}
.form-input:focus { outline: none; border-color: #2b6cb0; }
.form-footer { margin-top: 16px; text-align: center; color: #718096; }

.btn {
    padding: 10px 18px;
    border: none;
    border-radius: 8px;
    font-size: 0.95rem;
    font-weight: 600;
    cursor: pointer;
    transition: all 0.2s ease;
}
.btn:disabled { opacity: 0.55; cursor: not-allowed; }
.btn-primary { background: #2b6cb0; color: white; }
.btn-primary:hover:not(:disabled) { background: #5a67d8; }
.btn-secondary { background: #edf2f7; color: #1f2937; }
.btn-danger { background: #e53e3e; color: white; }
.btn-link { background: none; color: #2b6cb0; padding: 0; }
.btn-icon { background: #edf2f7; border-radius: 50%; width: 42px; height: 42px; padding: 0; }
.nav-bar .btn-secondary { background: rgba(255, 255, 255, 0.2); color: white; }

.type-card { cursor: pointer; text-align: center; border: 2px solid transparent; }
.type-card:hover { border-color: #2b6cb0; }
.type-icon { font-size: 2.4rem; margin-bottom: 8px; }

.chat-layout { display: flex; flex-direction: column; height: calc(100vh - 140px); }
.chat-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px; }
.progress-bar { height: 8px; background: #e2e8f0; border-radius: 4px; overflow: hidden; margin-bottom: 16px; }
.progress-fill { height: 100%; background: #2b6cb0; transition: width 0.4s ease; }
.message-list { flex: 1; overflow-y: auto; display: flex; flex-direction: column; gap: 12px; padding: 8px; }
.chat-message { max-width: 75%; padding: 12px 16px; border-radius: 14px; line-height: 1.5; }
.chat-message.ai { align-self: flex-start; background: white; box-shadow: 0 2px 6px rgba(0, 0, 0, 0.06); }
.chat-message.user { align-self: flex-end; background: #2b6cb0; color: white; }
.message-timestamp { display: block; font-size: 0.75rem; opacity: 0.7; margin-top: 4px; }
.typing-indicator { color: #718096; font-style: italic; }
.answer-box { display: flex; gap: 10px; align-items: flex-end; margin-top: 12px; }
.answer-input { flex: 1; min-height: 70px; resize: vertical; }
.mic-active { background: #e53e3e; color: white; }

.score-circle {
    width: 140px;
    height: 140px;
    border-radius: 50%;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    margin: 0 auto 20px auto;
    color: white;
    font-size: 2rem;
    font-weight: 700;
}
.score-top { background: #38a169; }
.score-mid { background: #d69e2e; }
.score-low { background: #e53e3e; }
.feedback-section { margin-top: 18px; }
.feedback-section ul { padding-left: 20px; }

.loading { text-align: center; color: #718096; padding: 40px; }
.error-message {
    background: #fde2e2;
    color: #c53030;
    padding: 10px 14px;
    border-radius: 8px;
    margin-bottom: 14px;
}
.info-message { background: #ebf8ff; color: #2b6cb0; padding: 10px 14px; border-radius: 8px; }
.fatal-error { padding: 40px; text-align: center; color: #c53030; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_class_by_role() {
        assert_eq!(get_message_class(ChatRole::Ai), "chat-message ai");
        assert_eq!(get_message_class(ChatRole::User), "chat-message user");
    }

    #[test]
    fn test_score_class_matches_css() {
        let css = get_embedded_css();
        for tier in [ScoreTier::Top, ScoreTier::Mid, ScoreTier::Low] {
            assert!(get_score_class(tier).starts_with("score-circle "));
            assert!(css.contains(&format!(".{}", tier.css_class())));
        }
    }
}
