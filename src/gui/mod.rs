//! デスクトップGUI（Dioxus）
//!
//! 画面はすべて `Route` の切り替えで表示し、画面遷移は `Navigator` 経由で行います。

pub mod app_context; // サービス群とルートSignal
pub mod components;
pub mod hooks;
pub mod styles;
pub mod utils; // ログ初期化など

pub use app_context::{install_services, use_app_context, AppContext, AppServices};
pub use components::MainWindow;
