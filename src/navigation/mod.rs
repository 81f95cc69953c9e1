//! 画面遷移
//!
//! 画面ごとのルートと、コアロジックから画面遷移を要求するための `Navigator` を提供します。
//! GUIでは `ChannelNavigator` がアプリコンテキストのルートシグナルへ遷移を届けます。

pub mod guard;

use std::fmt;

use tokio::sync::mpsc;

use crate::interview::InterviewType;
use crate::session::SessionId;

pub use guard::{guard, GuardDecision};

/// アプリケーションの画面
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// ランディングページ
    #[default]
    Home,
    SignIn,
    SignUp,
    Dashboard,
    UploadResume,
    InterviewSetup,
    /// 面接チャット（クエリで面接タイプを受け取る）
    InterviewChat {
        interview_type: Option<InterviewType>,
    },
    /// フィードバック表示（クエリでセッションIDを受け取る）
    Feedback { session_id: Option<SessionId> },
}

impl Route {
    /// パス（クエリ付き）を生成
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::SignIn => "/login".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::UploadResume => "/upload-resume".to_string(),
            Route::InterviewSetup => "/interview-setup".to_string(),
            Route::InterviewChat { interview_type } => match interview_type {
                Some(t) => format!("/interview?type={}", urlencoding::encode(t.as_str())),
                None => "/interview".to_string(),
            },
            Route::Feedback { session_id } => match session_id {
                Some(id) => format!("/feedback?session_id={}", id),
                None => "/feedback".to_string(),
            },
        }
    }

    /// セッションが必要な画面かどうか
    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Home | Route::SignIn | Route::SignUp)
    }

    /// パス文字列からルートを復元
    ///
    /// 不明なパスは `None`。クエリの値が解釈できない場合はクエリなしとして扱います。
    pub fn parse(path: &str) -> Option<Route> {
        let (base, query) = match path.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (path, None),
        };
        let param = |name: &str| -> Option<String> {
            query?.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                if key == name {
                    urlencoding::decode(value).ok().map(|v| v.into_owned())
                } else {
                    None
                }
            })
        };

        match base {
            "/" => Some(Route::Home),
            "/login" => Some(Route::SignIn),
            "/signup" => Some(Route::SignUp),
            "/dashboard" => Some(Route::Dashboard),
            "/upload-resume" => Some(Route::UploadResume),
            "/interview-setup" => Some(Route::InterviewSetup),
            "/interview" => Some(Route::InterviewChat {
                interview_type: param("type").and_then(|t| t.parse().ok()),
            }),
            "/feedback" => Some(Route::Feedback {
                session_id: param("session_id").and_then(|id| id.parse().ok()),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// 画面遷移を要求するインターフェース
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// mpscチャネル経由で遷移を届けるナビゲーター
#[derive(Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    /// ナビゲーターと受信側を作成
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!("🧭 [NAV] → {}", route);
        if self.sender.send(route).is_err() {
            tracing::warn!("⚠️ [NAV] Navigation receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_path_carries_session_id() {
        let route = Route::Feedback {
            session_id: Some(SessionId(42)),
        };
        assert_eq!(route.path(), "/feedback?session_id=42");
    }

    #[test]
    fn test_parse_round_trip() {
        let routes = vec![
            Route::Home,
            Route::SignIn,
            Route::Dashboard,
            Route::InterviewChat {
                interview_type: Some(InterviewType::Aptitude),
            },
            Route::Feedback {
                session_id: Some(SessionId(7)),
            },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_ignores_bad_query() {
        assert_eq!(
            Route::parse("/feedback?session_id=abc"),
            Some(Route::Feedback { session_id: None })
        );
        assert_eq!(Route::parse("/unknown"), None);
    }

    #[test]
    fn test_protected_routes() {
        assert!(!Route::Home.requires_session());
        assert!(!Route::SignIn.requires_session());
        assert!(Route::Dashboard.requires_session());
        assert!(Route::Feedback { session_id: None }.requires_session());
    }

    #[tokio::test]
    async fn test_channel_navigator_delivers_routes() {
        let (navigator, mut receiver) = ChannelNavigator::new();
        navigator.navigate(Route::SignIn);
        assert_eq!(receiver.recv().await, Some(Route::SignIn));
    }
}
