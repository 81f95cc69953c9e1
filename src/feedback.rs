//! 面接フィードバック
//!
//! 完了した面接セッションの採点レポートを1度だけ取得し、スコア帯に応じた表示情報を提供します。

use serde::{Deserialize, Serialize};

use crate::interview::flow::InterviewBackend;
use crate::navigation::{Navigator, Route};
use crate::session::{SessionId, SessionStore};

/// 採点レポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    /// 0〜10
    pub overall_score: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub communication_feedback: String,
    #[serde(default)]
    pub technical_feedback: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl FeedbackReport {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.overall_score)
    }

    /// スコアバーの幅（0〜100%）
    pub fn score_percentage(&self) -> u8 {
        (self.overall_score.clamp(0.0, 10.0) * 10.0).round() as u8
    }

    /// "8.5/10" 形式
    pub fn formatted_score(&self) -> String {
        let score = self.overall_score.clamp(0.0, 10.0);
        if score.fract() == 0.0 {
            format!("{:.0}/10", score)
        } else {
            format!("{:.1}/10", score)
        }
    }
}

/// スコア帯
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// 8以上
    Top,
    /// 6以上
    Mid,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreTier::Top
        } else if score >= 6.0 {
            ScoreTier::Mid
        } else {
            ScoreTier::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ScoreTier::Top => "#38a169",
            ScoreTier::Mid => "#d69e2e",
            ScoreTier::Low => "#e53e3e",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreTier::Top => "score-top",
            ScoreTier::Mid => "score-mid",
            ScoreTier::Low => "score-low",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            ScoreTier::Top => "⭐",
            ScoreTier::Mid => "👍",
            ScoreTier::Low => "📈",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Top => "Excellent",
            ScoreTier::Mid => "Good",
            ScoreTier::Low => "Needs Improvement",
        }
    }
}

/// フィードバック画面の状態
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackState {
    Loading,
    Loaded(FeedbackReport),
    Failed(String),
}

/// 画面表示に使うセッションIDを決定する
///
/// クエリ → 保存済みの値の順に参照し、どちらもなければダッシュボードへ遷移します。
pub fn resolve_session(
    query: Option<SessionId>,
    store: &SessionStore,
    navigator: &dyn Navigator,
) -> Option<SessionId> {
    let session_id = query.or_else(|| store.session_reference());
    if session_id.is_none() {
        tracing::info!("📋 [FEEDBACK] No session reference, redirecting to dashboard");
        navigator.navigate(Route::Dashboard);
    }
    session_id
}

/// セッション単位のフィードバック取得（再試行・キャッシュなし、取得は1度だけ）
pub struct FeedbackView {
    session_id: SessionId,
    state: FeedbackState,
    fetched: bool,
}

impl FeedbackView {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            state: FeedbackState::Loading,
            fetched: false,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn state(&self) -> &FeedbackState {
        &self.state
    }

    /// レポートを取得（2回目以降は取得済みの状態を返す）
    pub async fn load(&mut self, backend: &dyn InterviewBackend) -> &FeedbackState {
        if self.fetched {
            return &self.state;
        }
        self.fetched = true;

        tracing::info!(session_id = %self.session_id, "📋 [FEEDBACK] Fetching report");
        self.state = match backend.feedback(self.session_id).await {
            Ok(report) => {
                tracing::info!(
                    score = report.overall_score,
                    "✅ [FEEDBACK] Report received"
                );
                FeedbackState::Loaded(report)
            }
            Err(e) => {
                tracing::error!("❌ [FEEDBACK] Failed to fetch report: {}", e);
                FeedbackState::Failed(e.user_message())
            }
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: f64) -> FeedbackReport {
        FeedbackReport {
            overall_score: score,
            strengths: vec![],
            weaknesses: vec![],
            communication_feedback: String::new(),
            technical_feedback: String::new(),
            suggestions: vec![],
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ScoreTier::from_score(10.0), ScoreTier::Top);
        assert_eq!(ScoreTier::from_score(8.0), ScoreTier::Top);
        assert_eq!(ScoreTier::from_score(7.9), ScoreTier::Mid);
        assert_eq!(ScoreTier::from_score(6.0), ScoreTier::Mid);
        assert_eq!(ScoreTier::from_score(5.9), ScoreTier::Low);
        assert_eq!(ScoreTier::from_score(0.0), ScoreTier::Low);
    }

    #[test]
    fn test_score_nine_is_green_with_star() {
        let tier = report(9.0).tier();
        assert_eq!(tier.color(), "#38a169");
        assert_eq!(tier.badge(), "⭐");
    }

    #[test]
    fn test_score_five_is_red_with_uptrend() {
        let tier = report(5.0).tier();
        assert_eq!(tier.color(), "#e53e3e");
        assert_eq!(tier.badge(), "📈");
    }

    #[test]
    fn test_score_formatting() {
        assert_eq!(report(8.0).formatted_score(), "8/10");
        assert_eq!(report(7.5).formatted_score(), "7.5/10");
        assert_eq!(report(7.5).score_percentage(), 75);
        assert_eq!(report(12.0).score_percentage(), 100);
    }

    #[test]
    fn test_report_tolerates_missing_lists() {
        let parsed: FeedbackReport = serde_json::from_str(r#"{"overall_score": 6.5}"#).unwrap();
        assert!(parsed.strengths.is_empty());
        assert_eq!(parsed.tier(), ScoreTier::Mid);
    }

    #[derive(Default)]
    struct Recorder(parking_lot::Mutex<Vec<Route>>);

    impl Navigator for Recorder {
        fn navigate(&self, route: Route) {
            self.0.lock().push(route);
        }
    }

    #[test]
    fn test_resolve_session_prefers_query() {
        let store = SessionStore::in_memory();
        store.set_session_reference(SessionId(1));
        let navigator = Recorder::default();

        assert_eq!(
            resolve_session(Some(SessionId(2)), &store, &navigator),
            Some(SessionId(2))
        );
        assert_eq!(resolve_session(None, &store, &navigator), Some(SessionId(1)));
        assert!(navigator.0.lock().is_empty());
    }

    #[test]
    fn test_resolve_session_without_reference_goes_to_dashboard() {
        let store = SessionStore::in_memory();
        let navigator = Recorder::default();

        assert_eq!(resolve_session(None, &store, &navigator), None);
        assert_eq!(*navigator.0.lock(), vec![Route::Dashboard]);
    }
}
