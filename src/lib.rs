pub mod api;
pub mod auth;
pub mod config_manager;
pub mod feedback;
pub mod forms;
pub mod gui;
pub mod interview;
pub mod navigation;
pub mod resume;
pub mod session;
pub mod voice;

// Re-export the main types for convenience
pub use api::{ApiClient, ApiError, ApiResult};
pub use feedback::{FeedbackReport, ScoreTier};
pub use forms::{FormError, ValidationError};
pub use interview::{InterviewFlow, InterviewType};
pub use navigation::{Navigator, Route};
pub use session::{ResumeId, SessionId, SessionStore};
