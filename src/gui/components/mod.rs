// Dioxus GUI Components Module

pub mod auth_forms;
pub mod dashboard;
pub mod feedback_view;
pub mod home;
pub mod interview_chat;
pub mod interview_setup;
pub mod main_window;
pub mod nav_bar;
pub mod protected;
pub mod upload_resume;

// Re-exports for convenience
pub use auth_forms::{SignInPage, SignUpPage};
pub use dashboard::DashboardPage;
pub use feedback_view::FeedbackPage;
pub use home::HomePage;
pub use interview_chat::InterviewChatPage;
pub use interview_setup::InterviewSetupPage;
pub use main_window::MainWindow;
pub use nav_bar::NavBar;
pub use protected::Protected;
pub use upload_resume::UploadResumePage;
