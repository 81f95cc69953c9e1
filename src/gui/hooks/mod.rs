pub mod use_interview_chat;

pub use use_interview_chat::{use_interview_chat, ChatSnapshot, InterviewChatHandle};
