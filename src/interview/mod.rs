//! 模擬面接
//!
//! 面接タイプ選択（`setup`）と、質問・回答を繰り返すチャットフロー（`flow`）。

pub mod flow;
pub mod models;
pub mod setup;

pub use flow::{
    EntryOutcome, FlowContext, FlowError, FlowState, InterviewBackend, InterviewFlow,
    COMPLETION_DELAY, QUESTION_LIMIT,
};
pub use models::{ChatMessage, ChatRole, InterviewType, UnknownInterviewType};
pub use setup::{prepare_setup, start_interview, SetupOutcome, StartError};
