pub mod interview_flow;

pub use interview_flow::{InterviewFlow, InterviewOutcome};
