pub mod evaluation;
pub mod loaders;
pub mod question;
pub mod question_bank;
pub mod session;

pub use evaluation::{average_score, normalize_score, EvaluationRecord, ScoreBand};
pub use loaders::{load_or_curated, load_question_bank};
pub use question::{Difficulty, QuestionAnswer};
pub use question_bank::{QuestionBank, QuestionCounts};
pub use session::{InterviewSession, SessionStage};
