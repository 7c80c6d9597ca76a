pub mod aggregator;
pub mod completion;
pub mod evaluator;
pub mod llm_service;
pub mod question_generator;
pub mod report_writer;
pub mod response_parser;

pub use aggregator::{Aggregator, NO_EVALUATIONS};
pub use completion::{is_error_marker, CompletionPort, ScriptedCompletion};
pub use evaluator::Evaluator;
pub use llm_service::LlmService;
pub use question_generator::QuestionGenerator;
pub use report_writer::ReportWriter;
