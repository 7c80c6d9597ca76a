//! 面试会话状态
//!
//! 显式的会话状态结构，由界面层持有并传给流程层，不使用全局可变状态。
//!
//! ```text
//! Collecting ──(最后一题作答 / begin_evaluation)──▶ Evaluating ──(finish)──▶ Done
//! ```

use std::fmt::Display;

use crate::error::{AppResult, SessionError};
use crate::models::evaluation::{average_score, EvaluationRecord};
use crate::models::question::QuestionAnswer;

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStage {
    /// 收集答案
    Collecting,
    /// 等待评估
    Evaluating,
    /// 完成，只读
    Done,
}

impl Display for SessionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionStage::Collecting => "collecting",
            SessionStage::Evaluating => "evaluating",
            SessionStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// 面试会话
///
/// `evaluations[i]` 对应 `answers[i]`。
#[derive(Debug, Clone)]
pub struct InterviewSession {
    questions: Vec<String>,
    answers: Vec<QuestionAnswer>,
    evaluations: Vec<EvaluationRecord>,
    summary: Option<String>,
    stage: SessionStage,
}

impl InterviewSession {
    /// 用选好的题目创建会话；没有题目时直接进入评估阶段
    pub fn new(questions: Vec<String>) -> Self {
        let stage = if questions.is_empty() {
            SessionStage::Evaluating
        } else {
            SessionStage::Collecting
        };
        Self {
            questions,
            answers: Vec::new(),
            evaluations: Vec::new(),
            summary: None,
            stage,
        }
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[QuestionAnswer] {
        &self.answers
    }

    pub fn evaluations(&self) -> &[EvaluationRecord] {
        &self.evaluations
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// 当前待作答的题目
    pub fn current_question(&self) -> Option<&str> {
        if self.stage != SessionStage::Collecting {
            return None;
        }
        self.questions.get(self.answers.len()).map(String::as_str)
    }

    /// (已作答, 总题数)
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }

    /// 提交当前题目的答案，最后一题提交后自动进入评估阶段
    pub fn submit_answer(&mut self, answer: impl Into<String>) -> AppResult<()> {
        self.expect_stage(SessionStage::Collecting)?;

        let question = self.questions[self.answers.len()].clone();
        self.answers.push(QuestionAnswer::new(question, answer));

        if self.answers.len() == self.questions.len() {
            self.stage = SessionStage::Evaluating;
        }
        Ok(())
    }

    /// 提前结束收集（未作答的题目不参与评估）
    pub fn begin_evaluation(&mut self) -> AppResult<()> {
        match self.stage {
            SessionStage::Collecting => {
                self.stage = SessionStage::Evaluating;
                Ok(())
            }
            SessionStage::Evaluating => Ok(()),
            SessionStage::Done => Err(self.wrong_stage(SessionStage::Collecting)),
        }
    }

    /// 写入评估结果与总结，会话进入只读状态
    pub fn finish(&mut self, evaluations: Vec<EvaluationRecord>, summary: String) -> AppResult<()> {
        self.expect_stage(SessionStage::Evaluating)?;

        if evaluations.len() != self.answers.len() {
            return Err(SessionError::LengthMismatch {
                answers: self.answers.len(),
                evaluations: evaluations.len(),
            }
            .into());
        }

        self.evaluations = evaluations;
        self.summary = Some(summary);
        self.stage = SessionStage::Done;
        Ok(())
    }

    /// 平均分（只统计纯数字分数）
    pub fn average_score(&self) -> f64 {
        average_score(&self.evaluations)
    }

    /// 用新题目重新开始
    pub fn reset(&mut self, questions: Vec<String>) {
        *self = Self::new(questions);
    }

    fn expect_stage(&self, expected: SessionStage) -> AppResult<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(self.wrong_stage(expected))
        }
    }

    fn wrong_stage(&self, expected: SessionStage) -> crate::error::AppError {
        SessionError::WrongStage {
            expected: expected.to_string(),
            actual: self.stage.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn record(score: &str) -> EvaluationRecord {
        EvaluationRecord {
            score: score.to_string(),
            justification: "j".to_string(),
            explanation: "e".to_string(),
            tip: "t".to_string(),
        }
    }

    #[test]
    fn test_collecting_to_done() {
        let mut session = InterviewSession::new(vec!["Q1".to_string(), "Q2".to_string()]);
        assert_eq!(session.stage(), SessionStage::Collecting);
        assert_eq!(session.current_question(), Some("Q1"));

        session.submit_answer("A1").unwrap();
        assert_eq!(session.current_question(), Some("Q2"));
        assert_eq!(session.progress(), (1, 2));

        session.submit_answer("").unwrap();
        assert_eq!(session.stage(), SessionStage::Evaluating);
        assert_eq!(session.current_question(), None);
        assert_eq!(session.answers()[1], QuestionAnswer::new("Q2", ""));

        session
            .finish(vec![record("4"), record("2")], "summary".to_string())
            .unwrap();
        assert_eq!(session.stage(), SessionStage::Done);
        assert_eq!(session.summary(), Some("summary"));
        assert!((session.average_score() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_submit_after_collection_is_error() {
        let mut session = InterviewSession::new(vec!["Q1".to_string()]);
        session.submit_answer("A1").unwrap();

        let err = session.submit_answer("late").unwrap_err();
        assert!(matches!(err, AppError::Session(SessionError::WrongStage { .. })));
    }

    #[test]
    fn test_finish_requires_matching_length() {
        let mut session = InterviewSession::new(vec!["Q1".to_string()]);
        session.submit_answer("A1").unwrap();

        let err = session.finish(vec![], "s".to_string()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Session(SessionError::LengthMismatch { answers: 1, evaluations: 0 })
        ));
        assert_eq!(session.stage(), SessionStage::Evaluating);
    }

    #[test]
    fn test_begin_evaluation_early_and_reset() {
        let mut session = InterviewSession::new(vec!["Q1".to_string(), "Q2".to_string()]);
        session.submit_answer("A1").unwrap();
        session.begin_evaluation().unwrap();
        assert_eq!(session.stage(), SessionStage::Evaluating);
        assert_eq!(session.answers().len(), 1);

        session.finish(vec![record("5")], "s".to_string()).unwrap();
        assert!(session.begin_evaluation().is_err());

        session.reset(vec!["Q3".to_string()]);
        assert_eq!(session.stage(), SessionStage::Collecting);
        assert!(session.evaluations().is_empty());
        assert_eq!(session.summary(), None);
    }

    #[test]
    fn test_empty_session_starts_in_evaluating() {
        let session = InterviewSession::new(Vec::new());
        assert_eq!(session.stage(), SessionStage::Evaluating);
        assert_eq!(session.average_score(), 0.0);
    }
}
