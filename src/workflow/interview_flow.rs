//! 面试评估流程 - 流程层
//!
//! 核心职责：定义"一场面试"的评估流程，也是外部调用核心的唯一入口
//!
//! 流程顺序：
//! 1. 逐题评估（各题互不依赖，可并发，结果顺序与输入一致）
//! 2. 全部完成后汇总一次（汇合点，不与评估重叠）

use futures::stream::{self, StreamExt};
use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::evaluation::EvaluationRecord;
use crate::models::question::QuestionAnswer;
use crate::models::session::InterviewSession;
use crate::services::{Aggregator, CompletionPort, Evaluator};
use crate::utils::logging::log_interview_complete;
use crate::utils::truncate_text;

/// 一次评估的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewOutcome {
    /// 与输入一一对应
    pub evaluations: Vec<EvaluationRecord>,
    pub summary: String,
}

/// 面试评估流程
///
/// - 只持有补全端口，不持有会话状态
/// - 只依赖业务能力（services）
pub struct InterviewFlow<P> {
    port: P,
    max_concurrent: usize,
}

impl<P: CompletionPort> InterviewFlow<P> {
    /// 顺序评估
    pub fn new(port: P) -> Self {
        Self {
            port,
            max_concurrent: 1,
        }
    }

    /// 按配置设置并发数
    pub fn from_config(port: P, config: &Config) -> Self {
        Self::new(port).with_concurrency(config.max_concurrent_evaluations)
    }

    /// 设置同时评估的题数（至少为 1）
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// 评估全部作答并生成总结
    pub async fn run(&self, answers: &[QuestionAnswer]) -> InterviewOutcome {
        let evaluator = Evaluator::new(&self.port);
        let evaluator = &evaluator;
        let total = answers.len();

        info!("📝 开始评估 {} 道题（并发数 {}）", total, self.max_concurrent);

        // buffered 保证输出顺序与输入顺序一致
        let evaluations: Vec<EvaluationRecord> = stream::iter(answers.iter().enumerate())
            .map(|(i, qa)| async move {
                info!("[题目 {}/{}] 评估中: {}", i + 1, total, truncate_text(&qa.question, 40));
                let record = evaluator.evaluate(&qa.question, &qa.answer).await;
                info!("[题目 {}/{}] ✓ 得分 {}", i + 1, total, record.score);
                record
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let summary = Aggregator::new(&self.port).summarize(&evaluations).await;

        let parsed = evaluations.iter().filter(|ev| !ev.is_fallback()).count();
        log_interview_complete(total, parsed, crate::models::average_score(&evaluations));

        InterviewOutcome { evaluations, summary }
    }

    /// 结束会话：Collecting/Evaluating → Done
    pub async fn conclude(&self, session: &mut InterviewSession) -> AppResult<()> {
        session.begin_evaluation()?;
        let outcome = self.run(session.answers()).await;
        session.finish(outcome.evaluations, outcome.summary)
    }
}
