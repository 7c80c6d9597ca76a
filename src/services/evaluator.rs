//! 答案评估服务 - 业务能力层
//!
//! 只负责"给一道题打分"：拼提示词 → 调一次补全 → 解析 → 归一化。
//! 不重试、不缓存，也不记得之前的题目。

use tracing::debug;

use crate::models::evaluation::{normalize_score, EvaluationRecord};
use crate::services::completion::CompletionPort;
use crate::services::response_parser;

/// 评估者角色
const EVALUATOR_ROLE: &str = "You are an expert Excel interviewer and evaluator.";

/// 答案评估服务
pub struct Evaluator<P> {
    port: P,
}

impl<P: CompletionPort> Evaluator<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// 评估一道题的作答
    ///
    /// 永远返回完整记录，`score` 保证是 1~5 的整数文本。
    pub async fn evaluate(&self, question: &str, answer: &str) -> EvaluationRecord {
        let prompt = build_grading_prompt(question, answer);
        let raw = self.port.complete(&prompt).await;
        debug!("评估响应长度: {} 字符", raw.len());

        let mut record = response_parser::parse(&raw);
        record.score = normalize_score(&record.score);
        record
    }
}

/// 构建评分提示词：题目和答案原样嵌入
pub fn build_grading_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"
{}

Question: {}
Candidate Answer: {}

Return a JSON object with these keys:
- score (1–5, numeric)
- justification (one-line reason for score)
- explanation (2–4 sentences explaining strengths and weaknesses of the answer)
- tip (one actionable improvement suggestion)

Return only the JSON object.
"#,
        EVALUATOR_ROLE, question, answer
    )
}
