//! 总结服务 - 业务能力层
//!
//! 把全部评估结果汇总成一段面试总结。返回的文本不做解析，
//! 端口给出的错误标记原样透传，由界面层决定如何提示。

use tracing::{debug, info};

use crate::models::evaluation::EvaluationRecord;
use crate::services::completion::CompletionPort;

/// 没有任何评估结果时返回的固定文本
pub const NO_EVALUATIONS: &str = "No evaluations available to summarize.";

/// 总结字数上限
const SUMMARY_WORDS: usize = 120;

/// 总结服务
pub struct Aggregator<P> {
    port: P,
}

impl<P: CompletionPort> Aggregator<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// 生成面试总结；输入为空时不调用端口
    pub async fn summarize(&self, records: &[EvaluationRecord]) -> String {
        if records.is_empty() {
            info!("没有评估结果，跳过总结");
            return NO_EVALUATIONS.to_string();
        }

        let prompt = build_summary_prompt(records);
        debug!("总结提示词长度: {} 字符", prompt.len());
        self.port.complete(&prompt).await
    }
}

/// 每条评估一行：`Q<序号>: <理由> (Score <分数>)`
///
/// 理由来自模型，其中的换行和连续空白会被压成单个空格
pub fn render_evaluation_lines(records: &[EvaluationRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, ev)| format!("Q{}: {} (Score {})", i + 1, single_line(&ev.justification), ev.score))
        .collect::<Vec<_>>()
        .join("\n")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 构建总结提示词
pub fn build_summary_prompt(records: &[EvaluationRecord]) -> String {
    format!(
        r#"
Given these evaluations:

{}

Write a {}-word summary of strengths, weaknesses, and a hire/not-hire recommendation.
"#,
        render_evaluation_lines(records),
        SUMMARY_WORDS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::completion::ScriptedCompletion;

    fn record(score: &str, justification: &str) -> EvaluationRecord {
        EvaluationRecord {
            score: score.to_string(),
            justification: justification.to_string(),
            explanation: "unused".to_string(),
            tip: "unused".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_input_returns_sentinel_without_call() {
        let port = ScriptedCompletion::new("should not be used");
        let summary = Aggregator::new(&port).summarize(&[]).await;

        assert_eq!(summary, NO_EVALUATIONS);
        assert_eq!(port.call_count(), 0);
    }

    #[test]
    fn test_render_lines_in_order() {
        let records = vec![record("5", "Strong grasp"), record("2", "Confused ranges")];
        assert_eq!(
            render_evaluation_lines(&records),
            "Q1: Strong grasp (Score 5)\nQ2: Confused ranges (Score 2)"
        );
    }

    #[test]
    fn test_multiline_justification_stays_on_one_line() {
        let records = vec![
            record("4", "Knows XLOOKUP.\nMissed   the\r\n default argument. "),
            record("1", "Blank"),
        ];
        let rendered = render_evaluation_lines(&records);

        assert_eq!(rendered.lines().count(), 2);
        assert_eq!(
            rendered,
            "Q1: Knows XLOOKUP. Missed the default argument. (Score 4)\nQ2: Blank (Score 1)"
        );
    }

    #[tokio::test]
    async fn test_summary_is_returned_verbatim() {
        let port = ScriptedCompletion::new("Solid candidate. Hire.");
        let records = vec![record("4", "Good")];

        let summary = Aggregator::new(&port).summarize(&records).await;
        assert_eq!(summary, "Solid candidate. Hire.");

        let prompts = port.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Q1: Good (Score 4)"));
        assert!(prompts[0].contains("120-word"));
        assert!(prompts[0].contains("hire/not-hire"));
    }

    #[tokio::test]
    async fn test_error_marker_passes_through() {
        let port = ScriptedCompletion::new("[error: service unavailable]");
        let summary = Aggregator::new(&port).summarize(&[record("3", "Ok")]).await;
        assert_eq!(summary, "[error: service unavailable]");
    }
}
