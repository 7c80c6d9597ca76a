//! 题目生成服务 - 业务能力层
//!
//! 让模型按难度生成一组面试题，替代或补充内置题库

use tracing::{info, warn};

use crate::models::question::Difficulty;
use crate::services::completion::{is_error_marker, CompletionPort};

/// 行首需要去掉的编号字符
const NUMBERING_CHARS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', ' ', ')'];

/// 题目生成服务
pub struct QuestionGenerator<P> {
    port: P,
}

impl<P: CompletionPort> QuestionGenerator<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// 生成 `n` 道指定难度的题目
    ///
    /// 端口失败时返回空列表，由调用方决定是否回退到内置题库。
    pub async fn generate(&self, difficulty: Difficulty, n: usize) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }

        let prompt = format!(
            "Generate {} {} Excel interview questions as a numbered list.",
            n,
            difficulty.name()
        );
        let raw = self.port.complete(&prompt).await;

        if is_error_marker(&raw) {
            warn!("⚠️ {} 难度题目生成失败: {}", difficulty, raw);
            return Vec::new();
        }

        let questions = parse_numbered_list(&raw);
        info!("✓ 生成 {} 难度题目 {} 道", difficulty, questions.len());
        questions
    }
}

/// 解析编号列表：逐行去掉行首的编号字符，丢弃空行
pub fn parse_numbered_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim().trim_start_matches(NUMBERING_CHARS).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
