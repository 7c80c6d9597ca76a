//! 文本补全端口
//!
//! 核心只依赖这一个能力：给定提示词，返回一段文本。
//! 实现方不允许向上抛错，失败一律编码为以 `[error:` 开头的文本。

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

/// 错误标记前缀
pub const ERROR_MARKER_PREFIX: &str = "[error:";

/// 文本补全能力
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// 返回补全文本；失败时返回 `[error: ...]`
    async fn complete(&self, prompt: &str) -> String;
}

#[async_trait]
impl<P: CompletionPort + ?Sized> CompletionPort for &P {
    async fn complete(&self, prompt: &str) -> String {
        (**self).complete(prompt).await
    }
}

#[async_trait]
impl<P: CompletionPort + ?Sized> CompletionPort for Arc<P> {
    async fn complete(&self, prompt: &str) -> String {
        (**self).complete(prompt).await
    }
}

/// 把失败信息编码为错误标记文本
pub fn error_marker(detail: impl std::fmt::Display) -> String {
    format!("{} {}]", ERROR_MARKER_PREFIX, detail)
}

/// 文本是否为错误标记
pub fn is_error_marker(text: &str) -> bool {
    text.trim_start().starts_with(ERROR_MARKER_PREFIX)
}

struct Rule {
    needle: String,
    response: String,
    delay: Option<Duration>,
}

/// 确定性的补全桩
///
/// 按规则顺序匹配提示词子串，第一个命中的规则给出响应；都不命中时返回默认响应。
/// 记录收到的每个提示词，可并发使用。
pub struct ScriptedCompletion {
    rules: Vec<Rule>,
    default_response: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default_response: default_response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// 提示词包含 `needle` 时返回 `response`
    pub fn when(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            response: response.into(),
            delay: None,
        });
        self
    }

    /// 同 `when`，但在返回前等待 `delay`
    pub fn when_delayed(
        mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            response: response.into(),
            delay: Some(delay),
        });
        self
    }

    /// 已收到的提示词（按到达顺序）
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionPort for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> String {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let rule = self.rules.iter().find(|r| prompt.contains(&r.needle));
        debug!("ScriptedCompletion 命中规则: {:?}", rule.map(|r| r.needle.as_str()));

        match rule {
            Some(rule) => {
                if let Some(delay) = rule.delay {
                    tokio::time::sleep(delay).await;
                }
                rule.response.clone()
            }
            None => self.default_response.clone(),
        }
    }
}
