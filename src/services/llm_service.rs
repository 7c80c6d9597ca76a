//! LLM 服务 - 业务能力层
//!
//! 文本补全端口的真实实现，只负责"发一次请求拿回文本"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::services::completion::{error_marker, CompletionPort};

/// LLM 服务
///
/// 职责：
/// - 调用 OpenAI 兼容接口完成一次补全
/// - 不重试（async-openai 自带的限流退避除外）
/// - 作为 `CompletionPort` 使用时从不返回错误，失败编码为错误标记
///
/// 内部的 `Client` 可以并发使用，多个评估可以共享同一个服务。
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Option<Duration>,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
            timeout: (config.llm_timeout_secs > 0).then(|| Duration::from_secs(config.llm_timeout_secs)),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// 这是最基础的 LLM 调用接口，`complete` 基于此函数实现。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去除首尾空白）；没有内容或只有空白时返回错误
    ///
    /// # 示例
    /// ```no_run
    /// # use mock_interviewer::services::LlmService;
    /// # async fn example(service: &LlmService) -> anyhow::Result<()> {
    /// let response = service.send_to_llm(
    ///     "What is the difference between VLOOKUP and XLOOKUP?",
    ///     Some("Answer in one sentence."),
    /// ).await?;
    /// println!("LLM 响应: {}", response);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_to_llm(&self, user_message: &str, system_message: Option<&str>) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            anyhow::anyhow!("LLM API 调用失败: {}", e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("LLM 返回内容为空"))?;

        let content = content.trim();
        if content.is_empty() {
            anyhow::bail!("LLM 返回内容为空");
        }

        Ok(content.to_string())
    }

    /// 带超时的调用
    async fn send_with_timeout(&self, prompt: &str) -> Result<String> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.send_to_llm(prompt, None))
                .await
                .map_err(|_| anyhow::anyhow!("LLM 调用超时 ({} 秒)", limit.as_secs()))?,
            None => self.send_to_llm(prompt, None).await,
        }
    }
}

#[async_trait]
impl CompletionPort for LlmService {
    async fn complete(&self, prompt: &str) -> String {
        match self.send_with_timeout(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("⚠️ 补全失败，返回错误标记: {}", e);
                error_marker(e)
            }
        }
    }
}
