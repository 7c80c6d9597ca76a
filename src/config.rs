//! 程序配置
//!
//! 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, ConfigError};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_FILE: &str = "interview.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    /// 单次调用超时（秒），0 表示不限制
    pub llm_timeout_secs: u64,
    // --- 评估配置 ---
    /// 同时评估的答案数量
    pub max_concurrent_evaluations: usize,
    // --- 题目配置 ---
    pub num_basic: usize,
    pub num_intermediate: usize,
    pub num_advanced: usize,
    /// 自定义题库 TOML 文件
    pub question_bank_file: Option<String>,
    /// 是否由 LLM 生成题目
    pub generate_questions: bool,
    // --- 输出配置 ---
    /// 报告卡输出路径
    pub report_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-1.5-flash".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 1024,
            llm_timeout_secs: 60,
            max_concurrent_evaluations: 1,
            num_basic: 1,
            num_intermediate: 1,
            num_advanced: 1,
            question_bank_file: None,
            generate_questions: false,
            report_file: "report_card.md".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 只从环境变量加载（以默认值为基础）
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置文件（若存在），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("INTERVIEW_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            info!("📄 读取配置文件: {}", path);
            Self::from_toml_file(&path)?
        } else {
            debug!("配置文件 {} 不存在，使用默认配置", path);
            Self::default()
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取配置，缺失的键使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(path, e))?;
        toml::from_str(&content).map_err(|source| AppError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| AppError::Toml {
            path: String::new(),
            source,
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            llm_api_key: env_string("LLM_API_KEY")
                .or_else(|| env_string("GOOGLE_API_KEY"))
                .or_else(|| env_string("OPENAI_API_KEY"))
                .unwrap_or(self.llm_api_key),
            llm_api_base_url: env_string("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: env_string("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: env_parse("LLM_TEMPERATURE").unwrap_or(self.llm_temperature),
            llm_max_tokens: env_parse("LLM_MAX_TOKENS").unwrap_or(self.llm_max_tokens),
            llm_timeout_secs: env_parse("LLM_TIMEOUT_SECS").unwrap_or(self.llm_timeout_secs),
            max_concurrent_evaluations: env_parse("MAX_CONCURRENT_EVALUATIONS").unwrap_or(self.max_concurrent_evaluations),
            num_basic: env_parse("NUM_BASIC").unwrap_or(self.num_basic),
            num_intermediate: env_parse("NUM_INTERMEDIATE").unwrap_or(self.num_intermediate),
            num_advanced: env_parse("NUM_ADVANCED").unwrap_or(self.num_advanced),
            question_bank_file: env_string("QUESTION_BANK_FILE").or(self.question_bank_file),
            generate_questions: env_parse("GENERATE_QUESTIONS").unwrap_or(self.generate_questions),
            report_file: env_string("REPORT_FILE").unwrap_or(self.report_file),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    /// 启动前校验
    pub fn validate(&self) -> AppResult<()> {
        if self.llm_api_key.trim().is_empty() {
            return Err(AppError::Config(ConfigError::MissingApiKey));
        }
        if self.max_concurrent_evaluations == 0 {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "max_concurrent_evaluations".to_string(),
                value: "0".to_string(),
                reason: "必须大于 0".to_string(),
            }));
        }
        Ok(())
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
