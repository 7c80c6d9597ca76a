use std::path::Path;
use thiserror::Error;

/// 应用程序错误类型
///
/// 只有会话层和启动流程会返回这些错误；评估核心始终降级为可用结果，不向外报错。
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 题库错误
    #[error("题库错误: {0}")]
    QuestionBank(#[from] QuestionBankError),

    /// 面试会话状态错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),

    /// 文件读取失败
    #[error("读取文件失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 文件写入失败
    #[error("写入文件失败 ({path}): {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 终端输入输出错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未提供 API 密钥
    #[error("未找到 LLM API 密钥，请设置 LLM_API_KEY 或 GOOGLE_API_KEY")]
    MissingApiKey,

    /// 配置值无效
    #[error("配置项 {key} 的值 '{value}' 无效: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// 题库错误
#[derive(Debug, Error)]
pub enum QuestionBankError {
    /// 所有难度下都没有题目
    #[error("题库为空")]
    Empty,

    /// 题目文本为空
    #[error("{level} 难度的第 {index} 道题目为空")]
    BlankQuestion { level: String, index: usize },
}

/// 面试会话状态错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 当前阶段不允许该操作
    #[error("当前阶段为 {actual}，该操作要求 {expected}")]
    WrongStage { expected: String, actual: String },

    /// 评估结果数量与答案数量不一致
    #[error("评估结果数量 {evaluations} 与答案数量 {answers} 不一致")]
    LengthMismatch { answers: usize, evaluations: usize },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::FileRead {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::FileWrite {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
