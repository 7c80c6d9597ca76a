//! # Mock Interviewer
//!
//! 一个模拟 Excel 技术面试的 Rust 应用程序：抽题、收集作答、用 LLM 逐题评分，
//! 最后汇总成录用/不录用的总结。
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目、评估记录、题库、会话状态
//! - `EvaluationRecord` - 固定四个文本字段的评估结果
//! - `InterviewSession` - 显式的会话状态（collecting → evaluating → done）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单道题或单次调用
//! - `CompletionPort` - 文本补全端口，从不报错，失败编码为 `[error: ...]`
//! - `response_parser` - 从不可靠的模型输出中提取评估记录
//! - `Evaluator` / `Aggregator` - 单题评分 / 汇总
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `InterviewFlow`：逐题评估 → 汇总，核心唯一入口
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 终端应用：抽题、收集答案、展示、写报告卡
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{EvaluationRecord, InterviewSession, QuestionAnswer, QuestionBank};
pub use orchestrator::App;
pub use services::{CompletionPort, LlmService, ScriptedCompletion};
pub use workflow::{InterviewFlow, InterviewOutcome};
