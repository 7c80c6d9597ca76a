//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有配置、题库和 LLM 服务，驱动一场终端面试，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (抽题 / 收集答案 / 展示)
//!     ↓
//! workflow::InterviewFlow (评估全部作答 → 总结)
//!     ↓
//! services (能力层：evaluator / aggregator / llm / report)
//!     ↓
//! models (数据：QuestionAnswer / EvaluationRecord / InterviewSession)
//! ```
//!
//! ## 设计原则
//!
//! 1. **向下依赖**：编排层 → workflow → services → models
//! 2. **状态显式**：会话状态由 `InterviewSession` 承载，不使用全局状态
//! 3. **无业务逻辑**：只做调度和展示，不做具体评分判断

pub mod app;

pub use app::{collect_answers, read_answer, App};
