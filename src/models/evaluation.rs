//! 单题评估结果
//!
//! 对外形状固定为四个字符串字段：`score` / `justification` / `explanation` / `tip`，
//! 报告层直接依赖这一形状。

use serde::{Deserialize, Serialize};

/// 解析失败时使用的中性分数（不是"未知"），平均分无需特殊处理
pub const NEUTRAL_SCORE: &str = "3";
/// JSON 中缺少 `score` 键时的占位值
pub const MISSING_SCORE: &str = "N/A";
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

pub const FALLBACK_JUSTIFICATION: &str = "Could not parse structured evaluation.";
pub const NO_EXPLANATION: &str = "No explanation provided.";
pub const FALLBACK_TIP: &str = "Provide concrete Excel examples next time.";

/// 评估记录
///
/// 每个字段始终存在且都是文本，成功路径与兜底路径的类型一致。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub score: String,
    pub justification: String,
    pub explanation: String,
    pub tip: String,
}

impl EvaluationRecord {
    /// 兜底记录：保留原始文本，避免信息丢失
    pub fn fallback(raw: &str) -> Self {
        let explanation = if raw.trim().is_empty() {
            NO_EXPLANATION.to_string()
        } else {
            raw.to_string()
        };

        Self {
            score: NEUTRAL_SCORE.to_string(),
            justification: FALLBACK_JUSTIFICATION.to_string(),
            explanation,
            tip: FALLBACK_TIP.to_string(),
        }
    }

    /// 是否为兜底记录
    ///
    /// 按理由文本判断：模型自己恰好返回了与兜底理由相同的文本时，也会被当作兜底记录。
    /// 只用于日志统计，不影响评分。
    pub fn is_fallback(&self) -> bool {
        self.justification == FALLBACK_JUSTIFICATION
    }

    /// 纯数字分数的数值，其他形式返回 None
    pub fn score_value(&self) -> Option<u8> {
        let score = self.score.trim();
        if score.is_empty() || !score.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        score.parse().ok()
    }

    /// 分数档位（用于展示着色）
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score_value().unwrap_or(0))
    }
}

/// 把任意分数文本归一化到 [1,5]
///
/// 数字先四舍五入再截断到区间内，非数字一律视为中性分数。
pub fn normalize_score(score: &str) -> String {
    match score.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let clamped = value.round().clamp(MIN_SCORE as f64, MAX_SCORE as f64);
            (clamped as u8).to_string()
        }
        _ => NEUTRAL_SCORE.to_string(),
    }
}

/// 分数档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 4 分及以上
    Strong,
    /// 3 分
    Fair,
    /// 2 分及以下
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 4 => ScoreBand::Strong,
            3 => ScoreBand::Fair,
            _ => ScoreBand::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Strong => "🟢",
            ScoreBand::Fair => "🟠",
            ScoreBand::Weak => "🔴",
        }
    }
}

/// 平均分：只统计纯数字分数，没有可用分数时为 0
pub fn average_score(records: &[EvaluationRecord]) -> f64 {
    let scores: Vec<u8> = records.iter().filter_map(EvaluationRecord::score_value).collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|&s| s as f64).sum::<f64>() / scores.len() as f64
}
