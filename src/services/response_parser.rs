//! 评估响应解析 - 业务能力层
//!
//! 把模型返回的自由文本转成 `EvaluationRecord`。模型被要求返回 JSON，
//! 但并不可靠：可能带 markdown 代码块、前后夹杂说明文字、缺键，或者根本不是 JSON。
//! 解析策略是"能取多少取多少，其余用默认值"，本函数永远不会失败。

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::models::evaluation::{EvaluationRecord, MISSING_SCORE};
use crate::utils::truncate_text;

/// 解析模型响应
///
/// 1. 去掉代码块标记（含可选的语言标签），去除首尾空白
/// 2. 按单个 JSON 对象解码；文本语法不合法时，再尝试第一个 `{` 到最后一个 `}` 之间的片段
/// 3. 成功：逐键读取并转为文本，缺键时 `score` 为 `"N/A"`，其余为空串
/// 4. 失败（非 JSON、顶层不是对象）：返回兜底记录，`explanation` 保留原始文本
pub fn parse(raw: &str) -> EvaluationRecord {
    let cleaned = strip_fences(raw);

    match decode_object(&cleaned) {
        Some(obj) => {
            debug!("评估响应解析成功，包含 {} 个键", obj.len());
            EvaluationRecord {
                score: text_field(&obj, "score", MISSING_SCORE),
                justification: text_field(&obj, "justification", ""),
                explanation: text_field(&obj, "explanation", ""),
                tip: text_field(&obj, "tip", ""),
            }
        }
        None => {
            warn!("⚠️ 无法解析结构化评估，使用兜底结果: {}", truncate_text(raw, 80));
            EvaluationRecord::fallback(raw)
        }
    }
}

/// 代码块标记，含可选的语言标签
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("fence pattern is valid"));

/// 去掉 ``` 代码块标记及其语言标签
pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "").trim().to_string()
}

fn decode_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(obj)) => Some(obj),
        // 合法 JSON 但顶层不是对象
        Ok(_) => None,
        Err(_) => {
            let span = object_span(text)?;
            match serde_json::from_str::<Value>(span) {
                Ok(Value::Object(obj)) => Some(obj),
                _ => None,
            }
        }
    }
}

/// 第一个 `{` 到最后一个 `}`（含）
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// 读取字段并转为文本；缺键或 null 使用默认值
fn text_field(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluation::{FALLBACK_JUSTIFICATION, FALLBACK_TIP, NO_EXPLANATION};

    const PAYLOAD: &str = r#"{"score": 4, "justification": "Correct and concise.", "explanation": "Explains absolute references well. Misses mixed references.", "tip": "Mention $A1 style mixed references."}"#;

    #[test]
    fn test_parse_well_formed_json() {
        let rec = parse(PAYLOAD);
        assert_eq!(rec.score, "4");
        assert_eq!(rec.justification, "Correct and concise.");
        assert_eq!(
            rec.explanation,
            "Explains absolute references well. Misses mixed references."
        );
        assert_eq!(rec.tip, "Mention $A1 style mixed references.");
    }

    #[test]
    fn test_fenced_payload_parses_like_plain() {
        let plain = parse(PAYLOAD);
        let with_tag = parse(&format!("```json\n{}\n```", PAYLOAD));
        let without_tag = parse(&format!("```\n{}\n```", PAYLOAD));
        let padded = parse(&format!("\n\n  ```JSON\n{}```  \n", PAYLOAD));

        assert_eq!(with_tag, plain);
        assert_eq!(without_tag, plain);
        assert_eq!(padded, plain);
    }

    #[test]
    fn test_surrounding_prose_is_tolerated() {
        let raw = format!("Here is my evaluation:\n```json\n{}\n```\nLet me know if you need more.", PAYLOAD);
        assert_eq!(parse(&raw), parse(PAYLOAD));
    }

    #[test]
    fn test_missing_keys_get_defaults() {
        let rec = parse(r#"{"justification": "  Partial answer.  "}"#);
        assert_eq!(rec.score, "N/A");
        assert_eq!(rec.justification, "Partial answer.");
        assert_eq!(rec.explanation, "");
        assert_eq!(rec.tip, "");

        let empty = parse("{}");
        assert_eq!(empty.score, "N/A");
        assert!(!empty.is_fallback());
    }

    #[test]
    fn test_values_are_coerced_to_text() {
        let rec = parse(r#"{"score": "5", "justification": 12, "explanation": null, "tip": ["a", "b"]}"#);
        assert_eq!(rec.score, "5");
        assert_eq!(rec.justification, "12");
        assert_eq!(rec.explanation, "");
        assert_eq!(rec.tip, r#"["a","b"]"#);
    }

    #[test]
    fn test_non_json_falls_back() {
        let rec = parse("not json at all");
        assert_eq!(rec.score, "3");
        assert_eq!(rec.justification, FALLBACK_JUSTIFICATION);
        assert_eq!(rec.explanation, "not json at all");
        assert_eq!(rec.tip, FALLBACK_TIP);
    }

    #[test]
    fn test_error_marker_is_kept_in_explanation() {
        let rec = parse("[error: quota exceeded]");
        assert!(rec.is_fallback());
        assert_eq!(rec.score, "3");
        assert_eq!(rec.explanation, "[error: quota exceeded]");
    }

    #[test]
    fn test_non_object_json_falls_back() {
        for raw in ["[1, 2, 3]", "\"just a string\"", "5", "true", r#"[{"score": 5}]"#] {
            let rec = parse(raw);
            assert!(rec.is_fallback(), "expected fallback for {raw}");
            assert_eq!(rec.explanation, raw);
        }
    }

    #[test]
    fn test_empty_response_falls_back() {
        let rec = parse("");
        assert!(rec.is_fallback());
        assert_eq!(rec.explanation, NO_EXPLANATION);
    }

    #[test]
    fn test_truncated_json_falls_back() {
        let raw = r#"```json
{"score": 4, "justification": "Good"#;
        let rec = parse(raw);
        assert!(rec.is_fallback());
        assert_eq!(rec.explanation, raw);
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_fences("  {}  "), "{}");
        assert_eq!(strip_fences("```c++\n{}\n```"), "{}");
        assert_eq!(strip_fences("prefix ```python {\"a\": 1}``` suffix"), "prefix  {\"a\": 1} suffix");
    }
}
