use crate::error::{AppError, AppResult};
use crate::models::question_bank::QuestionBank;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载题库
///
/// 文件格式：
///
/// ```toml
/// basic = ["...", "..."]
/// intermediate = ["..."]
/// advanced = ["..."]
/// ```
pub async fn load_question_bank(path: &Path) -> AppResult<QuestionBank> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path, e))?;

    let bank = parse_question_bank(&content).map_err(|source| AppError::Toml {
        path: path.display().to_string(),
        source,
    })?;

    bank.validate()?;

    tracing::info!(
        "成功加载题库 {}: 基础 {} / 中级 {} / 高级 {}",
        path.display(),
        bank.basic.len(),
        bank.intermediate.len(),
        bank.advanced.len()
    );

    Ok(bank)
}

/// 从 TOML 文本解析题库（不做校验）
pub fn parse_question_bank(content: &str) -> Result<QuestionBank, toml::de::Error> {
    toml::from_str(content)
}

/// 加载题库：未配置文件时使用内置题库
pub async fn load_or_curated(path: Option<&str>) -> AppResult<QuestionBank> {
    match path {
        Some(p) => load_question_bank(Path::new(p)).await,
        None => {
            tracing::info!("未配置题库文件，使用内置题库");
            Ok(QuestionBank::curated())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_bank_missing_levels_default_empty() {
        let bank = parse_question_bank(
            r#"
            basic = ["What is a cell reference?"]
            advanced = ["Explain LAMBDA.", "Explain LET."]
            "#,
        )
        .unwrap();

        assert_eq!(bank.basic.len(), 1);
        assert!(bank.intermediate.is_empty());
        assert_eq!(bank.advanced.len(), 2);
    }

    #[tokio::test]
    async fn test_load_question_bank_from_file() {
        let path = std::env::temp_dir().join(format!("question_bank_{}.toml", std::process::id()));
        tokio::fs::write(&path, "intermediate = [\"Explain XLOOKUP.\"]\n")
            .await
            .unwrap();

        let bank = load_question_bank(&path).await.unwrap();
        assert_eq!(bank.intermediate, vec!["Explain XLOOKUP.".to_string()]);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_load_question_bank_missing_file() {
        let result = load_question_bank(Path::new("/definitely/not/here.toml")).await;
        assert!(matches!(result, Err(AppError::FileRead { .. })));
    }

    #[tokio::test]
    async fn test_load_or_curated_without_path() {
        let bank = load_or_curated(None).await.unwrap();
        assert_eq!(bank, QuestionBank::curated());
    }
}
