/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则默认 `info`，`verbose` 时为 `debug`。
/// 重复调用是安全的（测试中可随意调用）。
pub fn init(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `model`: 模型名称
/// - `max_concurrent`: 最大并发评估数
pub fn log_startup(model: &str, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 模拟面试启动");
    info!("🤖 评估模型: {}", model);
    info!("📊 最大并发评估数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录题目选取信息
pub fn log_questions_selected(total: usize) {
    info!("✓ 已选取 {} 道面试题", total);
}

/// 记录评估完成信息
///
/// # 参数
/// - `total`: 评估总数
/// - `parsed`: 成功解析为结构化结果的数量
/// - `average`: 平均分
pub fn log_interview_complete(total: usize, parsed: usize, average: f64) {
    info!("\n{}", "─".repeat(60));
    info!("📊 评估完成: 共 {} 题，结构化解析成功 {}/{}", total, parsed, total);
    info!("⭐ 平均分: {:.1}/5", average);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("数据透视表", 2), "数据...");
    }
}
