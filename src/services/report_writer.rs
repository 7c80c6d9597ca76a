//! 报告卡写入服务 - 业务能力层
//!
//! 只负责"把一场已完成的面试写成 Markdown 报告卡"，不关心流程

use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, SessionError};
use crate::models::session::{InterviewSession, SessionStage};

/// 报告卡写入服务
pub struct ReportWriter {
    report_path: PathBuf,
}

impl ReportWriter {
    /// 使用默认路径创建
    pub fn new() -> Self {
        Self::with_path("report_card.md")
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            report_path: path.into(),
        }
    }

    /// 写入报告卡，会话必须已完成
    pub async fn write(&self, session: &InterviewSession) -> AppResult<()> {
        if session.stage() != SessionStage::Done {
            return Err(SessionError::WrongStage {
                expected: SessionStage::Done.to_string(),
                actual: session.stage().to_string(),
            }
            .into());
        }

        let report = render_report(session, &chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        debug!("报告卡长度: {} 字符", report.len());

        tokio::fs::write(&self.report_path, report)
            .await
            .map_err(|e| AppError::file_write_failed(&self.report_path, e))?;

        info!("📄 报告卡已保存至: {}", self.report_path.display());
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// 渲染 Markdown 报告卡
pub fn render_report(session: &InterviewSession, generated_at: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Excel Mock Interview Report Card\n");
    let _ = writeln!(out, "_Generated: {}_\n", generated_at);
    let _ = writeln!(out, "**Average Score:** {:.1}/5\n", session.average_score());

    for (i, (qa, ev)) in session.answers().iter().zip(session.evaluations()).enumerate() {
        let _ = writeln!(out, "## Q{}: {}\n", i + 1, qa.question);
        let _ = writeln!(out, "- **Answer:** {}", qa.answer);
        let _ = writeln!(out, "- **Score:** {}", ev.score);
        let _ = writeln!(out, "- **Justification:** {}", ev.justification);
        let _ = writeln!(out, "- **Explanation:** {}", ev.explanation);
        let _ = writeln!(out, "- **Tip:** {}\n", ev.tip);
    }

    let _ = writeln!(out, "## Final Summary\n");
    let _ = writeln!(out, "{}", session.summary().unwrap_or_default());

    out
}
