//! 终端面试应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一场面试的完整生命周期。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、创建 LLM 服务、加载题库
//! 2. **抽题**：按难度随机抽题（可选由 LLM 生成题目）
//! 3. **收集答案**：在终端逐题提问，读取作答
//! 4. **评估**：委托 `InterviewFlow` 完成评估与总结
//! 5. **展示与输出**：打印结果、写报告卡

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::question::Difficulty;
use crate::models::question_bank::{QuestionBank, QuestionCounts};
use crate::models::session::InterviewSession;
use crate::models::load_or_curated;
use crate::services::{is_error_marker, CompletionPort, LlmService, QuestionGenerator, ReportWriter};
use crate::utils::logging::{log_questions_selected, log_startup};
use crate::workflow::InterviewFlow;

/// 应用主结构
pub struct App {
    config: Config,
    bank: QuestionBank,
    flow: InterviewFlow<Arc<LlmService>>,
    report_writer: ReportWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;

        log_startup(&config.llm_model_name, config.max_concurrent_evaluations);

        let service = Arc::new(LlmService::new(&config));

        let mut bank = load_or_curated(config.question_bank_file.as_deref()).await?;
        if config.generate_questions {
            bank = generate_bank(service.as_ref(), bank, counts_from(&config)).await;
        }

        let flow = InterviewFlow::from_config(service, &config);
        let report_writer = ReportWriter::with_path(&config.report_file);

        Ok(Self {
            config,
            bank,
            flow,
            report_writer,
        })
    }

    /// 运行一场面试（标准输入作答）
    pub async fn run(&self) -> AppResult<()> {
        let mut stdin = BufReader::new(tokio::io::stdin());
        let session = self.run_session(&mut stdin).await?;

        print_results(&session);
        self.report_writer.write(&session).await?;

        Ok(())
    }

    /// 抽题 → 收集答案 → 评估，返回已完成的会话
    pub async fn run_session<R: AsyncBufRead + Unpin>(&self, reader: &mut R) -> AppResult<InterviewSession> {
        let questions = self.select_questions();
        log_questions_selected(questions.len());

        let mut session = InterviewSession::new(questions);
        collect_answers(&mut session, reader).await?;

        println!("\nEvaluating your answers...");
        self.flow.conclude(&mut session).await?;

        Ok(session)
    }

    fn select_questions(&self) -> Vec<String> {
        let mut rng = rand::thread_rng();
        self.bank.pick(counts_from(&self.config), &mut rng)
    }
}

fn counts_from(config: &Config) -> QuestionCounts {
    QuestionCounts::new(config.num_basic, config.num_intermediate, config.num_advanced)
}

/// 用 LLM 生成的题目替换题库中对应难度的题目，生成失败的难度保留原题
pub async fn generate_bank<P: CompletionPort>(port: P, mut bank: QuestionBank, counts: QuestionCounts) -> QuestionBank {
    let generator = QuestionGenerator::new(port);
    for difficulty in Difficulty::ALL {
        let n = counts.get(difficulty);
        if n == 0 {
            continue;
        }
        let generated = generator.generate(difficulty, n).await;
        if generated.is_empty() {
            warn!("⚠️ {} 难度没有生成题目，使用题库原题", difficulty);
        } else {
            bank.set_questions(difficulty, generated);
        }
    }
    bank
}

/// 逐题提问并读取答案；输入结束时提前进入评估
pub async fn collect_answers<R: AsyncBufRead + Unpin>(
    session: &mut InterviewSession,
    reader: &mut R,
) -> AppResult<()> {
    while let Some(question) = session.current_question() {
        let (answered, total) = session.progress();
        println!("\nQuestion {}/{}", answered + 1, total);
        println!("{}", question);
        println!("Your answer (finish with an empty line):");

        match read_answer(reader).await? {
            Some(answer) => session.submit_answer(answer)?,
            None => {
                info!("输入结束，已作答 {}/{} 题", answered, total);
                session.begin_evaluation()?;
                break;
            }
        }
    }
    Ok(())
}

/// 读取一段多行答案，以空行结束；输入已结束且没有内容时返回 None
pub async fn read_answer<R: AsyncBufRead + Unpin>(reader: &mut R) -> AppResult<Option<String>> {
    let mut lines: Vec<String> = Vec::new();
    let mut reached_eof = false;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            reached_eof = true;
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            break;
        }
        lines.push(line.to_string());
    }

    if reached_eof && lines.is_empty() {
        return Ok(None);
    }
    Ok(Some(lines.join("\n")))
}

/// 打印面试结果
fn print_results(session: &InterviewSession) {
    println!("\n{}", "=".repeat(60));
    println!("Interview complete! Here are your results:");
    println!("Average Score: {:.1}/5", session.average_score());
    println!("{}", "=".repeat(60));

    for (i, (qa, ev)) in session.answers().iter().zip(session.evaluations()).enumerate() {
        println!("\nQ{}. {}", i + 1, qa.question);
        println!("  - Your Answer: {}", qa.answer);
        println!("  - Score: {} {}", ev.band().label(), ev.score);
        println!("  - Justification: {}", ev.justification);
        println!("  - Explanation: {}", ev.explanation);
        println!("  - Tip: {}", ev.tip);
    }

    println!("\nFinal Performance Summary");
    let summary = session.summary().unwrap_or_default();
    if is_error_marker(summary) {
        println!("⚠️ The summary could not be generated: {}", summary);
    } else {
        println!("{}", summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SessionStage;
    use crate::services::ScriptedCompletion;

    #[tokio::test]
    async fn test_read_answer_multiline() {
        let mut input: &[u8] = b"line one\nline two\n\nnext answer\n";

        assert_eq!(
            read_answer(&mut input).await.unwrap(),
            Some("line one\nline two".to_string())
        );
        assert_eq!(read_answer(&mut input).await.unwrap(), Some("next answer".to_string()));
        assert_eq!(read_answer(&mut input).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_answer_blank_line_is_empty_answer() {
        let mut input: &[u8] = b"\r\n";
        assert_eq!(read_answer(&mut input).await.unwrap(), Some(String::new()));
    }

    #[tokio::test]
    async fn test_collect_answers_stops_at_eof() {
        let mut session = InterviewSession::new(vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()]);
        let mut input: &[u8] = b"first\n\nsecond";

        collect_answers(&mut session, &mut input).await.unwrap();

        assert_eq!(session.stage(), SessionStage::Evaluating);
        assert_eq!(session.answers().len(), 2);
        assert_eq!(session.answers()[1].answer, "second");
    }

    #[tokio::test]
    async fn test_generate_bank_falls_back_per_level() {
        let port = ScriptedCompletion::new("[error: quota exceeded]")
            .when("basic", "1. Generated basic question?");
        let curated = QuestionBank::curated();

        let bank = generate_bank(&port, curated.clone(), QuestionCounts::new(1, 1, 0)).await;

        assert_eq!(bank.basic, vec!["Generated basic question?".to_string()]);
        assert_eq!(bank.intermediate, curated.intermediate);
        assert_eq!(bank.advanced, curated.advanced);
        assert_eq!(port.call_count(), 2);
    }
}
