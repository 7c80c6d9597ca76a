//! 题库
//!
//! 按难度分组保存题目，负责随机抽题。题库的维护不在本系统范围内，
//! 这里只提供内置题库和从 TOML 文件加载两种来源。

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AppResult, QuestionBankError};
use crate::models::question::Difficulty;

/// 各难度抽题数量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCounts {
    pub basic: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl QuestionCounts {
    pub fn new(basic: usize, intermediate: usize, advanced: usize) -> Self {
        Self {
            basic,
            intermediate,
            advanced,
        }
    }

    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Basic => self.basic,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

/// 题库
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub basic: Vec<String>,
    #[serde(default)]
    pub intermediate: Vec<String>,
    #[serde(default)]
    pub advanced: Vec<String>,
}

impl QuestionBank {
    /// 内置的 Excel 面试题库
    pub fn curated() -> Self {
        let to_vec = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            basic: to_vec(&[
                "What is the difference between relative and absolute references in Excel?",
                "How do you remove duplicate rows from a dataset?",
                "How do you create a simple bar chart?",
                "What is the order of operations in Excel formulas?",
                "How do you freeze panes and why is it useful?",
                "Explain the purpose of the SUMIF function with an example.",
            ]),
            intermediate: to_vec(&[
                "Explain how VLOOKUP works with an example.",
                "What are Pivot Tables used for in Excel?",
                "How would you apply conditional formatting to highlight values greater than 100?",
                "What is the difference between VLOOKUP and INDEX/MATCH?",
                "How do you create a drop-down list in a cell?",
                "Describe how to use the Text to Columns feature.",
            ]),
            advanced: to_vec(&[
                "Explain array formulas and how dynamic arrays improve analysis.",
                "How would you use Solver to optimize a business scenario?",
                "How do you protect specific cells in a shared Excel sheet?",
                "What are Power Query and Power Pivot, and how do they extend Excel's capabilities?",
                "How would you create a custom function using VBA?",
                "Explain a complex data validation scenario you might implement.",
            ]),
        }
    }

    /// 某个难度下的全部题目
    pub fn questions(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Basic => &self.basic,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Advanced => &self.advanced,
        }
    }

    pub fn set_questions(&mut self, difficulty: Difficulty, questions: Vec<String>) {
        match difficulty {
            Difficulty::Basic => self.basic = questions,
            Difficulty::Intermediate => self.intermediate = questions,
            Difficulty::Advanced => self.advanced = questions,
        }
    }

    pub fn len(&self) -> usize {
        self.basic.len() + self.intermediate.len() + self.advanced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 校验：至少有一道题，且不存在空白题目
    pub fn validate(&self) -> AppResult<()> {
        if self.is_empty() {
            return Err(QuestionBankError::Empty.into());
        }
        for difficulty in Difficulty::ALL {
            if let Some(index) = self.questions(difficulty).iter().position(|q| q.trim().is_empty()) {
                return Err(QuestionBankError::BlankQuestion {
                    level: difficulty.name().to_string(),
                    index: index + 1,
                }
                .into());
            }
        }
        Ok(())
    }

    /// 随机抽题
    ///
    /// 每个难度无放回地抽取 `min(n, 该难度题数)` 道，合并后整体打乱。
    pub fn pick<R: Rng + ?Sized>(&self, counts: QuestionCounts, rng: &mut R) -> Vec<String> {
        let mut picked: Vec<String> = Vec::new();
        for difficulty in Difficulty::ALL {
            let pool = self.questions(difficulty);
            let n = counts.get(difficulty).min(pool.len());
            picked.extend(pool.choose_multiple(rng, n).cloned());
        }
        picked.shuffle(rng);
        picked
    }
}
