//! 评分流程 - 流程层
//!
//! 核心职责：定义"一份提交"的完整评分流程
//!
//! 流程顺序：
//! 1. 解析两份笔记本 → 提取单元格
//! 2. 主题分类（学生 + 参考内容合并计数）
//! 3. 构建提示词 → LLM 分析
//! 4. 回复归一化 → 批注兜底回收
//! 5. 组装提交记录

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{classify, extract_cells, Cell, Submission};
use crate::parser::{ParserConfig, ResponseParser};
use crate::prompt::PromptBuilder;
use crate::services::LlmService;
use crate::workflow::grading_ctx::GradingCtx;

/// 评分流程
///
/// 职责：
/// - 编排从原始笔记本到提交记录的完整链路
/// - 决定何时分类、何时调模型、何时兜底
/// - 不做任何文件或目录操作
pub struct GradingFlow {
    llm_service: LlmService,
    prompt_builder: PromptBuilder,
    parser: ResponseParser,
    verbose_logging: bool,
}

impl GradingFlow {
    /// 创建新的评分流程
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            llm_service: LlmService::new(config)?,
            prompt_builder: PromptBuilder::new(config.max_prompt_chars),
            parser: ResponseParser::new(ParserConfig {
                min_entry_len: config.min_entry_len,
                max_list_len: config.max_list_len,
                min_summary_len: config.min_summary_len,
            }),
            verbose_logging: config.verbose_logging,
        })
    }

    /// 评一份提交：两份笔记本的原始 JSON 进，提交记录出
    pub async fn run(
        &self,
        ctx: &GradingCtx,
        student_raw: &str,
        reference_raw: &str,
    ) -> AppResult<Submission> {
        // ========== 步骤 1: 解析笔记本 ==========
        info!("{} 📓 解析笔记本...", ctx);
        let student_cells = extract_cells(student_raw, "student")?;
        let reference_cells = extract_cells(reference_raw, "reference")?;
        info!(
            "{} ✓ 学生 {} 个单元格，参考 {} 个单元格",
            ctx,
            student_cells.len(),
            reference_cells.len()
        );

        // ========== 步骤 2: 主题分类 ==========
        // 学生和参考内容合并计数，单侧关键词稀疏时另一侧能补上
        let mut combined = student_cells.clone();
        combined.extend(reference_cells.clone());
        let topic = classify(&combined);
        info!("{} 🧭 主题分类: {}", ctx, topic);

        // ========== 步骤 3: LLM 分析 ==========
        let prompt = self.prompt_builder.build(
            topic,
            &notebook_text(&reference_cells),
            &notebook_text(&student_cells),
        );
        if self.verbose_logging {
            info!("{} 提示词全文:\n{}", ctx, prompt);
        }
        info!("{} 🤖 调用 LLM 分析...", ctx);
        let reply = self.llm_service.analyze(&prompt).await?;
        info!("{} ✓ 收到回复 ({} 字符)", ctx, reply.len());
        if self.verbose_logging {
            info!("{} 回复全文:\n{}", ctx, reply);
        }

        // ========== 步骤 4: 归一化 ==========
        let mut feedback = self.parser.parse(&reply);

        // 批注兜底：回复里没有任何批注时，从不足条目回收 "cell N" 提及
        if feedback.cell_annotations.is_empty() {
            let recovered = self
                .parser
                .annotations_from_entries(&feedback.detailed_feedback.weaknesses);
            if recovered.is_empty() {
                warn!("{} 回复中没有可用的单元格批注", ctx);
            } else {
                info!("{} ♻️ 从不足条目回收了 {} 条批注", ctx, recovered.len());
                feedback.cell_annotations = recovered;
            }
        }

        info!(
            "{} ✓ 评分完成: {:.1}/10 (置信度 {:.2})",
            ctx, feedback.grade, feedback.confidence_score
        );

        // ========== 步骤 5: 组装提交记录 ==========
        Ok(Submission::new(
            ctx.submitter_id.clone(),
            ctx.submitter_name.clone(),
            feedback,
        ))
    }
}

/// 把单元格内容拼成嵌入提示词的纯文本
fn notebook_text(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellType;

    #[test]
    fn test_notebook_text_joins_cells_with_blank_line() {
        let cells = vec![
            Cell {
                index: 0,
                cell_type: CellType::Markdown,
                content: "# Task".to_string(),
            },
            Cell {
                index: 1,
                cell_type: CellType::Code,
                content: "import numpy as np".to_string(),
            },
        ];
        assert_eq!(notebook_text(&cells), "# Task\n\nimport numpy as np");
    }

    #[test]
    fn test_notebook_text_empty_cells() {
        assert_eq!(notebook_text(&[]), "");
    }
}
