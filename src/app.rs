//! 应用层 - 组装与编排
//!
//! 持有全部服务实例，串起"读文件 → 评分 → 落盘 → 导报表"的
//! 完整链路。一次运行处理一份提交，随后对该任务全量重建报表。

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::Submission;
use crate::services::{ExcelWriter, ReportService, SubmissionStore};
use crate::workflow::{GradingCtx, GradingFlow};

/// 应用主结构
pub struct App {
    config: Config,
    flow: GradingFlow,
    store: SubmissionStore,
    excel: ExcelWriter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        log_startup(&config);

        let flow = GradingFlow::new(&config)?;
        let store = SubmissionStore::new(&config.store_root);
        let excel = ExcelWriter::new(&config.report_folder);

        Ok(Self {
            config,
            flow,
            store,
            excel,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<()> {
        // 读入两份笔记本
        let student_raw = read_notebook(&self.config.student_notebook).await?;
        let reference_raw = read_notebook(&self.config.reference_notebook).await?;

        // 评分
        let ctx = GradingCtx::new(
            self.config.task_id.clone(),
            Submission::derive_submitter_id(&self.config.submitter_name, &self.config.task_id),
            self.config.submitter_name.clone(),
        );
        let submission = self.flow.run(&ctx, &student_raw, &reference_raw).await?;

        // 落盘
        self.store.put(&self.config.task_id, &submission).await?;

        // 对该任务全量重建报表
        let all = self.store.list(&self.config.task_id).await?;
        if all.is_empty() {
            warn!("⚠️ 任务 {} 下没有任何提交记录", self.config.task_id);
            return Ok(());
        }

        let rows = ReportService::build_rows(&all);
        let stats = ReportService::grade_stats(&all);
        let report_path = self.excel.export(&self.config.task_id, &rows, stats)?;

        info!("\n========== 运行完成 ==========");
        info!("📋 任务: {}", self.config.task_id);
        info!("👤 本次提交: {} ({})", ctx.submitter_name, ctx.submitter_id);
        info!("🎯 本次评分: {:.1}/10", submission.feedback.grade);
        info!(
            "📈 任务统计: {} 份提交，平均 {:.2}，最低 {:.1}，最高 {:.1}",
            all.len(),
            stats.average,
            stats.min,
            stats.max
        );
        info!("📊 报表文件: {}", report_path.display());

        Ok(())
    }
}

/// 读取笔记本文件的原始文本
async fn read_notebook(path: &str) -> AppResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Other(format!("无法读取笔记本文件 {}: {}", path, e)))
}

fn log_startup(config: &Config) {
    info!("========== ProofMate 笔记本评分服务 ==========");
    info!("📋 任务: {}", config.task_id);
    info!("👤 提交者: {}", config.submitter_name);
    info!("📓 学生笔记本: {}", config.student_notebook);
    info!("📓 参考笔记本: {}", config.reference_notebook);
    info!("🤖 模型: {} @ {}", config.llm_model_name, config.llm_api_base_url);
    if config.llm_api_key.is_empty() {
        warn!("⚠️ 未设置 OPENAI_API_KEY，LLM 调用将会失败");
    }
}
