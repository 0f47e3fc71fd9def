//! # ProofMate
//!
//! 一个用于自动评阅数学类 Jupyter 笔记本的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 纯数据：单元格、主题、结构化反馈、提交记录
//! - `extract_cells` - nbformat JSON → 有序单元格列表
//! - `classify` - 关键词计数式主题分类
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程顺序
//! - `LlmService` - 双通道 LLM 调用能力（HTTP 直连 + SDK 后备）
//! - `SubmissionStore` - 提交记录落盘能力
//! - `ReportService` / `ExcelWriter` - 报表聚合与 Excel 导出能力
//!
//! ### ③ 解析层（Parser）
//! - `parser/` - 自由文本回复 → 结构化反馈的分层归一化
//! - `ResponseParser` - 章节 → 行内 → 临时章节表 → 默认值
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一份提交"的完整评分流程
//! - `GradingCtx` - 上下文封装（task_id + submitter）
//! - `GradingFlow` - 流程编排（解析 → 分类 → LLM → 归一化）
//!
//! ### ⑤ 应用层（App）
//! - `app` - 组装全部服务，串起评分到报表的完整链路

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{classify, extract_cells, Cell, StructuredFeedback, Submission, Topic};
pub use parser::{ParserConfig, ResponseParser};
pub use prompt::PromptBuilder;
pub use services::{ExcelWriter, LlmService, ReportService, SubmissionStore};
pub use workflow::{GradingCtx, GradingFlow};
