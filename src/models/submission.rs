//! 提交记录模型

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::feedback::StructuredFeedback;

/// 提交者ID的截断长度（sha256 十六进制前缀）
const SUBMITTER_ID_LEN: usize = 16;

/// 一次提交：某个提交者在某个任务下的结构化评分结果
///
/// 以 (task_id, submitter_id) 为键，分析完成时创建；
/// 之后只会被同键的新分析整体覆盖，不做局部修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub submitter_id: String,
    pub submitter_name: String,
    pub submitted_at: DateTime<Local>,
    pub feedback: StructuredFeedback,
}

impl Submission {
    /// 创建新的提交记录，提交时间取当前时间
    pub fn new(
        submitter_id: impl Into<String>,
        submitter_name: impl Into<String>,
        feedback: StructuredFeedback,
    ) -> Self {
        Self {
            submitter_id: submitter_id.into(),
            submitter_name: submitter_name.into(),
            submitted_at: Local::now(),
            feedback,
        }
    }

    /// 从 (提交者姓名, 任务ID) 确定性地派生提交者ID
    ///
    /// 同名提交者对同一任务的重复提交会落到同一个键上（后写覆盖）。
    pub fn derive_submitter_id(submitter_name: &str, task_id: &str) -> String {
        let digest = Sha256::digest(format!("{}:{}", submitter_name, task_id).as_bytes());
        let hex = format!("{:x}", digest);
        hex[..SUBMITTER_ID_LEN].to_string()
    }
}
