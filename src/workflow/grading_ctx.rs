//! 评分上下文
//!
//! 封装"我正在评谁在哪个任务下的提交"这一信息

use std::fmt::Display;

/// 评分上下文
///
/// 包含评一份提交所需的全部标识信息
#[derive(Debug, Clone)]
pub struct GradingCtx {
    /// 任务ID
    pub task_id: String,

    /// 提交者ID（由姓名和任务ID确定性派生）
    pub submitter_id: String,

    /// 提交者姓名
    pub submitter_name: String,
}

impl GradingCtx {
    /// 创建新的评分上下文
    pub fn new(task_id: String, submitter_id: String, submitter_name: String) -> Self {
        Self {
            task_id,
            submitter_id,
            submitter_name,
        }
    }
}

impl Display for GradingCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[任务#{} 提交者#{} ({})]",
            self.task_id, self.submitter_id, self.submitter_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_all_identifiers() {
        let ctx = GradingCtx::new(
            "hw-1".to_string(),
            "abc123".to_string(),
            "Alice".to_string(),
        );
        let text = format!("{}", ctx);
        assert!(text.contains("hw-1"));
        assert!(text.contains("abc123"));
        assert!(text.contains("Alice"));
    }
}
