/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 学生笔记本文件路径
    pub student_notebook: String,
    /// 参考答案笔记本文件路径
    pub reference_notebook: String,
    /// 任务ID
    pub task_id: String,
    /// 提交者姓名
    pub submitter_name: String,
    /// 提交记录存放目录
    pub store_root: String,
    /// 报表输出目录
    pub report_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// LLM 调用超时（秒）
    pub request_timeout_secs: u64,
    // --- 提示词配置 ---
    /// 嵌入提示词的笔记本内容上限（字符数），超出部分截断
    pub max_prompt_chars: usize,
    // --- 解析器配置 ---
    /// 反馈条目最小长度（不大于该长度的条目会被丢弃）
    pub min_entry_len: usize,
    /// 每类反馈列表的最大条目数
    pub max_list_len: usize,
    /// 摘要段落最小长度（短于该长度时尝试下一段）
    pub min_summary_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            student_notebook: "student.ipynb".to_string(),
            reference_notebook: "reference.ipynb".to_string(),
            task_id: "task-001".to_string(),
            submitter_name: "anonymous".to_string(),
            store_root: "submissions".to_string(),
            report_folder: "reports".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o".to_string(),
            request_timeout_secs: 30,
            max_prompt_chars: 15000,
            min_entry_len: 5,
            max_list_len: 5,
            min_summary_len: 20,
        }
    }
}

impl Config {
    /// 校验必填字段
    ///
    /// task_id 和 submitter_name 是提交记录的键来源，空白值
    /// 直接拒绝，绝不静默接受。
    pub fn validate(&self) -> crate::error::AppResult<()> {
        for (field, value) in [
            ("task_id", &self.task_id),
            ("submitter_name", &self.submitter_name),
        ] {
            if value.trim().is_empty() {
                return Err(crate::error::AppError::Input(
                    crate::error::InputError::MissingField {
                        field: field.to_string(),
                    },
                ));
            }
        }
        Ok(())
    }

    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            student_notebook: std::env::var("STUDENT_NOTEBOOK").unwrap_or(default.student_notebook),
            reference_notebook: std::env::var("REFERENCE_NOTEBOOK").unwrap_or(default.reference_notebook),
            task_id: std::env::var("TASK_ID").unwrap_or(default.task_id),
            submitter_name: std::env::var("SUBMITTER_NAME").unwrap_or(default.submitter_name),
            store_root: std::env::var("STORE_ROOT").unwrap_or(default.store_root),
            report_folder: std::env::var("REPORT_FOLDER").unwrap_or(default.report_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("OPENAI_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("OPENAI_API_BASE").map(|v| normalize_api_base(&v)).unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_prompt_chars: std::env::var("MAX_PROMPT_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_prompt_chars),
            min_entry_len: std::env::var("MIN_ENTRY_LEN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.min_entry_len),
            max_list_len: std::env::var("MAX_LIST_LEN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_list_len),
            min_summary_len: std::env::var("MIN_SUMMARY_LEN").ok().and_then(|v| v.parse().ok()).unwrap_or(default.min_summary_len),
        }
    }
}

/// 规范化 API 基础地址：确保以 /v1 结尾
fn normalize_api_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{}/v1", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_base_appends_v1() {
        assert_eq!(
            normalize_api_base("https://api.example.com"),
            "https://api.example.com/v1"
        );
        assert_eq!(
            normalize_api_base("https://api.example.com/"),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_normalize_api_base_keeps_existing_v1() {
        assert_eq!(
            normalize_api_base("https://api.example.com/v1"),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn test_validate_accepts_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        use crate::error::{AppError, InputError};

        let mut config = Config::default();
        config.task_id = "   ".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(InputError::MissingField { ref field }) if field == "task_id"
        ));

        let mut config = Config::default();
        config.submitter_name = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(InputError::MissingField { ref field }) if field == "submitter_name"
        ));
    }
}
