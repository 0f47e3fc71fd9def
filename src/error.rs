use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 输入错误（笔记本为空或无法解析）
    Input(InputError),
    /// LLM 服务错误
    Llm(LlmError),
    /// 提交记录存储错误
    Store(StoreError),
    /// 报表导出错误
    Report(ReportError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Input(e) => write!(f, "输入错误: {}", e),
            AppError::Llm(e) => write!(f, "LLM错误: {}", e),
            AppError::Store(e) => write!(f, "存储错误: {}", e),
            AppError::Report(e) => write!(f, "报表错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Input(e) => Some(e),
            AppError::Llm(e) => Some(e),
            AppError::Store(e) => Some(e),
            AppError::Report(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 输入错误
///
/// 对应请求校验阶段：空文件、无法解析的笔记本等。
/// 这类错误直接拒绝请求，绝不静默接受。
#[derive(Debug)]
pub enum InputError {
    /// 笔记本内容为空或过小
    EmptyNotebook {
        which: String,
    },
    /// 笔记本解析失败
    NotebookParseFailed {
        which: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 笔记本中没有可用的单元格
    NoCells {
        which: String,
    },
    /// 缺少必填字段
    MissingField {
        field: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyNotebook { which } => {
                write!(f, "笔记本内容为空或过小: {}", which)
            }
            InputError::NotebookParseFailed { which, source } => {
                write!(f, "笔记本解析失败 ({}): {}", which, source)
            }
            InputError::NoCells { which } => {
                write!(f, "笔记本中没有单元格: {}", which)
            }
            InputError::MissingField { field } => {
                write!(f, "缺少必填字段: {}", field)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::NotebookParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// LLM 服务错误
#[derive(Debug)]
pub enum LlmError {
    /// HTTP 直连请求失败
    HttpRequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误状态码
    BadStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// SDK 调用失败
    SdkCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 调用超时
    Timeout {
        seconds: u64,
    },
    /// 返回内容为空
    EmptyContent {
        model: String,
    },
    /// 两种调用方式都失败（唯一会导致整个请求失败的情况）
    BothTransportsFailed,
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::HttpRequestFailed { endpoint, source } => {
                write!(f, "HTTP直连请求失败 ({}): {}", endpoint, source)
            }
            LlmError::BadStatus {
                endpoint,
                status,
                body,
            } => {
                write!(f, "API返回错误状态 ({}): {} {}", endpoint, status, body)
            }
            LlmError::SdkCallFailed { model, source } => {
                write!(f, "SDK调用失败 (模型: {}): {}", model, source)
            }
            LlmError::Timeout { seconds } => {
                write!(f, "LLM调用超时 ({}秒)", seconds)
            }
            LlmError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
            LlmError::BothTransportsFailed => {
                write!(f, "HTTP直连与SDK两种调用方式均失败")
            }
        }
    }
}

impl std::error::Error for LlmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LlmError::HttpRequestFailed { source, .. }
            | LlmError::SdkCallFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 提交记录存储错误
#[derive(Debug)]
pub enum StoreError {
    /// 记录不存在
    NotFound {
        task_id: String,
        submitter_id: String,
    },
    /// 读取记录失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入记录失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound {
                task_id,
                submitter_id,
            } => {
                write!(f, "记录不存在: 任务 {} / 提交者 {}", task_id, submitter_id)
            }
            StoreError::ReadFailed { path, source } => {
                write!(f, "读取记录失败 ({}): {}", path, source)
            }
            StoreError::WriteFailed { path, source } => {
                write!(f, "写入记录失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::ReadFailed { source, .. } | StoreError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 报表导出错误
#[derive(Debug)]
pub enum ReportError {
    /// Excel 文件写入失败
    ExcelWriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::ExcelWriteFailed { path, source } => {
                write!(f, "Excel文件写入失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::ExcelWriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 子错误 → AppError ==========

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::Input(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<ReportError> for AppError {
    fn from(e: ReportError) -> Self {
        AppError::Report(e)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建空笔记本错误
    pub fn empty_notebook(which: impl Into<String>) -> Self {
        AppError::Input(InputError::EmptyNotebook {
            which: which.into(),
        })
    }

    /// 创建笔记本解析错误
    pub fn notebook_parse_failed(
        which: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Input(InputError::NotebookParseFailed {
            which: which.into(),
            source: Box::new(source),
        })
    }

    /// 创建记录读取错误
    pub fn store_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Store(StoreError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建记录写入错误
    pub fn store_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Store(StoreError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
