//! 结构化反馈模型
//!
//! 解析器的输出类型：一次评分的完整结构化结果。
//! 返回后不可变，下游只读。

use serde::{Deserialize, Serialize};

/// 单元格批注
///
/// 同一单元格的多条评语按提取顺序追加在 comments 中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellAnnotation {
    pub cell_index: usize,
    pub comments: Vec<String>,
}

/// 错误高亮
///
/// 预留字段：解析器目前不会产生该数据，列表始终为空，
/// 仅为前向兼容保留结构定义。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHighlight {
    pub cell_index: usize,
    pub line_start: usize,
    pub line_end: usize,
    pub error_type: String,
    pub error_message: String,
    pub suggestion: String,
}

/// 分类反馈列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedFeedback {
    /// 优点
    pub strengths: Vec<String>,
    /// 不足
    pub weaknesses: Vec<String>,
    /// 改进建议
    pub suggestions: Vec<String>,
}

/// 一次评分的结构化结果
///
/// 不变量：
/// - `grade` 始终在 [0, 10] 内，`confidence_score` 始终在 [0, 1] 内
/// - 三类反馈列表去重、非空（提取失败时填充默认值）且有条数上限
/// - `error_highlights` 始终为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredFeedback {
    pub error_summary: String,
    pub detailed_feedback: DetailedFeedback,
    pub confidence_score: f64,
    pub grade: f64,
    pub cell_annotations: Vec<CellAnnotation>,
    #[serde(default)]
    pub error_highlights: Vec<ErrorHighlight>,
}

impl StructuredFeedback {
    /// 衍生的错误数：优先取 error_highlights 数量，为空时退回 weaknesses 数量
    pub fn error_count(&self) -> usize {
        if !self.error_highlights.is_empty() {
            self.error_highlights.len()
        } else {
            self.detailed_feedback.weaknesses.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuredFeedback {
        StructuredFeedback {
            error_summary: "Good job overall.".to_string(),
            detailed_feedback: DetailedFeedback {
                strengths: vec!["Clear code".to_string()],
                weaknesses: vec!["Off by one".to_string(), "No validation".to_string()],
                suggestions: vec![],
            },
            confidence_score: 0.95,
            grade: 8.0,
            cell_annotations: vec![CellAnnotation {
                cell_index: 3,
                comments: vec!["check bounds".to_string()],
            }],
            error_highlights: vec![],
        }
    }

    #[test]
    fn test_error_count_falls_back_to_weaknesses() {
        assert_eq!(sample().error_count(), 2);
    }

    #[test]
    fn test_serde_round_trip() {
        let feedback = sample();
        let json = serde_json::to_string(&feedback).unwrap();
        let back: StructuredFeedback = serde_json::from_str(&json).unwrap();
        assert_eq!(feedback, back);
    }
}
