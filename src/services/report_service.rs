//! 报表服务 - 业务能力层
//!
//! 把提交记录集合变换成报表行和成绩统计。纯数据变换，
//! 不做任何 IO，Excel 落盘交给 excel_writer。

use tracing::debug;

use crate::models::Submission;

/// 报表中的一行，对应一条提交记录
///
/// feedback / cell_annotations 是给人读的多行文本，
/// 在工作表里渲染为自动换行的单元格。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub submitter_id: String,
    pub submitter_name: String,
    pub grade: f64,
    pub confidence_score: f64,
    pub submission_date: String,
    pub error_count: usize,
    pub feedback: String,
    pub cell_annotations: String,
}

/// 成绩统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// 报表服务
///
/// 职责：
/// - 提交记录 → 报表行
/// - 成绩聚合统计
/// - 不出现文件路径
pub struct ReportService;

impl ReportService {
    /// 把提交记录集合变换成报表行
    ///
    /// 空集合返回一个占位行，保证导出的工作表永远有数据区。
    pub fn build_rows(submissions: &[Submission]) -> Vec<ReportRow> {
        if submissions.is_empty() {
            debug!("提交记录为空，生成占位行");
            return vec![ReportRow {
                submitter_id: "-".to_string(),
                submitter_name: "No submissions".to_string(),
                grade: 0.0,
                confidence_score: 0.0,
                submission_date: "-".to_string(),
                error_count: 0,
                feedback: "-".to_string(),
                cell_annotations: "-".to_string(),
            }];
        }

        submissions.iter().map(Self::build_row).collect()
    }

    fn build_row(submission: &Submission) -> ReportRow {
        let feedback = &submission.feedback;
        ReportRow {
            submitter_id: submission.submitter_id.clone(),
            submitter_name: submission.submitter_name.clone(),
            grade: feedback.grade,
            confidence_score: feedback.confidence_score,
            submission_date: submission.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            error_count: feedback.error_count(),
            feedback: Self::format_feedback(submission),
            cell_annotations: Self::format_annotations(submission),
        }
    }

    /// 三类反馈合并为一段分节的多行文本
    fn format_feedback(submission: &Submission) -> String {
        let detail = &submission.feedback.detailed_feedback;
        let mut sections = Vec::new();

        if !detail.strengths.is_empty() {
            sections.push(format!("STRENGTHS:\n{}", bullets(&detail.strengths)));
        }
        if !detail.weaknesses.is_empty() {
            sections.push(format!("WEAKNESSES:\n{}", bullets(&detail.weaknesses)));
        }
        if !detail.suggestions.is_empty() {
            sections.push(format!("RECOMMENDATIONS:\n{}", bullets(&detail.suggestions)));
        }

        if sections.is_empty() {
            submission.feedback.error_summary.clone()
        } else {
            sections.join("\n\n")
        }
    }

    /// 单元格批注合并为多行文本，每条评语一行
    fn format_annotations(submission: &Submission) -> String {
        let annotations = &submission.feedback.cell_annotations;
        if annotations.is_empty() {
            return "-".to_string();
        }

        let mut lines = vec!["CELL ANNOTATIONS:".to_string()];
        for annotation in annotations {
            for comment in &annotation.comments {
                lines.push(format!("• Cell {}: {}", annotation.cell_index, comment));
            }
        }
        lines.join("\n")
    }

    /// 成绩聚合统计
    ///
    /// 空集合返回全 0，不产生 NaN。
    pub fn grade_stats(submissions: &[Submission]) -> GradeStats {
        if submissions.is_empty() {
            return GradeStats {
                average: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }

        let grades: Vec<f64> = submissions.iter().map(|s| s.feedback.grade).collect();
        let sum: f64 = grades.iter().sum();
        let min = grades.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = grades.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        GradeStats {
            average: sum / grades.len() as f64,
            min,
            max,
        }
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::{CellAnnotation, DetailedFeedback, StructuredFeedback};
    use crate::models::Submission;

    fn submission(name: &str, grade: f64) -> Submission {
        let feedback = StructuredFeedback {
            error_summary: "Mostly correct.".to_string(),
            detailed_feedback: DetailedFeedback {
                strengths: vec!["clean numpy usage".to_string()],
                weaknesses: vec!["missing edge case".to_string(), "weak validation".to_string()],
                suggestions: vec!["add shape checks".to_string()],
            },
            confidence_score: 0.9,
            grade,
            cell_annotations: vec![CellAnnotation {
                cell_index: 3,
                comments: vec!["sign error".to_string(), "unvalidated result".to_string()],
            }],
            error_highlights: vec![],
        };
        let id = Submission::derive_submitter_id(name, "hw-1");
        Submission::new(id, name, feedback)
    }

    #[test]
    fn test_build_rows_maps_fields() {
        let rows = ReportService::build_rows(&[submission("Alice", 8.5)]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.submitter_name, "Alice");
        assert_eq!(row.grade, 8.5);
        assert_eq!(row.error_count, 2);
        assert!(row.feedback.contains("STRENGTHS:\n• clean numpy usage"));
        assert!(row.feedback.contains("WEAKNESSES:\n• missing edge case\n• weak validation"));
        assert!(row.feedback.contains("RECOMMENDATIONS:\n• add shape checks"));
    }

    #[test]
    fn test_annotations_flattened_one_comment_per_line() {
        let rows = ReportService::build_rows(&[submission("Alice", 8.5)]);
        let text = &rows[0].cell_annotations;
        assert!(text.starts_with("CELL ANNOTATIONS:"));
        assert!(text.contains("• Cell 3: sign error"));
        assert!(text.contains("• Cell 3: unvalidated result"));
    }

    #[test]
    fn test_empty_collection_yields_placeholder_row() {
        let rows = ReportService::build_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].submitter_name, "No submissions");
        assert_eq!(rows[0].grade, 0.0);
    }

    #[test]
    fn test_grade_stats() {
        let submissions = vec![submission("A", 6.0), submission("B", 8.0), submission("C", 10.0)];
        let stats = ReportService::grade_stats(&submissions);
        assert_eq!(stats.average, 8.0);
        assert_eq!(stats.min, 6.0);
        assert_eq!(stats.max, 10.0);
    }

    #[test]
    fn test_grade_stats_empty_is_all_zero() {
        let stats = ReportService::grade_stats(&[]);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
    }

    #[test]
    fn test_single_submission_stats_degenerate() {
        let stats = ReportService::grade_stats(&[submission("A", 7.5)]);
        assert_eq!(stats.average, 7.5);
        assert_eq!(stats.min, 7.5);
        assert_eq!(stats.max, 7.5);
    }
}
