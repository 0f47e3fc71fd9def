//! Excel 导出 - 业务能力层
//!
//! 用 `rust_xlsxwriter` 把报表行写成单工作表的 .xlsx 文件：
//! 全部信息合并在一张 Summary 表里，反馈和批注放在带自动换行
//! 的紧凑单元格中，底部附成绩统计块。

use std::path::{Path, PathBuf};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use tracing::info;

use crate::error::{AppResult, ReportError};
use crate::services::report_service::{GradeStats, ReportRow};

/// 表头，列顺序即写入顺序
const HEADERS: [&str; 8] = [
    "submitter_id",
    "name",
    "grade",
    "confidence_score",
    "submission_date",
    "error_count",
    "feedback",
    "cell_annotations",
];

/// 反馈列（G）宽度
const FEEDBACK_COL_WIDTH: f64 = 80.0;
/// 批注列（H）宽度
const ANNOTATIONS_COL_WIDTH: f64 = 50.0;
/// 数据行高度，容纳换行后的多行文本
const DATA_ROW_HEIGHT: f64 = 150.0;

/// Excel 导出器
///
/// 职责：
/// - 报表行 + 统计 → .xlsx 文件
/// - 不关心数据从哪来
pub struct ExcelWriter {
    report_folder: PathBuf,
}

impl ExcelWriter {
    pub fn new(report_folder: impl Into<PathBuf>) -> Self {
        Self {
            report_folder: report_folder.into(),
        }
    }

    /// 导出一个任务的报表，返回写出的文件路径
    ///
    /// 文件名固定为 `proofmate_report_<任务ID>.xlsx`，重复导出覆盖。
    pub fn export(
        &self,
        task_id: &str,
        rows: &[ReportRow],
        stats: GradeStats,
    ) -> AppResult<PathBuf> {
        let path = self
            .report_folder
            .join(format!("proofmate_report_{}.xlsx", task_id));

        std::fs::create_dir_all(&self.report_folder)
            .map_err(|e| excel_failed(&path, e))?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Summary")
            .map_err(|e| excel_failed(&path, e))?;

        let header_format = Format::new().set_bold();
        let wrap_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(|e| excel_failed(&path, e))?;
        }
        worksheet
            .set_column_width(6, FEEDBACK_COL_WIDTH)
            .map_err(|e| excel_failed(&path, e))?;
        worksheet
            .set_column_width(7, ANNOTATIONS_COL_WIDTH)
            .map_err(|e| excel_failed(&path, e))?;

        for (i, report_row) in rows.iter().enumerate() {
            let row = (i + 1) as u32;
            worksheet
                .write_string(row, 0, &report_row.submitter_id)
                .and_then(|ws| ws.write_string(row, 1, &report_row.submitter_name))
                .and_then(|ws| ws.write_number(row, 2, report_row.grade))
                .and_then(|ws| ws.write_number(row, 3, report_row.confidence_score))
                .and_then(|ws| ws.write_string(row, 4, &report_row.submission_date))
                .and_then(|ws| ws.write_number(row, 5, report_row.error_count as f64))
                .and_then(|ws| {
                    ws.write_string_with_format(row, 6, &report_row.feedback, &wrap_format)
                })
                .and_then(|ws| {
                    ws.write_string_with_format(row, 7, &report_row.cell_annotations, &wrap_format)
                })
                .and_then(|ws| ws.set_row_height(row, DATA_ROW_HEIGHT))
                .map_err(|e| excel_failed(&path, e))?;
        }

        // 数据区之后空一行再写统计块
        let stats_row = rows.len() as u32 + 2;
        worksheet
            .write_string_with_format(stats_row, 0, "Statistics", &header_format)
            .and_then(|ws| ws.write_string(stats_row + 1, 0, "Average Grade"))
            .and_then(|ws| ws.write_number(stats_row + 1, 1, stats.average))
            .and_then(|ws| ws.write_string(stats_row + 2, 0, "Minimum Grade"))
            .and_then(|ws| ws.write_number(stats_row + 2, 1, stats.min))
            .and_then(|ws| ws.write_string(stats_row + 3, 0, "Maximum Grade"))
            .and_then(|ws| ws.write_number(stats_row + 3, 1, stats.max))
            .map_err(|e| excel_failed(&path, e))?;

        workbook.save(&path).map_err(|e| excel_failed(&path, e))?;

        info!("📊 Excel 报表已导出: {}", path.display());
        Ok(path)
    }
}

fn excel_failed(
    path: &Path,
    source: impl std::error::Error + Send + Sync + 'static,
) -> crate::error::AppError {
    ReportError::ExcelWriteFailed {
        path: path.display().to_string(),
        source: Box::new(source),
    }
    .into()
}
