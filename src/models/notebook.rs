//! 笔记本模型
//!
//! 只负责把 nbformat v4 的 JSON 转成有序的单元格列表，
//! 不关心笔记本的其他元数据。

use serde::Deserialize;

use crate::error::{AppError, AppResult, InputError};

/// 单元格类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    /// 代码单元格
    Code,
    /// Markdown 单元格
    Markdown,
}

/// 笔记本单元格
///
/// 从笔记本文档中提取后只读，index 为在原笔记本中的序号。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub index: usize,
    pub cell_type: CellType,
    pub content: String,
}

/// nbformat 的 source 字段既可能是字符串也可能是字符串数组
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Text(String),
    Lines(Vec<String>),
}

impl RawSource {
    fn join(self) -> String {
        match self {
            RawSource::Text(s) => s,
            RawSource::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Deserialize)]
struct RawCell {
    cell_type: String,
    #[serde(default)]
    source: Option<RawSource>,
}

#[derive(Deserialize)]
struct RawNotebook {
    cells: Vec<RawCell>,
}

/// 笔记本内容的最小有效字节数，低于此值视为空文件
const MIN_NOTEBOOK_BYTES: usize = 10;

/// 从笔记本 JSON 文本中提取有序单元格列表
///
/// 只保留 code 和 markdown 两类单元格，其余类型跳过但保留原序号。
///
/// # 参数
/// - `raw`: 笔记本文件的原始文本内容
/// - `which`: 笔记本标识（用于错误信息，如 "student" / "reference"）
pub fn extract_cells(raw: &str, which: &str) -> AppResult<Vec<Cell>> {
    if raw.len() < MIN_NOTEBOOK_BYTES {
        return Err(AppError::empty_notebook(which));
    }

    let notebook: RawNotebook = serde_json::from_str(raw)
        .map_err(|e| AppError::notebook_parse_failed(which, e))?;

    let mut cells = Vec::new();
    for (index, cell) in notebook.cells.into_iter().enumerate() {
        let cell_type = match cell.cell_type.as_str() {
            "code" => CellType::Code,
            "markdown" => CellType::Markdown,
            _ => continue,
        };
        cells.push(Cell {
            index,
            cell_type,
            content: cell.source.map(RawSource::join).unwrap_or_default(),
        });
    }

    if cells.is_empty() {
        return Err(AppError::Input(InputError::NoCells {
            which: which.to_string(),
        }));
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "cells": [
            {"cell_type": "markdown", "source": "# Task"},
            {"cell_type": "code", "source": ["import numpy as np\n", "a = np.eye(2)"]},
            {"cell_type": "raw", "source": "ignored"},
            {"cell_type": "code", "source": "print(a)"}
        ],
        "nbformat": 4,
        "nbformat_minor": 5
    }"##;

    #[test]
    fn test_extract_cells_keeps_order_and_indices() {
        let cells = extract_cells(SAMPLE, "student").unwrap();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].index, 0);
        assert_eq!(cells[0].cell_type, CellType::Markdown);
        assert_eq!(cells[1].index, 1);
        assert_eq!(cells[1].content, "import numpy as np\na = np.eye(2)");
        // raw 单元格被跳过，但后续序号不变
        assert_eq!(cells[2].index, 3);
        assert_eq!(cells[2].content, "print(a)");
    }

    #[test]
    fn test_extract_cells_rejects_tiny_input() {
        let err = extract_cells("{}", "student").unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(InputError::EmptyNotebook { .. })
        ));
    }

    #[test]
    fn test_extract_cells_rejects_invalid_json() {
        let err = extract_cells("this is not a notebook", "reference").unwrap_err();
        assert!(matches!(
            err,
            AppError::Input(InputError::NotebookParseFailed { .. })
        ));
    }

    #[test]
    fn test_extract_cells_rejects_cellless_notebook() {
        let raw = r#"{"cells": [], "nbformat": 4}"#;
        let err = extract_cells(raw, "student").unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::NoCells { .. })));
    }
}
