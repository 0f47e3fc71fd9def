//! 解析器用到的全部正则与关键词表
//!
//! 模型回复是英/俄双语混排的自由文本，这里集中维护两种语言的
//! 模式。regex crate 不支持环视，需要前瞻的场景一律用行内捕获
//! 或基于匹配位置的切片扫描实现。

use regex::Regex;

/// 反馈类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Strengths,
    Weaknesses,
    Suggestions,
}

/// 各类别的标题关键词（小写子串匹配，英/俄）
///
/// 用于定位"## Strengths"一类的章节标题。
pub fn heading_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Strengths => &["strength", "сильн", "положительн"],
        Category::Weaknesses => &[
            "weakness",
            "areas for improvement",
            "недостат",
            "ошибк",
            "област",
        ],
        Category::Suggestions => &["suggestion", "recommendation", "рекомендаци"],
    }
}

/// 兜底分桶用的宽松关键词表（第二次机会启发式专用）
pub fn bucket_keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Strengths => &["strength", "сильн", "положительн"],
        Category::Weaknesses => &[
            "weakness", "issue", "error", "problem", "област", "недостат", "ошибк",
        ],
        Category::Suggestions => &["suggestion", "recommendation", "рекомендаци"],
    }
}

/// 摘要中的"有错误"指示词（触发 weaknesses 兜底）
pub const ERROR_INDICATORS: [&str; 2] = ["error", "ошибк"];

/// 编译好的正则集合，解析器创建时编译一次
pub struct Patterns {
    /// 带标签的评分数字，如 "Grade: 8.5" / "Оценка: 8"
    pub grade: Regex,
    /// 带标签的置信度数字
    pub confidence: Regex,
    /// 行内优点模式（按优先级排列）
    pub strengths_inline: Vec<Regex>,
    /// 行内不足模式
    pub weaknesses_inline: Vec<Regex>,
    /// 行内建议模式
    pub suggestions_inline: Vec<Regex>,
    /// 无序列表行
    pub bullet_line: Regex,
    /// 标题行（markdown 标题或"首字母大写加冒号"式）
    pub heading_line: Regex,
    /// 单元格批注章节的标题
    pub annotation_section: Regex,
    /// 章节内的 "Cell N:" / "Ячейка N:" 标记
    pub cell_marker: Regex,
    /// 全文内联单元格提及（两种备选模式）
    pub cell_inline: Vec<Regex>,
    /// 不足条目里的单元格提及（批注后备提取用）
    pub cell_in_text: Regex,
}

impl Patterns {
    pub fn compile() -> Self {
        Self {
            grade: regex(r"(?i)(?:grade|оценка):?\s*(\d+(?:\.\d+)?)"),
            confidence: regex(r"(?i)(?:confidence|уверенность):?\s*(\d+(?:\.\d+)?)"),
            strengths_inline: vec![
                regex(
                    r"(?mi)(?:strengths?|сильн[а-я]+[^\n:]*|положительн[а-я]+[^\n:]*)\s*:\s*(.+)$",
                ),
                regex(r"(?mi)(?:strengths?|сильн[а-я]+)[^\n:]*\n\s*[-*•]?\s*(.+)$"),
            ],
            weaknesses_inline: vec![
                regex(
                    r"(?mi)(?:weakness(?:es)?|issues?|errors?|problems?|недостат[а-я]+[^\n:]*|ошибк[а-я]+[^\n:]*|област[а-я]+[^\n:]*)\s*:\s*(.+)$",
                ),
                regex(
                    r"(?mi)(?:weakness(?:es)?|issues?|errors?|problems?|недостат[а-я]+|ошибк[а-я]+|област[а-я]+)[^\n:]*\n\s*[-*•]?\s*(.+)$",
                ),
            ],
            suggestions_inline: vec![
                regex(
                    r"(?mi)(?:suggestions?|recommendations?|improvements?|рекомендаци[а-я]+[^\n:]*)\s*:\s*(.+)$",
                ),
                regex(
                    r"(?mi)(?:suggestions?|recommendations?|improvements?|рекомендаци[а-я]+)[^\n:]*\n\s*[-*•]?\s*(.+)$",
                ),
            ],
            bullet_line: regex(r"^[-*•]\s*(.+)$"),
            heading_line: regex(r"^(?:#+\s+\S.*|[A-ZА-Я][A-Za-zА-Яа-я\s]+:)\s*$"),
            annotation_section: regex(r"(?i)#{0,2}\s*(?:cell\s+annotations|аннотации\s+к\s+ячейкам)"),
            cell_marker: regex(r"(?i)(?:\*\*)?(?:cell|ячейка)\s*(\d+)(?:\*\*)?[:\s\-]+"),
            cell_inline: vec![
                regex(r"(?i)(?:cell|ячейка|код\s+в\s+ячейке)\s*(\d+)[^\n:：]*[:：]\s*([^\n]+)"),
                regex(r"(?i)(?:cell|ячейка|код\s+в\s+ячейке)\s*(\d+)[^\n:：]*\n\s*[-*•]?\s*([^\n]+)"),
            ],
            cell_in_text: regex(r"(?i)(?:cell|ячейка)\s*(\d+)"),
        }
    }
}

/// 模式全部是编译期常量，编译失败属于程序缺陷
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("内置正则表达式无效")
}
