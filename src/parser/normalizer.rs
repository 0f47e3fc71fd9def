//! 响应归一化器 - 核心
//!
//! 把外部模型返回的自由文本转成一个有界、去重、字段齐全的
//! `StructuredFeedback`。模型的输出格式没有任何保证，所以提取
//! 是分层的：先按约定的章节结构解析，失败后逐级放宽到行内模式
//! 和临时章节表。任何一步提取不到内容都退回到文档化的默认值，
//! 这个函数永远不会失败——人工阅卷者不应该看到崩溃。
//!
//! 提取顺序：
//! 1. 摘要（首个非空段落，单次向后看）
//! 2. 评分 / 置信度（带标签数字，缺省 7.5 / 0.9，范围钳制）
//! 3. 三类反馈列表（章节 → 行内模式，去重 + 长度过滤 + 截断）
//! 4. 单元格批注（专用章节 → 全文内联，按 cell_index 合并）
//! 5. 临时章节表兜底（最多执行一次）
//! 6. 默认值填充与收尾

use tracing::{debug, warn};

use crate::models::feedback::{CellAnnotation, DetailedFeedback, StructuredFeedback};
use crate::parser::patterns::{
    bucket_keywords, heading_keywords, Category, Patterns, ERROR_INDICATORS,
};

/// 提取不到摘要时的固定文案
const DEFAULT_SUMMARY: &str = "Analysis completed.";
/// 提取不到评分时的默认值
const DEFAULT_GRADE: f64 = 7.5;
/// 提取不到置信度时的默认值
const DEFAULT_CONFIDENCE: f64 = 0.9;
/// strengths 全空时的固定文案
const DEFAULT_STRENGTH: &str =
    "The solution demonstrates understanding of core mathematical concepts";
/// suggestions 全空时的固定文案
const DEFAULT_SUGGESTION: &str =
    "Review the specific cell annotations for detailed improvement suggestions";

/// 解析器参数
///
/// 最小长度和条数上限是沿用下来的经验常量，没有和正确性绑定的
/// 理由，所以保持可配置而不是硬编码。
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    /// 条目最小长度（字符数，不大于该值的条目丢弃）
    pub min_entry_len: usize,
    /// 每类列表的条目上限
    pub max_list_len: usize,
    /// 摘要段落的最小长度（短于该值时向后看一段）
    pub min_summary_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_entry_len: 5,
            max_list_len: 5,
            min_summary_len: 20,
        }
    }
}

/// 响应解析器
///
/// 创建时编译全部正则；`parse` 是纯函数，相同输入产生
/// 逐字节相同的输出。
pub struct ResponseParser {
    cfg: ParserConfig,
    patterns: Patterns,
}

impl ResponseParser {
    pub fn new(cfg: ParserConfig) -> Self {
        Self {
            cfg,
            patterns: Patterns::compile(),
        }
    }

    /// 解析一段模型回复
    pub fn parse(&self, raw: &str) -> StructuredFeedback {
        let error_summary = self.extract_summary(raw);

        let grade = self
            .extract_labeled_number(&self.patterns.grade, raw)
            .unwrap_or(DEFAULT_GRADE)
            .clamp(0.0, 10.0);
        let confidence_score = self
            .extract_labeled_number(&self.patterns.confidence, raw)
            .unwrap_or(DEFAULT_CONFIDENCE)
            .clamp(0.0, 1.0);

        let mut strengths = self.extract_list(raw, Category::Strengths);
        let mut weaknesses = self.extract_list(raw, Category::Weaknesses);
        let mut suggestions = self.extract_list(raw, Category::Suggestions);
        let cell_annotations = self.extract_annotations(raw);

        // 第二次机会：常规模式几乎没提取到东西时，扫一遍临时章节表。
        // 只执行一次，绝不递归。
        if strengths.is_empty() && weaknesses.is_empty() && cell_annotations.len() < 2 {
            warn!("常规模式提取结果不足，启用临时章节表兜底");
            let fallback = self.adhoc_sections(raw);
            strengths = self.normalize_entries(fallback.strengths);
            weaknesses = self.normalize_entries(fallback.weaknesses);
            let mut merged = suggestions;
            merged.extend(fallback.suggestions);
            suggestions = self.normalize_entries(merged);
        }

        // 默认值填充
        if strengths.is_empty() {
            strengths = vec![DEFAULT_STRENGTH.to_string()];
        }
        if weaknesses.is_empty() {
            let summary_lower = error_summary.to_lowercase();
            if ERROR_INDICATORS.iter().any(|kw| summary_lower.contains(kw)) {
                weaknesses = vec![error_summary.clone()];
            }
        }
        if suggestions.is_empty() {
            suggestions = vec![DEFAULT_SUGGESTION.to_string()];
        }

        // 收尾：按提取顺序截断到上限
        strengths.truncate(self.cfg.max_list_len);
        weaknesses.truncate(self.cfg.max_list_len);
        suggestions.truncate(self.cfg.max_list_len);

        debug!(
            "提取完成: {} 优点, {} 不足, {} 建议, {} 条批注",
            strengths.len(),
            weaknesses.len(),
            suggestions.len(),
            cell_annotations.len()
        );

        StructuredFeedback {
            error_summary,
            detailed_feedback: DetailedFeedback {
                strengths,
                weaknesses,
                suggestions,
            },
            confidence_score,
            grade,
            cell_annotations,
            error_highlights: Vec::new(),
        }
    }

    // ========== 摘要 ==========

    /// 提取摘要：空行分段，取第一个非空段
    ///
    /// 首段过短且存在第二段时改用第二段（只向后看一次，不迭代）；
    /// 标题打头的段落不作为向后看的目标，避免把章节骨架当成摘要。
    fn extract_summary(&self, raw: &str) -> String {
        let paragraphs: Vec<&str> = raw
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let Some(first) = paragraphs.first() else {
            return DEFAULT_SUMMARY.to_string();
        };

        let candidate = self.strip_leading_heading(first);
        if candidate.chars().count() < self.cfg.min_summary_len {
            if let Some(second) = paragraphs.get(1) {
                if !second.starts_with('#') {
                    return self.strip_leading_heading(second);
                }
            }
        }

        if candidate.is_empty() {
            DEFAULT_SUMMARY.to_string()
        } else {
            candidate
        }
    }

    /// 段落以 "## Summary" 一类标题行开头时去掉标题行
    fn strip_leading_heading(&self, paragraph: &str) -> String {
        if paragraph.starts_with('#') {
            if let Some((_, rest)) = paragraph.split_once('\n') {
                let rest = rest.trim();
                if !rest.is_empty() {
                    return rest.to_string();
                }
            }
        }
        paragraph.to_string()
    }

    // ========== 数值字段 ==========

    /// 按标签模式提取第一个数字，取第一个命中
    fn extract_labeled_number(&self, pattern: &regex::Regex, raw: &str) -> Option<f64> {
        pattern
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }

    // ========== 反馈列表 ==========

    /// 提取一类反馈列表：先找章节，再退回行内模式，最后归一化
    fn extract_list(&self, raw: &str, category: Category) -> Vec<String> {
        let mut entries = self.section_bullets(raw, category);

        if entries.is_empty() {
            entries = self.inline_matches(raw, category);
        }

        self.normalize_entries(entries)
    }

    /// 定位类别标题引入的章节，收集其中的无序列表行
    ///
    /// 章节范围：标题行之后到下一个标题行或文本结束。
    fn section_bullets(&self, raw: &str, category: Category) -> Vec<String> {
        let keywords = heading_keywords(category);
        let mut collecting = false;
        let mut out = Vec::new();

        for line in raw.lines() {
            let trimmed = line.trim();
            if self.patterns.heading_line.is_match(trimmed) {
                let heading = trimmed.trim_start_matches('#').trim_end_matches(':');
                let heading_lower = heading.trim().to_lowercase();
                collecting = keywords.iter().any(|kw| heading_lower.contains(kw));
                continue;
            }
            if collecting {
                if let Some(caps) = self.patterns.bullet_line.captures(trimmed) {
                    out.push(caps[1].trim().to_string());
                }
            }
        }

        out
    }

    /// 行内模式扫描：按固定优先级尝试全部备选模式，
    /// 每个命中过的模式的结果都累加进来
    fn inline_matches(&self, raw: &str, category: Category) -> Vec<String> {
        let patterns = match category {
            Category::Strengths => &self.patterns.strengths_inline,
            Category::Weaknesses => &self.patterns.weaknesses_inline,
            Category::Suggestions => &self.patterns.suggestions_inline,
        };

        let mut out = Vec::new();
        for pattern in patterns {
            for caps in pattern.captures_iter(raw) {
                let entry = caps[1].trim();
                if !entry.is_empty() {
                    out.push(entry.to_string());
                }
            }
        }
        out
    }

    /// 归一化条目列表
    ///
    /// 大小写无关地去重（裁剪后比较），丢弃不大于最小长度的条目，
    /// 保持首次出现的顺序，最后截断到上限。
    fn normalize_entries(&self, entries: Vec<String>) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();

        for entry in entries {
            let trimmed = entry.trim();
            if trimmed.chars().count() <= self.cfg.min_entry_len {
                continue;
            }
            let key = trimmed.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            out.push(trimmed.to_string());
            if out.len() >= self.cfg.max_list_len {
                break;
            }
        }

        out
    }

    // ========== 单元格批注 ==========

    /// 提取单元格批注：先找专用章节，没有或为空时退回全文内联扫描
    fn extract_annotations(&self, raw: &str) -> Vec<CellAnnotation> {
        let mut annotations = Vec::new();

        if let Some(section) = self.annotation_section(raw) {
            self.collect_section_annotations(section, &mut annotations);
        }

        if annotations.is_empty() {
            self.collect_inline_annotations(raw, &mut annotations);
        }

        annotations
    }

    /// 取出"Cell Annotations"章节的正文（到下一个 ## 标题或文末）
    fn annotation_section<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let m = self.patterns.annotation_section.find(raw)?;
        let after = &raw[m.end()..];
        // 跳过标题所在行的剩余部分
        let body_start = after.find('\n').map(|i| i + 1).unwrap_or(after.len());
        let body = &after[body_start..];
        let body_end = body.find("\n##").unwrap_or(body.len());
        Some(&body[..body_end])
    }

    /// 在章节内按 "Cell N:" 标记切片收集批注
    ///
    /// 每条评语是当前标记到下一个标记（或章节末尾）之间的文本。
    fn collect_section_annotations(&self, section: &str, annotations: &mut Vec<CellAnnotation>) {
        let markers: Vec<(usize, usize, &str)> = self
            .patterns
            .cell_marker
            .captures_iter(section)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let index = caps.get(1)?;
                Some((whole.start(), whole.end(), index.as_str()))
            })
            .collect();

        for (i, (_, end, index_str)) in markers.iter().enumerate() {
            let comment_end = markers
                .get(i + 1)
                .map(|(next_start, _, _)| *next_start)
                .unwrap_or(section.len());
            let comment = section[*end..comment_end]
                .trim()
                .trim_start_matches(['-', '*', '•'])
                .trim();
            self.push_annotation(annotations, index_str, comment);
        }
    }

    /// 全文内联扫描：两种备选模式的命中全部合并
    fn collect_inline_annotations(&self, raw: &str, annotations: &mut Vec<CellAnnotation>) {
        for pattern in &self.patterns.cell_inline {
            for caps in pattern.captures_iter(raw) {
                let index_str = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let comment = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
                self.push_annotation(annotations, index_str, comment);
            }
        }
    }

    /// 合并一条批注：同一 cell_index 追加评语，否则新建条目
    ///
    /// 无法解析的序号记警告后丢弃，绝不中断整体解析。
    fn push_annotation(&self, annotations: &mut Vec<CellAnnotation>, index_str: &str, comment: &str) {
        if comment.is_empty() {
            return;
        }
        let cell_index: usize = match index_str.trim().parse() {
            Ok(i) => i,
            Err(_) => {
                warn!("无法解析单元格序号: {}", index_str);
                return;
            }
        };

        if let Some(existing) = annotations.iter_mut().find(|a| a.cell_index == cell_index) {
            existing.comments.push(comment.to_string());
        } else {
            annotations.push(CellAnnotation {
                cell_index,
                comments: vec![comment.to_string()],
            });
        }
    }

    /// 从反馈条目里回收单元格提及，生成兜底批注
    ///
    /// 专用章节和内联扫描都落空、但不足列表里出现了 "cell N"
    /// 字样时，把整条不足文本作为该单元格的评语。
    pub fn annotations_from_entries(&self, entries: &[String]) -> Vec<CellAnnotation> {
        let mut annotations = Vec::new();
        for entry in entries {
            if let Some(caps) = self.patterns.cell_in_text.captures(entry) {
                let index_str = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                self.push_annotation(&mut annotations, index_str, entry.trim());
            }
        }
        annotations
    }

    // ========== 临时章节表兜底 ==========

    /// 扫描标题形状的行构建临时章节表，把无序列表行归入最近的
    /// 前置标题，再按宽松关键词把各章节分桶到三类反馈
    fn adhoc_sections(&self, raw: &str) -> DetailedFeedback {
        let mut sections: Vec<(String, Vec<String>)> = Vec::new();

        for line in raw.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if self.patterns.heading_line.is_match(trimmed) {
                let name = trimmed
                    .split(':')
                    .next()
                    .unwrap_or(trimmed)
                    .trim_matches(['#', ' '])
                    .to_lowercase();
                sections.push((name, Vec::new()));
            } else if let Some((_, items)) = sections.last_mut() {
                if let Some(caps) = self.patterns.bullet_line.captures(trimmed) {
                    items.push(caps[1].trim().to_string());
                }
            }
        }

        let mut fallback = DetailedFeedback::default();
        for (name, items) in sections {
            if bucket_keywords(Category::Strengths)
                .iter()
                .any(|kw| name.contains(kw))
            {
                fallback.strengths.extend(items);
            } else if bucket_keywords(Category::Weaknesses)
                .iter()
                .any(|kw| name.contains(kw))
            {
                fallback.weaknesses.extend(items);
            } else if bucket_keywords(Category::Suggestions)
                .iter()
                .any(|kw| name.contains(kw))
            {
                fallback.suggestions.extend(items);
            }
        }

        fallback
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> ResponseParser {
        ResponseParser::default()
    }

    const FULL_REPLY: &str = "Good job overall.\n\n## Strengths\n- Clear code\n- Clear code\n\n## Weaknesses\n- Off by one\n\nGrade: 8\nConfidence: 0.95";

    #[test]
    fn test_full_reply_scenario() {
        let feedback = parser().parse(FULL_REPLY);
        assert_eq!(feedback.error_summary, "Good job overall.");
        assert_eq!(feedback.detailed_feedback.strengths, vec!["Clear code"]);
        assert_eq!(feedback.detailed_feedback.weaknesses, vec!["Off by one"]);
        assert_eq!(feedback.grade, 8.0);
        assert_eq!(feedback.confidence_score, 0.95);
        assert!(feedback.error_highlights.is_empty());
    }

    #[test]
    fn test_adversarial_input_gets_defaults() {
        let feedback = parser().parse("no numbers here at all, just words");
        assert_eq!(feedback.grade, 7.5);
        assert_eq!(feedback.confidence_score, 0.9);
        assert_eq!(
            feedback.detailed_feedback.strengths,
            vec![DEFAULT_STRENGTH.to_string()]
        );
        assert_eq!(
            feedback.detailed_feedback.suggestions,
            vec![DEFAULT_SUGGESTION.to_string()]
        );
    }

    #[test]
    fn test_empty_input_gets_default_summary() {
        let feedback = parser().parse("");
        assert_eq!(feedback.error_summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn test_grade_and_confidence_are_clamped() {
        let feedback = parser().parse("Grade: 95\nConfidence: 7");
        assert_eq!(feedback.grade, 10.0);
        assert_eq!(feedback.confidence_score, 1.0);
    }

    #[test]
    fn test_first_labeled_number_wins() {
        let feedback = parser().parse("Grade: 6\nlater someone wrote grade: 9");
        assert_eq!(feedback.grade, 6.0);
    }

    #[test]
    fn test_russian_labels() {
        let raw = "Решение в целом корректное, но есть мелкие ошибки.\n\nОценка: 6.5\nУверенность: 0.8";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.grade, 6.5);
        assert_eq!(feedback.confidence_score, 0.8);
    }

    #[test]
    fn test_summary_lookahead_skips_short_first_paragraph() {
        let raw = "OK.\n\nThe student solution is broadly correct with minor slips.\n\nGrade: 7";
        let feedback = parser().parse(raw);
        assert_eq!(
            feedback.error_summary,
            "The student solution is broadly correct with minor slips."
        );
    }

    #[test]
    fn test_summary_lookahead_does_not_grab_heading_paragraph() {
        // 首段短，但第二段是章节骨架：保留首段
        let feedback = parser().parse(FULL_REPLY);
        assert_eq!(feedback.error_summary, "Good job overall.");
    }

    #[test]
    fn test_summary_strips_leading_heading_line() {
        let raw = "## Summary\nThe solution is mostly correct with some minor errors.\n\n## Strengths\n- Good use of numpy arrays";
        let feedback = parser().parse(raw);
        assert_eq!(
            feedback.error_summary,
            "The solution is mostly correct with some minor errors."
        );
    }

    #[test]
    fn test_list_dedup_is_case_insensitive() {
        let raw = "Summary paragraph that is long enough here.\n\n## Strengths\n- Clear code\n- clear code\n-  Clear Code  \n\nGrade: 8";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.detailed_feedback.strengths, vec!["Clear code"]);
    }

    #[test]
    fn test_list_capped_at_max_len() {
        let raw = "Summary paragraph that is long enough here.\n\n## Strengths\n- item one\n- item two\n- item three\n- item four\n- item five\n- item six\n- item seven";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.detailed_feedback.strengths.len(), 5);
        assert_eq!(feedback.detailed_feedback.strengths[0], "item one");
    }

    #[test]
    fn test_short_entries_are_dropped() {
        let raw = "Summary paragraph that is long enough here.\n\n## Strengths\n- ok\n- Good numerical validation throughout";
        let feedback = parser().parse(raw);
        assert_eq!(
            feedback.detailed_feedback.strengths,
            vec!["Good numerical validation throughout"]
        );
    }

    #[test]
    fn test_inline_fallback_when_no_sections() {
        let raw = "Overall the work shows promise and careful reasoning.\n\nStrengths: solid matrix manipulation skills\nWeaknesses: missing dimension checks before multiply";
        let feedback = parser().parse(raw);
        assert_eq!(
            feedback.detailed_feedback.strengths,
            vec!["solid matrix manipulation skills"]
        );
        assert_eq!(
            feedback.detailed_feedback.weaknesses,
            vec!["missing dimension checks before multiply"]
        );
    }

    #[test]
    fn test_annotation_section_extraction() {
        let raw = "The solution has two problematic cells overall.\n\n## Cell Annotations\nCell 2: wrong matrix initialization\nCell 4: missing singularity check\n\n## Grade and Confidence\nGrade: 6";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.cell_annotations.len(), 2);
        assert_eq!(feedback.cell_annotations[0].cell_index, 2);
        assert_eq!(
            feedback.cell_annotations[0].comments,
            vec!["wrong matrix initialization"]
        );
        assert_eq!(feedback.cell_annotations[1].cell_index, 4);
    }

    #[test]
    fn test_annotation_merge_same_cell() {
        let raw = "Several issues were found in the same cell.\n\n## Cell Annotations\nCell 3: sign error in the exponent\nCell 3: result never validated\n\nGrade: 5";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.cell_annotations.len(), 1);
        assert_eq!(feedback.cell_annotations[0].cell_index, 3);
        assert_eq!(
            feedback.cell_annotations[0].comments,
            vec!["sign error in the exponent", "result never validated"]
        );
    }

    #[test]
    fn test_annotation_inline_fallback() {
        let raw = "A reasonable attempt with one weak spot worth noting.\n\nIn cell 5: the loop bound is off by one\n\nGrade: 7";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.cell_annotations.len(), 1);
        assert_eq!(feedback.cell_annotations[0].cell_index, 5);
        assert_eq!(
            feedback.cell_annotations[0].comments,
            vec!["the loop bound is off by one"]
        );
    }

    #[test]
    fn test_russian_annotation_section() {
        let raw = "Решение содержит несколько ошибок в вычислениях.\n\nАннотации к ячейкам\nЯчейка 1: отсутствует проверка размерности\nЯчейка 1: деление на ноль возможно\n\nОценка: 4";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.cell_annotations.len(), 1);
        assert_eq!(feedback.cell_annotations[0].cell_index, 1);
        assert_eq!(feedback.cell_annotations[0].comments.len(), 2);
    }

    #[test]
    fn test_adhoc_fallback_buckets_by_heading() {
        // "Problems Found" 不含标准的不足类标题词形，常规章节
        // 扫描认不出；兜底分桶的宽松关键词（problem）能认出它
        let raw = "Short.\n\nProblems Found:\n- indexing is inconsistent across cells\n\nKey Recommendation Points:\n- always validate matrix shapes first";
        let feedback = parser().parse(raw);
        assert_eq!(
            feedback.detailed_feedback.weaknesses,
            vec!["indexing is inconsistent across cells"]
        );
        assert_eq!(
            feedback.detailed_feedback.suggestions,
            vec!["always validate matrix shapes first"]
        );
    }

    #[test]
    fn test_weakness_default_from_error_summary() {
        let raw = "The submission contains a serious error in the integration step.";
        let feedback = parser().parse(raw);
        assert_eq!(
            feedback.detailed_feedback.weaknesses,
            vec!["The submission contains a serious error in the integration step."]
        );
    }

    #[test]
    fn test_no_weakness_default_without_error_keyword() {
        let raw = "A clean and well organized submission without issues worth noting.";
        let feedback = parser().parse(raw);
        assert!(feedback.detailed_feedback.weaknesses.is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let p = parser();
        let a = p.parse(FULL_REPLY);
        let b = p.parse(FULL_REPLY);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_custom_config_thresholds() {
        let p = ResponseParser::new(ParserConfig {
            min_entry_len: 2,
            max_list_len: 2,
            min_summary_len: 20,
        });
        let raw = "Summary paragraph that is long enough here.\n\n## Strengths\n- abc\n- defg\n- hijkl";
        let feedback = p.parse(raw);
        assert_eq!(feedback.detailed_feedback.strengths, vec!["abc", "defg"]);
    }

    #[test]
    fn test_annotations_recovered_from_weakness_entries() {
        let p = parser();
        let weaknesses = vec![
            "the loop in cell 4 never terminates".to_string(),
            "no dimension check anywhere".to_string(),
            "cell 4 also divides by zero".to_string(),
        ];
        let annotations = p.annotations_from_entries(&weaknesses);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].cell_index, 4);
        assert_eq!(annotations[0].comments.len(), 2);
    }

    #[test]
    fn test_unparseable_cell_index_is_skipped() {
        // 序号超出 usize 范围：该条丢弃，解析不中断
        let raw = "One broken marker should not break parsing at all.\n\n## Cell Annotations\nCell 99999999999999999999999: overflowing index\nCell 2: valid comment here\n\nGrade: 6";
        let feedback = parser().parse(raw);
        assert_eq!(feedback.cell_annotations.len(), 1);
        assert_eq!(feedback.cell_annotations[0].cell_index, 2);
    }
}
