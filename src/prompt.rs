//! 提示词构建模块
//!
//! 纯字符串变换：根据主题选取指令片段，把参考答案和学生答案
//! 原样嵌入围栏代码块，并附加固定的输出格式约定。没有失败路径。

use tracing::info;

use crate::models::Topic;

/// 主题 → 指令片段的静态查表
///
/// 枚举是封闭的，理论上不会缺键；查不到时兜底用 general_mathematics 片段。
static TOPIC_CLAUSES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "linear_algebra" => "Focus on matrix operations, vector spaces, eigenvalues/eigenvectors, and linear transformations.",
    "calculus" => "Focus on derivative calculations, integration techniques, limit evaluations, and applications.",
    "geometry" => "Focus on conic sections, coordinate geometry, transformations, and geometric constructions.",
    "statistics" => "Focus on data analysis, probability calculations, hypothesis testing, and statistical modeling.",
    "number_theory" => "Focus on prime numbers, divisibility, modular arithmetic, and algebraic structures.",
    "general_mathematics" => "Focus on correctness of calculations, mathematical reasoning, and implementation of algorithms.",
};

const GENERAL_CLAUSE: &str =
    "Focus on correctness of calculations, mathematical reasoning, and implementation of algorithms.";

/// 截断标记，附加在被截断的内容末尾
const TRUNCATION_MARKER: &str = "... [truncated]";

/// 提示词构建器
pub struct PromptBuilder {
    /// 单个笔记本内容嵌入提示词的字符数上限
    max_chars: usize,
}

impl PromptBuilder {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// 构建完整的分析提示词
    ///
    /// 超长内容会被截断并记录日志（截断是有损的静默操作，
    /// 只通过日志通道告知，不写进返回文本以外的任何地方）。
    pub fn build(&self, topic: Topic, reference_text: &str, student_text: &str) -> String {
        let clause = TOPIC_CLAUSES.get(topic.key()).copied().unwrap_or(GENERAL_CLAUSE);

        let reference_text = self.truncate(reference_text, "reference");
        let student_text = self.truncate(student_text, "student");

        format!(
            r#"As an expert mathematician specializing in {topic}, analyze these mathematics solutions.
{clause}

# Reference Solution:
```python
{reference_text}
```

# Student Solution:
```python
{student_text}
```

Please analyze the student's solution against the reference solution and provide a detailed analysis with the following structure:

## Summary
[Provide a concise summary of the overall quality of the solution and major issues]

## Strengths
- [List specific strengths, with each point starting with a dash]
- [Be detailed and specific]

## Areas for Improvement
- [List specific weaknesses or errors, with each point starting with a dash]
- [Be detailed and specific]

## Recommendations
- [List specific suggestions for improvement, with each point starting with a dash]
- [Be practical and actionable]

## Cell Annotations
Cell X: [Specific feedback for cell X, including errors and suggestions]
Cell Y: [Specific feedback for cell Y, including errors and suggestions]
[Add annotations for all cells that need feedback]

## Grade and Confidence
Grade: [Assign a grade from 0-10]
Confidence: [Specify your confidence level from 0-1]

IMPORTANT: Provide specific and detailed cell annotations for any problematic cells, as this is crucial for the student's understanding. Ensure your feedback is constructive and helpful."#,
            topic = topic.key(),
            clause = clause,
            reference_text = reference_text,
            student_text = student_text,
        )
    }

    /// 按字符数截断超长内容
    fn truncate(&self, text: &str, which: &str) -> String {
        let char_count = text.chars().count();
        if char_count <= self.max_chars {
            return text.to_string();
        }

        info!(
            "{} 笔记本内容过长 ({} 字符)，截断至 {} 字符",
            which, char_count, self.max_chars
        );

        let truncated: String = text.chars().take(self.max_chars).collect();
        format!("{}{}", truncated, TRUNCATION_MARKER)
    }
}
