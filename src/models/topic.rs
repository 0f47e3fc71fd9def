//! 数学主题分类
//!
//! 基于固定关键词表的主题打分：把所有单元格内容拼成小写文本，
//! 统计每个主题的关键词出现次数，取计数严格最高的主题。

use crate::models::notebook::Cell;

/// 数学主题枚举
///
/// 枚举顺序即平局裁决顺序：计数相同时，先声明的主题胜出，
/// 保证分类结果确定，不依赖任何集合的迭代顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// 线性代数
    LinearAlgebra,
    /// 微积分
    Calculus,
    /// 几何
    Geometry,
    /// 统计与概率
    Statistics,
    /// 数论
    NumberTheory,
    /// 一般数学（无关键词命中时的默认值）
    GeneralMathematics,
}

impl Topic {
    /// 固定声明顺序的全部主题
    pub const ALL: [Topic; 6] = [
        Topic::LinearAlgebra,
        Topic::Calculus,
        Topic::Geometry,
        Topic::Statistics,
        Topic::NumberTheory,
        Topic::GeneralMathematics,
    ];

    /// 获取主题键名（snake_case，用于提示词查表和序列化）
    pub fn key(self) -> &'static str {
        match self {
            Topic::LinearAlgebra => "linear_algebra",
            Topic::Calculus => "calculus",
            Topic::Geometry => "geometry",
            Topic::Statistics => "statistics",
            Topic::NumberTheory => "number_theory",
            Topic::GeneralMathematics => "general_mathematics",
        }
    }

    /// 获取主题的关键词表
    ///
    /// GeneralMathematics 没有关键词，永远不会靠计数胜出，只作兜底。
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::LinearAlgebra => &[
                "matrix",
                "vector",
                "eigenvalue",
                "eigenvector",
                "determinant",
                "linear system",
            ],
            Topic::Calculus => &[
                "derivative",
                "integral",
                "limit",
                "differential",
                "integration",
            ],
            Topic::Geometry => &[
                "ellipse",
                "circle",
                "parabola",
                "hyperbola",
                "conic section",
                "triangle",
            ],
            Topic::Statistics => &[
                "probability",
                "distribution",
                "mean",
                "variance",
                "regression",
                "hypothesis",
            ],
            Topic::NumberTheory => &[
                "prime",
                "divisor",
                "modulo",
                "congruence",
                "diophantine",
            ],
            Topic::GeneralMathematics => &[],
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 对单元格列表做主题分类
///
/// 永远不失败：所有主题计数为 0 时返回 GeneralMathematics。
pub fn classify(cells: &[Cell]) -> Topic {
    let blob = cells
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut best = Topic::GeneralMathematics;
    let mut best_count = 0usize;

    for topic in Topic::ALL {
        let count: usize = topic
            .keywords()
            .iter()
            .map(|kw| blob.matches(kw).count())
            .sum();
        if count > best_count {
            best = topic;
            best_count = count;
        }
    }

    best
}
