//! 模型回复解析层
//!
//! 把自由文本的分析回复规整成结构化反馈。入口是
//! [`ResponseParser`]，正则与关键词表集中在 patterns 子模块。

pub mod normalizer;
pub(crate) mod patterns;

pub use normalizer::{ParserConfig, ResponseParser};
