// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 字段提取错误类型
///
/// 表示页面结构中缺少预期内容，调用方将其视为“字段缺失”而非致命错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("未找到标签为 '{label}' 的行")]
    RowNotFound { label: String },

    #[error("标签 '{label}' 所在行中没有 <{tag}> 元素")]
    TagNotFound { label: String, tag: String },

    #[error("标签 '{label}' 的值为空")]
    EmptyValue { label: String },

    #[error("标签 '{label}' 所在行中没有 {attr} 属性")]
    AttributeNotFound { label: String, attr: String },

    #[error("无效的选择器: {selector}")]
    InvalidSelector { selector: String },

    #[error("预期至少 {expected} 个信息表格，实际找到 {found} 个")]
    MissingTables { expected: usize, found: usize },

    #[error("未找到元素: {selector}")]
    MissingElement { selector: String },
}

/// 输出错误类型
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV错误: {0}")]
    Csv(#[from] csv::Error),
}
