// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::currency::CurrencyField;
use crate::utils::errors::ExtractionError;
use scraper::{ElementRef, Selector};
use std::fmt;

/// 字段值后处理函数
pub type PostProcess = fn(&str) -> String;

/// 详情页中的信息表格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTable {
    /// 第一个表格，仅包含名称
    Identity,
    /// 第二个表格，包含其余字段
    Details,
}

impl InfoTable {
    /// 表格在详情页中的位置
    pub fn index(self) -> usize {
        match self {
            InfoTable::Identity => 0,
            InfoTable::Details => 1,
        }
    }
}

/// 字段映射规则
///
/// 描述如何根据行标题从信息表格中取出一个字段
#[derive(Clone, Copy)]
pub struct FieldRule {
    /// 行标题文本
    pub label: &'static str,
    /// 目标字段
    pub field: CurrencyField,
    /// 值所在的元素
    pub tag: &'static str,
    /// 可选的后处理
    pub post_process: Option<PostProcess>,
    /// 同一行中链接地址对应的字段
    pub link_field: Option<CurrencyField>,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("label", &self.label)
            .field("field", &self.field)
            .field("tag", &self.tag)
            .field("post_process", &self.post_process.is_some())
            .field("link_field", &self.link_field)
            .finish()
    }
}

impl FieldRule {
    /// "Name" 位于第一个表格，其余字段位于第二个表格
    pub fn table(&self) -> InfoTable {
        if self.label == "Name" {
            InfoTable::Identity
        } else {
            InfoTable::Details
        }
    }
}

/// 详情页字段映射规则，按提取顺序排列
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        label: "Name",
        field: CurrencyField::Currency,
        tag: "td",
        post_process: None,
        link_field: None,
    },
    FieldRule {
        label: "Coins",
        field: CurrencyField::Coins,
        tag: "td",
        post_process: Some(normalize_denominations),
        link_field: None,
    },
    FieldRule {
        label: "Bank notes",
        field: CurrencyField::BankNotes,
        tag: "td",
        post_process: Some(normalize_denominations),
        link_field: None,
    },
    FieldRule {
        label: "Central bank",
        field: CurrencyField::CentralBank,
        tag: "td",
        post_process: None,
        link_field: Some(CurrencyField::CentralBankUrl),
    },
    FieldRule {
        label: "Users",
        field: CurrencyField::Users,
        tag: "span",
        post_process: None,
        link_field: None,
    },
];

const FREQUENTLY_USED: &str = "Freq used: ";
const RARELY_USED: &str = "Rarely used: ";

/// 合并硬币/纸币面额
///
/// 去掉 "Freq used: " 前缀，并把 "Rarely used: " 之后的面额以逗号拼接到末尾
pub fn normalize_denominations(text: &str) -> String {
    text.replace(FREQUENTLY_USED, "")
        .split(RARELY_USED)
        .map(|part| part.trim().trim_matches(',').trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|_| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 字段提取器
///
/// 在以 `<th>` 为行标题的表格中定位行并读取值
pub struct FieldExtractor;

impl FieldExtractor {
    /// 查找行标题等于 `label` 的行
    ///
    /// # 参数
    ///
    /// * `table` - 信息表格
    /// * `label` - 行标题文本（忽略首尾空白）
    ///
    /// # 返回值
    ///
    /// * `Ok(ElementRef)` - 行标题所在的行
    /// * `Err(ExtractionError::RowNotFound)` - 表格中没有该行
    pub fn find_row<'a>(
        table: ElementRef<'a>,
        label: &str,
    ) -> Result<ElementRef<'a>, ExtractionError> {
        let header = parse_selector("th")?;

        table
            .select(&header)
            .find(|th| element_text(*th) == label)
            .and_then(|th| th.parent())
            .and_then(ElementRef::wrap)
            .ok_or_else(|| ExtractionError::RowNotFound {
                label: label.to_string(),
            })
    }

    /// 提取字段值
    ///
    /// 取行内第一个匹配 `tag` 的元素文本，去除首尾空白后应用后处理。
    /// 空值与缺失的行同样视为字段缺失。
    pub fn extract_field(
        table: ElementRef<'_>,
        label: &str,
        tag: &str,
        post_process: Option<PostProcess>,
    ) -> Result<String, ExtractionError> {
        let row = Self::find_row(table, label)?;
        let selector = parse_selector(tag)?;

        let cell = row
            .select(&selector)
            .next()
            .ok_or_else(|| ExtractionError::TagNotFound {
                label: label.to_string(),
                tag: tag.to_string(),
            })?;

        let text = element_text(cell);
        let value = match post_process {
            Some(process) => process(&text),
            None => text,
        };

        if value.is_empty() {
            return Err(ExtractionError::EmptyValue {
                label: label.to_string(),
            });
        }

        Ok(value)
    }

    /// 提取行内第一个链接的地址
    pub fn extract_link(table: ElementRef<'_>, label: &str) -> Result<String, ExtractionError> {
        let row = Self::find_row(table, label)?;
        let anchor = parse_selector("a[href]")?;

        row.select(&anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .ok_or_else(|| ExtractionError::AttributeNotFound {
                label: label.to_string(),
                attr: "href".to_string(),
            })
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
