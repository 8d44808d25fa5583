// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::currency::CurrencyRecord;
use crate::domain::services::extraction_service::{FieldExtractor, FIELD_RULES};
use crate::engines::traits::Fetcher;
use crate::utils::errors::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 详情页至少包含的信息表格数量
const REQUIRED_TABLES: usize = 2;

/// 详情页解析服务
///
/// 抓取单个货币的详情页并按字段映射规则生成记录
pub struct DetailPageService<F: Fetcher> {
    /// HTTP会话
    fetcher: Arc<F>,
    /// 信息表格选择器
    info_table: String,
}

impl<F: Fetcher> DetailPageService<F> {
    /// 创建新的详情页解析服务
    ///
    /// # 参数
    ///
    /// * `fetcher` - HTTP会话
    /// * `info_table` - 信息表格的CSS选择器
    pub fn new(fetcher: Arc<F>, info_table: impl Into<String>) -> Self {
        Self {
            fetcher,
            info_table: info_table.into(),
        }
    }

    /// 解析详情页
    ///
    /// 抓取或解析失败时记录日志并返回空记录，不会中断整个爬取过程
    ///
    /// # 参数
    ///
    /// * `url` - 详情页URL
    ///
    /// # 返回值
    ///
    /// 详情页中找到的字段
    pub async fn parse_detail_page(&self, url: &str) -> CurrencyRecord {
        info!("Requesting {}", url);
        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                error!(url, error = %e, "Failed to fetch detail page");
                return CurrencyRecord::new();
            }
        };

        info!("Parsing {}", url);
        match parse_detail_document(&response.content, &self.info_table, url) {
            Ok(record) => record,
            Err(e) => {
                error!(url, error = %e, "Failed to parse detail page");
                CurrencyRecord::new()
            }
        }
    }
}

/// 从详情页HTML中提取字段
///
/// 单个字段缺失只记录日志；信息表格不足时返回错误
pub fn parse_detail_document(
    html: &str,
    info_table: &str,
    url: &str,
) -> Result<CurrencyRecord, ExtractionError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(info_table).map_err(|_| ExtractionError::InvalidSelector {
        selector: info_table.to_string(),
    })?;

    let tables: Vec<ElementRef<'_>> = document.select(&selector).collect();
    if tables.len() < REQUIRED_TABLES {
        return Err(ExtractionError::MissingTables {
            expected: REQUIRED_TABLES,
            found: tables.len(),
        });
    }

    let mut record = CurrencyRecord::new();
    for rule in FIELD_RULES {
        let table = tables[rule.table().index()];

        let value =
            match FieldExtractor::extract_field(table, rule.label, rule.tag, rule.post_process) {
                Ok(value) => value,
                Err(e) => {
                    warn!(url, label = rule.label, error = %e, "Field not found");
                    continue;
                }
            };

        if let Some(link_field) = rule.link_field {
            match FieldExtractor::extract_link(table, rule.label) {
                Ok(href) => {
                    record.insert(link_field, href);
                }
                Err(e) => warn!(url, label = rule.label, error = %e, "Link not found"),
            }
        }

        record.insert(rule.field, value);
    }

    Ok(record)
}
