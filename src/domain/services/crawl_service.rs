// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::LayoutSettings;
use crate::domain::models::currency::{CurrencyField, CurrencyRecord};
use crate::domain::services::detail_page_service::DetailPageService;
use crate::engines::traits::Fetcher;
use crate::utils::errors::ExtractionError;
use crate::utils::url_utils::resolve_url;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 列表页中的货币条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// 列表页上直接可得的字段（代码、符号）
    pub basic: CurrencyRecord,
    /// 详情页的绝对URL
    pub detail_url: Option<String>,
}

/// 爬取服务
///
/// 从货币列表页枚举所有货币，逐个抓取详情页并合并为完整记录
pub struct CrawlService<F: Fetcher> {
    /// HTTP会话
    fetcher: Arc<F>,
    /// 详情页解析服务
    detail_service: DetailPageService<F>,
    /// 页面结构配置
    layout: LayoutSettings,
}

impl<F: Fetcher> CrawlService<F> {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `fetcher` - HTTP会话，列表页与详情页共享
    /// * `layout` - 页面结构配置
    ///
    /// # 返回值
    ///
    /// 返回新的爬取服务实例
    pub fn new(fetcher: Arc<F>, layout: LayoutSettings) -> Self {
        let detail_service = DetailPageService::new(fetcher.clone(), layout.info_table.clone());
        Self {
            fetcher,
            detail_service,
            layout,
        }
    }

    /// 爬取列表页及所有详情页
    ///
    /// 条目按列表顺序逐个处理。列表页无法获取时返回空列表；
    /// 单个条目或详情页的失败只影响该条目。
    ///
    /// # 参数
    ///
    /// * `base_url` - 货币列表页URL
    ///
    /// # 返回值
    ///
    /// 按列表顺序排列的货币记录
    pub async fn crawl(&self, base_url: &str) -> Vec<CurrencyRecord> {
        info!("Requesting {}", base_url);
        let response = match self.fetcher.fetch(base_url).await {
            Ok(response) => response,
            Err(e) => {
                error!(url = base_url, error = %e, "Failed to fetch listing page");
                return Vec::new();
            }
        };

        info!("Parsing {}", base_url);
        let entries = match parse_listing(&response.content, base_url, &self.layout) {
            Ok(entries) => entries,
            Err(e) => {
                error!(url = base_url, error = %e, "Failed to parse listing page");
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(position, error = %e, "Skipping currency entry without basic info");
                    continue;
                }
            };

            let mut record = entry.basic;
            match entry.detail_url {
                Some(url) => record.merge(self.detail_service.parse_detail_page(&url).await),
                None => warn!(
                    position,
                    code = record.get(CurrencyField::Code).unwrap_or_default(),
                    "Currency entry has no detail page link"
                ),
            }
            records.push(record);
        }

        info!(count = records.len(), "Crawl finished");
        records
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|_| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
    })
}

/// 解析列表页
///
/// 第一个条目是表头，会被跳过。每个条目的解析结果单独返回，
/// 缺少代码或符号元素的条目以错误形式给出。
///
/// # 返回值
///
/// * `Ok(Vec<Result<ListingEntry, ExtractionError>>)` - 各条目的解析结果
/// * `Err(ExtractionError)` - 找不到列表容器或选择器无效
pub fn parse_listing(
    html: &str,
    base_url: &str,
    layout: &LayoutSettings,
) -> Result<Vec<Result<ListingEntry, ExtractionError>>, ExtractionError> {
    let document = Html::parse_document(html);
    let container_selector = parse_selector(&layout.listing_container)?;
    let item_selector = parse_selector(&layout.listing_item)?;
    let code_selector = parse_selector(&layout.code_selector)?;
    let symbol_selector = parse_selector(&layout.symbol_selector)?;
    let link_selector = parse_selector(&layout.link_selector)?;

    let container = document.select(&container_selector).next().ok_or_else(|| {
        ExtractionError::MissingElement {
            selector: layout.listing_container.clone(),
        }
    })?;

    let mut items = container.select(&item_selector);
    if let Some(header) = items.next() {
        let header_text = header.text().collect::<String>();
        debug!(header = header_text.trim(), "Skipping listing header");
    }

    let entries = items
        .map(|item| -> Result<ListingEntry, ExtractionError> {
            let mut basic = CurrencyRecord::new();
            for (field, selector, raw) in [
                (CurrencyField::Code, &code_selector, &layout.code_selector),
                (CurrencyField::Symbol, &symbol_selector, &layout.symbol_selector),
            ] {
                let text = select_text(item, selector, raw)?;
                if !text.is_empty() {
                    basic.insert(field, text);
                }
            }

            let detail_url = item
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| match resolve_url(base_url, href) {
                    Ok(url) => Some(url.to_string()),
                    Err(e) => {
                        warn!(href, error = %e, "Cannot resolve detail page link");
                        None
                    }
                });

            Ok(ListingEntry { basic, detail_url })
        })
        .collect();

    Ok(entries)
}

fn select_text(
    item: ElementRef<'_>,
    selector: &Selector,
    raw: &str,
) -> Result<String, ExtractionError> {
    item.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .ok_or_else(|| ExtractionError::MissingElement {
            selector: raw.to_string(),
        })
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
