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

use crate::domain::services::crawl_service::CrawlService;
use crate::engines::traits::Fetcher;
use crate::infrastructure::csv_writer::{CsvWriter, WriteOutcome};
use crate::utils::errors::OutputError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeUseCaseError {
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// 一次完整抓取的结果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeReport {
    /// 抓取到的货币数量
    pub entities: usize,
    /// 是否写入了输出文件
    pub written: bool,
    /// 输出文件路径
    pub output: PathBuf,
}

/// 货币抓取用例
///
/// 爬取全部货币后一次性写入CSV
pub struct ScrapeCurrenciesUseCase<F: Fetcher> {
    crawler: CrawlService<F>,
    writer: CsvWriter,
    base_url: String,
}

impl<F: Fetcher> ScrapeCurrenciesUseCase<F> {
    pub fn new(crawler: CrawlService<F>, writer: CsvWriter, base_url: impl Into<String>) -> Self {
        Self {
            crawler,
            writer,
            base_url: base_url.into(),
        }
    }

    /// 执行抓取并写入结果
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeReport)` - 抓取摘要
    /// * `Err(ScrapeUseCaseError)` - 输出文件写入失败
    pub async fn execute(&self) -> Result<ScrapeReport, ScrapeUseCaseError> {
        let records = self.crawler.crawl(&self.base_url).await;
        let outcome = self.writer.write(&records)?;

        Ok(ScrapeReport {
            entities: records.len(),
            written: matches!(outcome, WriteOutcome::Written { .. }),
            output: self.writer.path().to_path_buf(),
        })
    }
}
