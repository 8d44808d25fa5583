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

use clap::Parser;
use currency_scraper::application::use_cases::scrape_currencies::ScrapeCurrenciesUseCase;
use currency_scraper::config::settings::Settings;
use currency_scraper::domain::services::crawl_service::CrawlService;
use currency_scraper::engines::reqwest_engine::Session;
use currency_scraper::infrastructure::csv_writer::CsvWriter;
use currency_scraper::presentation::cli::Cli;
use currency_scraper::utils::telemetry;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责加载配置、初始化日志并执行一次完整抓取
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Parse command line and load configuration
    let cli = Cli::parse();
    let mut settings = Settings::new(cli.config.as_deref())?;
    cli.apply(&mut settings);

    // 2. Initialize logging
    telemetry::init_telemetry(Some(Path::new(&settings.scraper.log_file)))?;
    info!(base_url = %settings.scraper.base_url, "Starting currency-scraper...");

    // 3. Build the HTTP session shared by every request
    let session = Arc::new(Session::new(&settings.http)?);
    let crawler = CrawlService::new(session, settings.layout.clone());
    let writer = CsvWriter::new(&settings.scraper.output);

    // 4. Crawl and write once
    let use_case = ScrapeCurrenciesUseCase::new(crawler, writer, settings.scraper.base_url.clone());
    let report = use_case.execute().await.inspect_err(|e| {
        error!(error = %e, "Failed to write results");
    })?;

    info!(
        entities = report.entities,
        written = report.written,
        output = %report.output.display(),
        "Scrape finished"
    );

    Ok(())
}
