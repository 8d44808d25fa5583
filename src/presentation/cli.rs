// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use clap::Parser;

/// 命令行参数
#[derive(Parser, Debug, Clone)]
#[command(
    name = "currency-scraper",
    version,
    about = "Scrape currencies from https://www.xe.com/ and write a CSV file."
)]
pub struct Cli {
    /// CSV file name
    #[arg(short, long)]
    pub output: Option<String>,

    /// Log file name
    #[arg(short, long)]
    pub log: Option<String>,

    /// Currency listing page to start from
    #[arg(long)]
    pub base_url: Option<String>,

    /// Optional configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Cli {
    /// 命令行参数覆盖配置
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(output) = &self.output {
            settings.scraper.output = output.clone();
        }
        if let Some(log) = &self.log {
            settings.scraper.log_file = log.clone();
        }
        if let Some(base_url) = &self.base_url {
            settings.scraper.base_url = base_url.clone();
        }
    }
}
