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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 默认的货币列表页
pub const DEFAULT_BASE_URL: &str = "https://www.xe.com/symbols/";

/// 应用程序配置设置
///
/// 包含抓取目标、HTTP重试策略以及页面结构选择器
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 抓取任务配置
    pub scraper: ScraperSettings,
    /// HTTP客户端配置
    pub http: HttpSettings,
    /// 页面结构配置
    pub layout: LayoutSettings,
}

/// 抓取任务配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 货币列表页URL
    pub base_url: String,
    /// CSV输出文件路径
    pub output: String,
    /// 日志文件路径
    pub log_file: String,
}

/// HTTP客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 总重试次数
    pub retries: u32,
    /// 连接失败重试次数
    pub connect_retries: u32,
    /// 读取失败重试次数
    pub read_retries: u32,
    /// 指数退避因子（秒）
    pub backoff_factor: f64,
    /// 最大退避时间（秒）
    pub backoff_max_secs: u64,
    /// 触发重试的HTTP状态码
    pub status_forcelist: Vec<u16>,
    /// 请求使用的User-Agent
    pub user_agent: String,
}

/// 页面结构配置设置
///
/// 外部页面的CSS选择器，页面改版时只需调整配置
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSettings {
    /// 列表页中货币列表容器
    pub listing_container: String,
    /// 列表容器中的条目
    pub listing_item: String,
    /// 条目中的货币代码元素
    pub code_selector: String,
    /// 条目中的货币符号元素
    pub symbol_selector: String,
    /// 条目中指向详情页的链接
    pub link_selector: String,
    /// 详情页中的信息表格
    pub info_table: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            listing_container: "section.Container__Content-sc-1skoo0z-1 > ul".to_string(),
            listing_item: "li".to_string(),
            code_selector: "div:nth-of-type(3)".to_string(),
            symbol_selector: "div:nth-of-type(4)".to_string(),
            link_selector: "a".to_string(),
            info_table: "table.currency__InfoTable-sc-4472af-2".to_string(),
        }
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、可选的配置文件以及环境变量
    ///
    /// # 参数
    ///
    /// * `config_file` - 命令行指定的配置文件路径
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let layout = LayoutSettings::default();
        let mut builder = Config::builder()
            // Scraper defaults
            .set_default("scraper.base_url", DEFAULT_BASE_URL)?
            .set_default("scraper.output", "scraped_currencies.csv")?
            .set_default("scraper.log_file", "main.log")?
            // Retry policy defaults
            .set_default("http.retries", 3)?
            .set_default("http.connect_retries", 3)?
            .set_default("http.read_retries", 3)?
            .set_default("http.backoff_factor", 0.3)?
            .set_default("http.backoff_max_secs", 120)?
            .set_default("http.status_forcelist", vec![500, 502, 504])?
            .set_default(
                "http.user_agent",
                concat!("currency-scraper/", env!("CARGO_PKG_VERSION")),
            )?
            // Page layout defaults
            .set_default("layout.listing_container", layout.listing_container)?
            .set_default("layout.listing_item", layout.listing_item)?
            .set_default("layout.code_selector", layout.code_selector)?
            .set_default("layout.symbol_selector", layout.symbol_selector)?
            .set_default("layout.link_selector", layout.link_selector)?
            .set_default("layout.info_table", layout.info_table)?
            .add_source(File::with_name("config/default").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CURRENCY_SCRAPER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("http.status_forcelist")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
