// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：按行标题从信息表格中提取字段
/// - 详情页服务（detail_page_service）：按字段映射规则解析单个货币详情页
/// - 爬取服务（crawl_service）：枚举列表页并合并基础信息与详情信息
pub mod crawl_service;
pub mod detail_page_service;
pub mod extraction_service;
