// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：货币记录及其字段
/// - 服务（services）：字段提取、详情页解析和列表页爬取
pub mod models;
pub mod services;
