// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含一次完整抓取流程的用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含货币记录模型以及提取、解析和爬取服务
pub mod domain;

/// 引擎模块
///
/// 带重试策略的HTTP抓取
pub mod engines;

/// 基础设施模块
///
/// 提供CSV文件输出
pub mod infrastructure;

/// 表示层模块
///
/// 命令行入口参数
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
