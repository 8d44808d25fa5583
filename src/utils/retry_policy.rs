// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::HttpSettings;
use std::time::Duration;

/// 触发重试的失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCause {
    /// 建立连接失败
    Connect,
    /// 读取失败（超时、响应体读取或解码失败）
    Read,
    /// 命中可重试状态码
    Status(u16),
}

/// 重试策略配置
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 总重试次数
    pub total: u32,
    /// 连接失败重试次数
    pub connect: u32,
    /// 读取失败重试次数
    pub read: u32,
    /// 退避因子，第n次重试前等待 factor * 2^(n-1) 秒
    pub backoff_factor: f64,
    /// 最大退避时间
    pub max_backoff: Duration,
    /// 可重试的HTTP状态码
    pub status_forcelist: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            total: 3,
            connect: 3,
            read: 3,
            backoff_factor: 0.3,
            max_backoff: Duration::from_secs(120),
            status_forcelist: vec![500, 502, 504],
        }
    }
}

impl RetryPolicy {
    /// 根据HTTP配置创建重试策略
    pub fn from_settings(settings: &HttpSettings) -> Self {
        Self {
            total: settings.retries,
            connect: settings.connect_retries,
            read: settings.read_retries,
            backoff_factor: settings.backoff_factor.max(0.0),
            max_backoff: Duration::from_secs(settings.backoff_max_secs),
            status_forcelist: settings.status_forcelist.clone(),
        }
    }

    /// 计算第 `attempt` 次重试前的退避时间（从1开始计数）
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let backoff_secs = self.backoff_factor * 2f64.powi(attempt as i32 - 1);
        let capped_backoff = backoff_secs.min(self.max_backoff.as_secs_f64());

        Duration::from_nanos((capped_backoff.max(0.0) * 1e9).round() as u64)
    }

    /// 状态码是否在可重试列表中
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.status_forcelist.contains(&status)
    }

    /// 为一次请求创建新的重试预算
    pub fn budget(&self) -> RetryBudget {
        RetryBudget {
            total: i64::from(self.total),
            connect: i64::from(self.connect),
            read: i64::from(self.read),
            retries: 0,
        }
    }
}

/// 单次请求剩余的重试预算
///
/// 每次重试都会消耗总次数以及对应类别的次数，任一计数为负即视为耗尽。
#[derive(Debug, Clone)]
pub struct RetryBudget {
    total: i64,
    connect: i64,
    read: i64,
    retries: u32,
}

impl RetryBudget {
    /// 消耗一次重试
    ///
    /// # 返回值
    ///
    /// * `Some(n)` - 允许重试，`n` 为本次重试序号（从1开始）
    /// * `None` - 预算已耗尽
    pub fn consume(&mut self, cause: RetryCause) -> Option<u32> {
        self.total -= 1;
        match cause {
            RetryCause::Connect => self.connect -= 1,
            RetryCause::Read => self.read -= 1,
            RetryCause::Status(_) => {}
        }

        if self.total < 0 || self.connect < 0 || self.read < 0 {
            return None;
        }

        self.retries += 1;
        Some(self.retries)
    }

    /// 已执行的重试次数
    pub fn retries(&self) -> u32 {
        self.retries
    }
}
