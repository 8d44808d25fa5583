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

use crate::config::settings::HttpSettings;
use crate::engines::traits::{FetchError, FetchResponse, Fetcher, Sleeper, TokioSleeper};
use crate::utils::retry_policy::{RetryCause, RetryPolicy};
use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

/// 单次请求尝试的结果
enum Attempt {
    /// 成功响应
    Done(FetchResponse),
    /// 可重试的失败
    Retry { cause: RetryCause, reason: String },
    /// 终止性失败
    Failed(FetchError),
}

/// HTTP会话
///
/// 基于reqwest实现，所有请求共享同一个连接池，并按重试策略处理暂时性失败
pub struct Session<S: Sleeper = TokioSleeper> {
    /// HTTP客户端（连接池）
    client: reqwest::Client,
    /// 重试策略
    policy: RetryPolicy,
    /// 退避等待
    sleeper: S,
}

impl Session<TokioSleeper> {
    /// 根据HTTP配置创建会话
    ///
    /// # 参数
    ///
    /// * `settings` - HTTP配置
    ///
    /// # 返回值
    ///
    /// * `Ok(Session)` - 新的会话
    /// * `Err(reqwest::Error)` - HTTP客户端构建失败
    pub fn new(settings: &HttpSettings) -> Result<Self, reqwest::Error> {
        Self::with_sleeper(
            RetryPolicy::from_settings(settings),
            &settings.user_agent,
            TokioSleeper,
        )
    }
}

impl<S: Sleeper> Session<S> {
    /// 使用自定义重试策略和等待实现创建会话
    pub fn with_sleeper(
        policy: RetryPolicy,
        user_agent: &str,
        sleeper: S,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            policy,
            sleeper,
        })
    }

    /// 当前使用的重试策略
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn attempt(&self, url: &Url) -> Attempt {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return classify(url, e),
        };

        let status = response.status();
        if self.policy.is_retryable_status(status.as_u16()) {
            return Attempt::Retry {
                cause: RetryCause::Status(status.as_u16()),
                reason: format!("HTTP status {}", status),
            };
        }
        if !status.is_success() {
            return Attempt::Failed(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        match response.text().await {
            Ok(content) => Attempt::Done(FetchResponse {
                url: final_url,
                status_code: status.as_u16(),
                content,
            }),
            Err(e) => classify(url, e),
        }
    }
}

/// 按失败类别区分可重试与终止性错误
fn classify(url: &Url, error: reqwest::Error) -> Attempt {
    if error.is_connect() {
        Attempt::Retry {
            cause: RetryCause::Connect,
            reason: error.to_string(),
        }
    } else if error.is_timeout() || error.is_body() || error.is_decode() {
        Attempt::Retry {
            cause: RetryCause::Read,
            reason: error.to_string(),
        }
    } else {
        Attempt::Failed(FetchError::Request {
            url: url.to_string(),
            source: error,
        })
    }
}

#[async_trait]
impl<S: Sleeper> Fetcher for Session<S> {
    /// 执行HTTP GET请求
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 2xx响应
    /// * `Err(FetchError)` - 不可重试的状态码、重试耗尽或其他终止性错误
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let mut budget = self.policy.budget();

        loop {
            let (cause, reason) = match self.attempt(&parsed).await {
                Attempt::Done(response) => {
                    debug!(url, status = response.status_code, "Request succeeded");
                    return Ok(response);
                }
                Attempt::Failed(error) => return Err(error),
                Attempt::Retry { cause, reason } => (cause, reason),
            };

            match budget.consume(cause) {
                Some(retry) => {
                    let delay = self.policy.calculate_backoff(retry);
                    warn!(
                        url,
                        retry,
                        delay_ms = delay.as_millis() as u64,
                        reason = %reason,
                        "Retrying request"
                    );
                    self.sleeper.sleep(delay).await;
                }
                None => {
                    return Err(FetchError::RetriesExhausted {
                        url: url.to_string(),
                        attempts: budget.retries() + 1,
                        reason,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
