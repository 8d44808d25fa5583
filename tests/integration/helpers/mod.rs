// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use currency_scraper::engines::reqwest_engine::Session;
use currency_scraper::engines::traits::Sleeper;
use currency_scraper::utils::retry_policy::RetryPolicy;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 记录退避时间而不实际等待
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// 使用默认重试策略和记录型等待的会话
pub fn test_session(sleeper: RecordingSleeper) -> Session<RecordingSleeper> {
    Session::with_sleeper(RetryPolicy::default(), "currency-scraper-test", sleeper)
        .expect("client should build")
}
