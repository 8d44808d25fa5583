// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将列表页中的相对链接解析为详情页的绝对URL
pub fn resolve_url(base_url: &str, path: &str) -> Result<Url, ParseError> {
    Url::parse(base_url)?.join(path)
}
