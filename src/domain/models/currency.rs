// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// 货币记录字段
///
/// 变体顺序即CSV输出的列顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyField {
    Currency,
    Code,
    Symbol,
    Coins,
    BankNotes,
    CentralBank,
    CentralBankUrl,
    Users,
}

impl CurrencyField {
    /// 固定的输出列顺序
    pub const ALL: [CurrencyField; 8] = [
        CurrencyField::Currency,
        CurrencyField::Code,
        CurrencyField::Symbol,
        CurrencyField::Coins,
        CurrencyField::BankNotes,
        CurrencyField::CentralBank,
        CurrencyField::CentralBankUrl,
        CurrencyField::Users,
    ];

    /// 字段对应的列名
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyField::Currency => "currency",
            CurrencyField::Code => "code",
            CurrencyField::Symbol => "symbol",
            CurrencyField::Coins => "coins",
            CurrencyField::BankNotes => "bank_notes",
            CurrencyField::CentralBank => "central_bank",
            CurrencyField::CentralBankUrl => "central_bank_url",
            CurrencyField::Users => "users",
        }
    }
}

impl fmt::Display for CurrencyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 货币记录
///
/// 一个货币实体的字段集合。缺失的字段不会出现在记录中（而不是空字符串）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CurrencyRecord {
    fields: BTreeMap<CurrencyField, String>,
}

impl CurrencyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置字段值，返回旧值
    pub fn insert(&mut self, field: CurrencyField, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field, value.into())
    }

    pub fn get(&self, field: CurrencyField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CurrencyField) -> bool {
        self.fields.contains_key(&field)
    }

    /// 合并另一条记录，冲突时以 `other` 为准
    pub fn merge(&mut self, other: CurrencyRecord) {
        self.fields.extend(other.fields);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 按固定列顺序生成一行数据，缺失字段为空字符串
    pub fn to_row(&self) -> Vec<&str> {
        CurrencyField::ALL
            .iter()
            .map(|field| self.get(*field).unwrap_or(""))
            .collect()
    }
}

impl FromIterator<(CurrencyField, String)> for CurrencyRecord {
    fn from_iter<T: IntoIterator<Item = (CurrencyField, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
