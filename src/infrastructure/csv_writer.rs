// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::currency::{CurrencyField, CurrencyRecord};
use crate::utils::errors::OutputError;
use std::path::{Path, PathBuf};
use tracing::info;

/// 写入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// 已写入文件，包含数据行数
    Written { rows: usize },
    /// 没有数据，未触碰目标文件
    Skipped,
}

/// 将记录写入CSV文件
///
/// 表头按固定列顺序输出，记录中缺失的字段输出为空单元格。
/// 目标文件已存在时会被覆盖；记录为空时不创建也不修改文件。
pub fn write_table(
    records: &[CurrencyRecord],
    destination: &Path,
) -> Result<WriteOutcome, OutputError> {
    if records.is_empty() {
        info!("No data to write to CSV.");
        return Ok(WriteOutcome::Skipped);
    }

    let mut writer = csv::Writer::from_path(destination)?;
    writer.write_record(CurrencyField::ALL.iter().map(|field| field.as_str()))?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;

    info!("CSV file '{}' created successfully.", destination.display());
    Ok(WriteOutcome::Written {
        rows: records.len(),
    })
}

/// CSV 输出
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, records: &[CurrencyRecord]) -> Result<WriteOutcome, OutputError> {
        write_table(records, &self.path)
    }
}
