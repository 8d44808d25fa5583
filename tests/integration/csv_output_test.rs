// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use currency_scraper::domain::models::currency::{CurrencyField, CurrencyRecord};
use currency_scraper::infrastructure::csv_writer::{write_table, WriteOutcome};

fn sample_records() -> Vec<CurrencyRecord> {
    let mut lek = CurrencyRecord::new();
    lek.insert(CurrencyField::Currency, "Albanian Lek");
    lek.insert(CurrencyField::Code, "ALL");
    lek.insert(CurrencyField::Symbol, "Lek");
    lek.insert(CurrencyField::Coins, "Lek, 1 Lek, 5 Lek");
    lek.insert(CurrencyField::CentralBank, "Bank of Albania");
    lek.insert(CurrencyField::CentralBankUrl, "https://www.bankofalbania.org/");

    let mut quoted = CurrencyRecord::new();
    quoted.insert(CurrencyField::Code, "XQT");
    quoted.insert(CurrencyField::Users, "The \"Quoted\" Islands,\nSecond line");

    let mut dollar = CurrencyRecord::new();
    dollar.insert(CurrencyField::Code, "USD");
    dollar.insert(CurrencyField::Symbol, "$");
    dollar.insert(CurrencyField::BankNotes, "$1, $2, $5");

    vec![lek, quoted, dollar]
}

#[test]
fn test_written_table_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("currencies.csv");
    let records = sample_records();

    let outcome = write_table(&records, &path).unwrap();
    assert_eq!(outcome, WriteOutcome::Written { rows: 3 });

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let expected_headers: Vec<String> = CurrencyField::ALL
        .iter()
        .map(|field| field.as_str().to_string())
        .collect();
    assert_eq!(headers, expected_headers);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), records.len());

    for (row, record) in rows.iter().zip(&records) {
        for (index, field) in CurrencyField::ALL.iter().enumerate() {
            assert_eq!(row.get(index), Some(record.get(*field).unwrap_or("")));
        }
    }
}

#[test]
fn test_second_write_overwrites_instead_of_appending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("currencies.csv");
    let records = sample_records();

    write_table(&records, &path).unwrap();
    let first = std::fs::read(&path).unwrap();
    write_table(&records, &path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_shorter_write_truncates_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("currencies.csv");
    let records = sample_records();

    write_table(&records, &path).unwrap();
    write_table(&records[..1], &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(reader.records().count(), 1);
}
