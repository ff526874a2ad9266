pub mod cli;
pub mod engine;
pub mod error;
pub mod format;
pub mod models;
pub mod output;
pub mod ranking;
pub mod report;

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use chrono::TimeZone;
use rust_decimal::Decimal;

use engine::ReportEngine;
use error::Result;
use models::Transaction;
use output::OutputFormat;
use report::{Report, ReportKind};

/// What to compute and how to write it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub kinds: Vec<ReportKind>,
    /// Month (1-12) for the transactions-in-month report
    pub target_month: u32,
    pub format: OutputFormat,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            kinds: ReportKind::ALL.to_vec(),
            target_month: 1,
            format: OutputFormat::Json,
        }
    }
}

/// Load transactions from newline-delimited JSON
///
/// Every line is parsed on its own. Lines that are not a valid transaction,
/// or whose date cannot be represented, are skipped with a warning; only
/// I/O failures abort the load.
pub fn load_transactions<R: BufRead>(mut reader: R) -> Result<Vec<Transaction>> {
    let mut transactions = Vec::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        // Invalid UTF-8 surfaces here as a parse error, not an I/O error
        let transaction: Transaction = match serde_json::from_slice(line) {
            Ok(transaction) => transaction,
            Err(e) => {
                tracing::warn!(line = line_number, error = %e, "skipping malformed transaction record");
                skipped += 1;
                continue;
            }
        };

        if transaction.occurred_at().is_none() {
            tracing::warn!(
                line = line_number,
                transaction_date = transaction.transaction_date,
                "skipping transaction with out-of-range date"
            );
            skipped += 1;
            continue;
        }

        warn_on_suspicious_values(&transaction, line_number);
        transactions.push(transaction);
    }

    tracing::info!(loaded = transactions.len(), skipped, "loaded transactions");
    Ok(transactions)
}

/// Load transactions from a newline-delimited JSON file
pub fn load_transactions_from_path(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("failed to open '{}': {}", path.display(), e),
        )
    })?;
    load_transactions(BufReader::new(file))
}

/// Negative quantities or prices are kept but reported
fn warn_on_suspicious_values(transaction: &Transaction, line_number: usize) {
    for purchase in &transaction.purchases {
        if purchase.count < 0 || purchase.price < Decimal::ZERO {
            tracing::warn!(
                line = line_number,
                transaction_id = %transaction.transaction_id,
                purchase_id = %purchase.purchase_id,
                count = purchase.count,
                price = %purchase.price,
                "purchase has a negative count or price"
            );
        }
    }
}

/// Load transactions from a reader, compute the requested reports, and write them
pub fn generate_reports<R, W, Tz>(reader: R, writer: W, zone: Tz, options: &ReportOptions) -> Result<()>
where
    R: BufRead,
    W: Write,
    Tz: TimeZone,
{
    let transactions = load_transactions(reader)?;
    let engine = ReportEngine::new(&transactions, zone);

    let reports = build_reports(&engine, options)?;
    output::write_reports(&reports, options.format, writer)
}

/// Compute the reports named in `options`, in the requested order
pub fn build_reports<'a, Tz: TimeZone>(
    engine: &ReportEngine<'a, Tz>,
    options: &ReportOptions,
) -> Result<Vec<Report<'a>>> {
    options
        .kinds
        .iter()
        .map(|kind| Report::build(engine, *kind, options.target_month))
        .collect()
}
