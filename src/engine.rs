use chrono::{Datelike, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ReportError, Result};
use crate::models::{Purchase, Transaction};
use crate::ranking::{count_by, tally, Ranking};

/// Transaction seen in the month filter report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTransaction<'a> {
    pub transaction_id: &'a str,
    /// Serialized as `YYYY-MM-DD`
    pub transaction_date: NaiveDate,
}

/// Aggregation engine over a fully loaded set of transactions
///
/// The engine owns exactly one time zone. Every report that buckets by
/// calendar date converts timestamps through it, so monthly buckets are
/// consistent across all reports computed from the same engine.
///
/// All reports return raw values (exact decimals, integer counts, numeric
/// months); rendering happens in [`crate::report`].
pub struct ReportEngine<'a, Tz: TimeZone> {
    transactions: &'a [Transaction],
    zone: Tz,
}

impl<'a, Tz: TimeZone> ReportEngine<'a, Tz> {
    /// Create an engine over `transactions`, bucketing dates in `zone`
    pub fn new(transactions: &'a [Transaction], zone: Tz) -> Self {
        Self { transactions, zone }
    }

    /// Total spend per user, highest first
    pub fn spend_by_user(&self) -> Result<Ranking<&'a str, Decimal>> {
        tally(
            self.transactions,
            |&t: &&'a Transaction| t.user.as_str(),
            |t| {
                t.total()
                    .ok_or(ReportError::Overflow("computing a transaction total"))
            },
        )
    }

    /// Units sold per category across all transactions, highest first
    pub fn items_sold_by_category(&self) -> Result<Ranking<&'a str, i64>> {
        let purchases = self.transactions.iter().flat_map(|t| t.purchases.iter());
        tally(
            purchases,
            |&p: &&'a Purchase| p.category.as_str(),
            |p| Ok(p.count),
        )
    }

    /// Number of transactions per shipping method, highest first
    pub fn shipping_usage(&self) -> Result<Ranking<&'a str, u64>> {
        count_by(self.transactions, |&t: &&'a Transaction| t.shipping.as_str())
    }

    /// Transactions whose local date falls in `month` (1-12), in input order
    pub fn transactions_in_month(&self, month: u32) -> Result<Vec<MonthlyTransaction<'a>>> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidMonth(month));
        }

        let mut selected = Vec::new();
        for transaction in self.transactions {
            let date = self.local_date(transaction)?;
            if date.month() == month {
                selected.push(MonthlyTransaction {
                    transaction_id: &transaction.transaction_id,
                    transaction_date: date,
                });
            }
        }

        tracing::debug!(month, matched = selected.len(), "filtered transactions by month");
        Ok(selected)
    }

    /// Number of transactions per calendar month (1-12), highest first.
    /// Months without transactions are absent.
    pub fn transactions_per_month(&self) -> Result<Ranking<u32, u64>> {
        let months = self
            .transactions
            .iter()
            .map(|t| self.local_date(t).map(|date| date.month()))
            .collect::<Result<Vec<u32>>>()?;

        count_by(months, |month| *month)
    }

    /// Calendar date of a transaction in this engine's zone
    fn local_date(&self, transaction: &Transaction) -> Result<NaiveDate> {
        transaction
            .occurred_at()
            .map(|instant| instant.with_timezone(&self.zone).date_naive())
            .ok_or(ReportError::InvalidTimestamp(transaction.transaction_date))
    }
}
