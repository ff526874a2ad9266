use chrono::TimeZone;
use clap::ValueEnum;
use serde::{Serialize, Serializer};

use crate::engine::{MonthlyTransaction, ReportEngine};
use crate::error::Result;
use crate::format::{format_currency, month_name};
use crate::ranking::Ranking;

/// The reports this crate can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ReportKind {
    TopSpenders,
    BestSellingCategory,
    ShippingUsage,
    TransactionsInMonth,
    BusiestMonth,
}

impl ReportKind {
    /// Every report, in canonical output order
    pub const ALL: [ReportKind; 5] = [
        ReportKind::TopSpenders,
        ReportKind::BestSellingCategory,
        ReportKind::ShippingUsage,
        ReportKind::TransactionsInMonth,
        ReportKind::BusiestMonth,
    ];

    /// Stable name used as a JSON key and CSV column value
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::TopSpenders => "top_spenders",
            ReportKind::BestSellingCategory => "best_selling_category",
            ReportKind::ShippingUsage => "shipping_usage",
            ReportKind::TransactionsInMonth => "transactions_in_month",
            ReportKind::BusiestMonth => "busiest_month",
        }
    }

    /// Column headers for single-report CSV output
    pub fn columns(self) -> [&'static str; 2] {
        match self {
            ReportKind::TopSpenders => ["user", "total"],
            ReportKind::BestSellingCategory => ["category", "items_sold"],
            ReportKind::ShippingUsage => ["shipping", "transactions"],
            ReportKind::TransactionsInMonth => ["transaction_id", "transaction_date"],
            ReportKind::BusiestMonth => ["month", "transactions"],
        }
    }
}

/// A rendered report, ready for serialization
#[derive(Debug, Clone, PartialEq)]
pub enum Report<'a> {
    TopSpenders(Ranking<&'a str, String>),
    BestSellingCategory(Ranking<&'a str, i64>),
    ShippingUsage(Ranking<&'a str, u64>),
    TransactionsInMonth(Vec<MonthlyTransaction<'a>>),
    BusiestMonth(Ranking<&'static str, u64>),
}

impl<'a> Report<'a> {
    /// Compute one report and render it
    ///
    /// `target_month` is only read by [`ReportKind::TransactionsInMonth`].
    pub fn build<Tz: TimeZone>(
        engine: &ReportEngine<'a, Tz>,
        kind: ReportKind,
        target_month: u32,
    ) -> Result<Self> {
        tracing::debug!(report = kind.name(), "computing report");

        let report = match kind {
            ReportKind::TopSpenders => {
                Report::TopSpenders(engine.spend_by_user()?.map_values(format_currency))
            }
            ReportKind::BestSellingCategory => {
                Report::BestSellingCategory(engine.items_sold_by_category()?)
            }
            ReportKind::ShippingUsage => Report::ShippingUsage(engine.shipping_usage()?),
            ReportKind::TransactionsInMonth => {
                Report::TransactionsInMonth(engine.transactions_in_month(target_month)?)
            }
            ReportKind::BusiestMonth => Report::BusiestMonth(
                engine
                    .transactions_per_month()?
                    .map_keys(|month| month_name(month).unwrap_or("UNKNOWN")),
            ),
        };

        Ok(report)
    }

    pub fn kind(&self) -> ReportKind {
        match self {
            Report::TopSpenders(_) => ReportKind::TopSpenders,
            Report::BestSellingCategory(_) => ReportKind::BestSellingCategory,
            Report::ShippingUsage(_) => ReportKind::ShippingUsage,
            Report::TransactionsInMonth(_) => ReportKind::TransactionsInMonth,
            Report::BusiestMonth(_) => ReportKind::BusiestMonth,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Report::TopSpenders(r) => r.len(),
            Report::BestSellingCategory(r) => r.len(),
            Report::ShippingUsage(r) => r.len(),
            Report::TransactionsInMonth(rows) => rows.len(),
            Report::BusiestMonth(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten to `(key, value)` text pairs in output order
    pub fn rows(&self) -> Vec<(String, String)> {
        fn text<K: ToString, V: ToString>(ranking: &Ranking<K, V>) -> Vec<(String, String)> {
            ranking
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }

        match self {
            Report::TopSpenders(r) => text(r),
            Report::BestSellingCategory(r) => text(r),
            Report::ShippingUsage(r) => text(r),
            Report::TransactionsInMonth(rows) => rows
                .iter()
                .map(|row| {
                    (
                        row.transaction_id.to_string(),
                        row.transaction_date.to_string(),
                    )
                })
                .collect(),
            Report::BusiestMonth(r) => text(r),
        }
    }
}

// Untagged: each report serializes as its own map or list
impl Serialize for Report<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Report::TopSpenders(r) => r.serialize(serializer),
            Report::BestSellingCategory(r) => r.serialize(serializer),
            Report::ShippingUsage(r) => r.serialize(serializer),
            Report::TransactionsInMonth(rows) => rows.serialize(serializer),
            Report::BusiestMonth(r) => r.serialize(serializer),
        }
    }
}
