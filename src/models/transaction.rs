use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::purchase::{deserialize_nullable_string, Purchase};

/// One checkout event, as read from a single input line
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub user: String,
    /// Milliseconds since the Unix epoch
    pub transaction_date: i64,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub shipping: String,
    #[serde(default, deserialize_with = "deserialize_purchases")]
    pub purchases: Vec<Purchase>,
}

impl Transaction {
    /// Create a transaction with no purchases
    pub fn new(
        transaction_id: impl Into<String>,
        user: impl Into<String>,
        transaction_date: i64,
        shipping: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            user: user.into(),
            transaction_date,
            shipping: shipping.into(),
            purchases: Vec::new(),
        }
    }

    /// Append a purchase (builder style)
    pub fn with_purchase(mut self, purchase: Purchase) -> Self {
        self.purchases.push(purchase);
        self
    }

    /// Sum of `price × count` over all purchases, or None on overflow
    pub fn total(&self) -> Option<Decimal> {
        self.purchases
            .iter()
            .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.subtotal()?))
    }

    /// The transaction instant in UTC, or None if out of chrono's range
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.transaction_date)
    }
}

/// A null purchase list is the same as an empty one
fn deserialize_purchases<'de, D>(deserializer: D) -> Result<Vec<Purchase>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Purchase>>::deserialize(deserializer)?.unwrap_or_default())
}
