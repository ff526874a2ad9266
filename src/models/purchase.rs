use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item of a transaction
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Purchase {
    pub purchase_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub product: String,
    pub count: i64,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
    /// Grouping key for the category report; missing or null becomes ""
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub category: String,
}

impl Purchase {
    /// Create a purchase with an empty product name
    pub fn new(
        purchase_id: impl Into<String>,
        category: impl Into<String>,
        count: i64,
        price: Decimal,
    ) -> Self {
        Self {
            purchase_id: purchase_id.into(),
            product: String::new(),
            count,
            price,
            category: category.into(),
        }
    }

    /// `price × count`, or None if the product does not fit in a Decimal
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.count))
    }
}

/// Treat a missing or null string field as the empty string
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Prices arrive either as JSON numbers or as numeric strings.
/// Both are parsed from their original text (serde_json keeps number text
/// with `arbitrary_precision`), so no binary float rounding leaks in.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de;
    use serde_json::Value;

    let text = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => {
            return Err(de::Error::custom(format!(
                "price must be a number or numeric string, got {}",
                other
            )))
        }
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| de::Error::custom(format!("invalid price '{}'", text)))
}
