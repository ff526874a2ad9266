#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use commerce_reports::models::{Purchase, Transaction};
use rust_decimal::Decimal;

/// Epoch milliseconds for noon UTC on the given date
pub fn millis(year: i32, month: u32, day: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid test date")
        .timestamp_millis()
}

/// Epoch milliseconds for an exact UTC instant
pub fn millis_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test instant")
        .timestamp_millis()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Helper to create a purchase
pub fn make_purchase(id: &str, category: &str, count: i64, price: Decimal) -> Purchase {
    Purchase::new(id, category, count, price)
}

/// Helper to create a transaction with the given purchases
pub fn make_transaction(
    id: &str,
    user: &str,
    date: i64,
    shipping: &str,
    purchases: Vec<Purchase>,
) -> Transaction {
    let mut transaction = Transaction::new(id, user, date, shipping);
    transaction.purchases = purchases;
    transaction
}

/// Build one NDJSON line for a transaction with a single purchase
pub fn ndjson_line(
    id: &str,
    user: &str,
    date: i64,
    shipping: &str,
    category: &str,
    count: i64,
    price: &str,
) -> String {
    format!(
        r#"{{"transaction_id":"{id}","user":"{user}","transaction_date":{date},"shipping":"{shipping}","purchases":[{{"purchase_id":"{id}-1","product":"item","count":{count},"price":{price},"category":"{category}"}}]}}"#
    )
}

/// A small mixed dataset spanning January to March 2024
pub fn sample_transactions() -> Vec<Transaction> {
    use rust_decimal_macros::dec;

    vec![
        make_transaction(
            "t1",
            "alice",
            millis(2024, 1, 5),
            "standard",
            vec![
                make_purchase("p1", "books", 2, dec!(10.00)),
                make_purchase("p2", "toys", 1, dec!(5.00)),
            ],
        ),
        make_transaction(
            "t2",
            "bob",
            millis(2024, 2, 10),
            "express",
            vec![make_purchase("p3", "electronics", 1, dec!(1500.50))],
        ),
        make_transaction(
            "t3",
            "alice",
            millis(2024, 2, 20),
            "standard",
            vec![make_purchase("p4", "toys", 4, dec!(2.25))],
        ),
        make_transaction(
            "t4",
            "carol",
            millis(2024, 3, 1),
            "pickup",
            vec![make_purchase("p5", "books", 1, dec!(12.99))],
        ),
        make_transaction(
            "t5",
            "dave",
            millis(2024, 2, 28),
            "standard",
            Vec::new(),
        ),
    ]
}
