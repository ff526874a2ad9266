use commerce_reports::format::{format_currency, month_name};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[rstest]
#[case::zero(dec!(0), "0.00")]
#[case::whole(dec!(25), "25.00")]
#[case::one_decimal(dec!(100.5), "100.50")]
#[case::thousands(dec!(1234.56), "1,234.56")]
#[case::exact_thousand(dec!(1000), "1,000.00")]
#[case::millions(dec!(1234567.891), "1,234,567.89")]
#[case::half_even_down(dec!(0.125), "0.12")]
#[case::half_even_up(dec!(0.135), "0.14")]
#[case::negative(dec!(-1234.5), "-1,234.50")]
#[case::negative_rounds_to_zero(dec!(-0.001), "0.00")]
fn test_format_currency(#[case] amount: Decimal, #[case] expected: &str) {
    assert_eq!(format_currency(amount), expected);
}

#[rstest]
#[case(1, "JANUARY")]
#[case(2, "FEBRUARY")]
#[case(6, "JUNE")]
#[case(12, "DECEMBER")]
fn test_month_name(#[case] month: u32, #[case] expected: &str) {
    assert_eq!(month_name(month), Some(expected));
}

#[rstest]
#[case(0)]
#[case(13)]
#[case(256)]
fn test_month_name_out_of_range(#[case] month: u32) {
    assert_eq!(month_name(month), None);
}
