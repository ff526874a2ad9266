use std::path::PathBuf;

use chrono::FixedOffset;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;
use crate::report::ReportKind;
use crate::ReportOptions;

/// Compute sales reports from a newline-delimited JSON transaction log
#[derive(Parser, Debug)]
#[command(name = "commerce-reports")]
#[command(about = "Compute sales reports from an NDJSON transaction log", long_about = None)]
pub struct CliArgs {
    /// Input file with one JSON transaction per line
    #[arg(value_name = "INPUT", default_value = "transactions.ndjson")]
    pub input_file: PathBuf,

    /// Report to compute; repeat for several (default: all)
    #[arg(long = "report", value_name = "KIND")]
    pub reports: Vec<ReportKind>,

    /// Target month for the transactions-in-month report
    #[arg(
        long,
        value_name = "MONTH",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=12)
    )]
    pub month: u32,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Bucket dates at a fixed UTC offset such as +02:00 instead of the local zone
    #[arg(long = "utc-offset", value_name = "OFFSET", value_parser = parse_utc_offset, allow_hyphen_values = true)]
    pub utc_offset: Option<FixedOffset>,
}

impl CliArgs {
    /// Reports requested on the command line, or all of them
    pub fn report_kinds(&self) -> Vec<ReportKind> {
        if self.reports.is_empty() {
            ReportKind::ALL.to_vec()
        } else {
            self.reports.clone()
        }
    }

    pub fn to_options(&self) -> ReportOptions {
        ReportOptions {
            kinds: self.report_kinds(),
            target_month: self.month,
            format: self.format,
        }
    }
}

/// Log filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "commerce_reports=info";

/// Build the log filter from a `RUST_LOG` value, which replaces the default entirely
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Parse an offset written as `+HH:MM`, `-HH:MM`, `+HHMM` or `Z`
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+') => (1, &value[1..]),
        Some(b'-') => (-1, &value[1..]),
        _ => return Err(format!("offset '{}' must start with '+' or '-'", value)),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("offset '{}' must look like +HH:MM", value));
    }

    let hours: i32 = digits[..2].parse().map_err(|_| format!("invalid hours in '{}'", value))?;
    let minutes: i32 = digits[2..].parse().map_err(|_| format!("invalid minutes in '{}'", value))?;
    if minutes >= 60 {
        return Err(format!("invalid minutes in '{}'", value));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| format!("offset '{}' is out of range", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing_subscriber::filter::LevelFilter;

    #[rstest]
    #[case::defaults(&["program"], "transactions.ndjson", 1, OutputFormat::Json)]
    #[case::explicit_input(&["program", "data.ndjson"], "data.ndjson", 1, OutputFormat::Json)]
    #[case::month_and_csv(
        &["program", "--month", "2", "--format", "csv", "data.ndjson"],
        "data.ndjson",
        2,
        OutputFormat::Csv
    )]
    fn test_basic_options(
        #[case] args: &[&str],
        #[case] input: &str,
        #[case] month: u32,
        #[case] format: OutputFormat,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.input_file, PathBuf::from(input));
        assert_eq!(parsed.month, month);
        assert_eq!(parsed.format, format);
        assert!(parsed.utc_offset.is_none());
    }

    #[rstest]
    #[case::all_by_default(&["program"], ReportKind::ALL.to_vec())]
    #[case::single(&["program", "--report", "top-spenders"], vec![ReportKind::TopSpenders])]
    #[case::repeated(
        &["program", "--report", "busiest-month", "--report", "shipping-usage"],
        vec![ReportKind::BusiestMonth, ReportKind::ShippingUsage]
    )]
    fn test_report_selection(#[case] args: &[&str], #[case] expected: Vec<ReportKind>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.report_kinds(), expected);
        assert_eq!(parsed.to_options().kinds, expected);
    }

    #[rstest]
    #[case::month_zero(&["program", "--month", "0"])]
    #[case::month_thirteen(&["program", "--month", "13"])]
    #[case::unknown_report(&["program", "--report", "everything"])]
    #[case::unknown_format(&["program", "--format", "xml"])]
    #[case::bad_offset(&["program", "--utc-offset", "0530"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }

    #[rstest]
    #[case::positive("+02:00", 7200)]
    #[case::negative("-05:30", -19800)]
    #[case::compact("+0930", 34200)]
    #[case::zulu("Z", 0)]
    fn test_parse_utc_offset(#[case] value: &str, #[case] seconds: i32) {
        let offset = parse_utc_offset(value).unwrap();
        assert_eq!(offset.local_minus_utc(), seconds);
    }

    #[test]
    fn test_negative_offset_from_command_line() {
        let parsed = CliArgs::try_parse_from(["program", "--utc-offset", "-03:00"]).unwrap();
        assert_eq!(parsed.utc_offset.map(|o| o.local_minus_utc()), Some(-10800));
    }

    #[rstest]
    #[case::unset(None, LevelFilter::INFO)]
    #[case::blank(Some("  "), LevelFilter::INFO)]
    #[case::crate_debug(Some("commerce_reports=debug"), LevelFilter::DEBUG)]
    #[case::global_trace(Some("trace"), LevelFilter::TRACE)]
    #[case::quieter(Some("commerce_reports=warn"), LevelFilter::WARN)]
    fn test_log_filter_honours_rust_log(#[case] rust_log: Option<&str>, #[case] expected: LevelFilter) {
        assert_eq!(log_filter(rust_log).max_level_hint(), Some(expected));
    }

    #[test]
    fn test_parse_utc_offset_rejects_bad_minutes() {
        assert!(parse_utc_offset("+01:75").is_err());
    }
}
