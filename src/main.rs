use std::io;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use clap::Parser;
use commerce_reports::cli::{log_filter, CliArgs};
use commerce_reports::engine::ReportEngine;
use commerce_reports::output::write_reports;
use commerce_reports::{build_reports, load_transactions_from_path};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    match args.utc_offset {
        Some(offset) => run(&args, offset),
        None => run(&args, Local),
    }
}

fn run<Tz: TimeZone>(args: &CliArgs, zone: Tz) -> Result<()> {
    let transactions = load_transactions_from_path(&args.input_file)
        .with_context(|| format!("Failed to load input file '{}'", args.input_file.display()))?;

    let options = args.to_options();
    let engine = ReportEngine::new(&transactions, zone);
    let reports = build_reports(&engine, &options).context("Failed to compute reports")?;

    write_reports(&reports, options.format, io::stdout().lock())
        .context("Failed to write reports")?;

    Ok(())
}
