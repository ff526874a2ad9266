use std::io::Write;

use clap::ValueEnum;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::Result;
use crate::report::Report;

/// Serialization format for rendered reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Write reports in the requested format
///
/// Entries are written in ranking order; nothing here re-sorts.
pub fn write_reports<W: Write>(reports: &[Report<'_>], format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(reports, writer),
        OutputFormat::Csv => write_csv(reports, writer),
    }
}

/// One report is written as its own value; several become an object keyed
/// by report name.
fn write_json<W: Write>(reports: &[Report<'_>], mut writer: W) -> Result<()> {
    match reports {
        [single] => serde_json::to_writer_pretty(&mut writer, single)?,
        many => serde_json::to_writer_pretty(&mut writer, &NamedReports(many))?,
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// One report is a two-column table; several share a `report,key,value` table.
fn write_csv<W: Write>(reports: &[Report<'_>], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    match reports {
        [single] => {
            csv_writer.write_record(single.kind().columns())?;
            for (key, value) in single.rows() {
                csv_writer.write_record([key, value])?;
            }
        }
        many => {
            csv_writer.write_record(["report", "key", "value"])?;
            for report in many {
                let name = report.kind().name();
                for (key, value) in report.rows() {
                    csv_writer.write_record([name, key.as_str(), value.as_str()])?;
                }
            }
        }
    }

    csv_writer.flush()?;
    Ok(())
}

struct NamedReports<'r, 'a>(&'r [Report<'a>]);

impl Serialize for NamedReports<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for report in self.0 {
            map.serialize_entry(report.kind().name(), report)?;
        }
        map.end()
    }
}
