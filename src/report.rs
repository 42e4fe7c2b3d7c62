//! CSV report serialization.
//!
//! Fixed nine-column layout, one row per retained cluster record. Tag sets
//! render as concatenated `|key: value|` fragments in fetch order with no
//! separator between fragments; boolean flags render as literal `true` /
//! `false`.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{InventoryError, Result};
use crate::inventory::ClusterRecord;
use crate::provider::Tag;

pub const COLUMNS: [&str; 9] = [
    "ClusterID",
    "ARN",
    "InstanceType",
    "ClusterType",
    "CurrentEngineVersion",
    "LatestEngineVersion",
    "Tags",
    "EncryptionAtRestEnabled",
    "EncryptionAtTransitEnabled",
];

fn render_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| format!("|{}: {}|", tag.key, tag.value))
        .collect()
}

/// Write the header row and one row per record to `writer`.
pub fn write_report<W: Write>(writer: W, records: &[ClusterRecord]) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(COLUMNS)?;
    for record in records {
        csv.write_record([
            record.name.as_str(),
            record.arn.as_str(),
            record.instance_type.as_str(),
            record.engine.as_str(),
            record.current_version.as_str(),
            record.latest_version.as_str(),
            render_tags(&record.tags).as_str(),
            if record.at_rest_encryption { "true" } else { "false" },
            if record.transit_encryption { "true" } else { "false" },
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Create (or truncate) the report file and write the full report into it.
pub fn write_report_file(path: &Path, records: &[ClusterRecord]) -> Result<()> {
    let report_error = |message: String| InventoryError::Report {
        path: path.display().to_string(),
        message,
    };
    let file = std::fs::File::create(path).map_err(|err| report_error(err.to_string()))?;
    write_report(file, records).map_err(|err| report_error(err.to_string()))?;
    info!(path = %path.display(), rows = records.len(), "wrote inventory report");
    Ok(())
}
