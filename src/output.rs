//! Output formatting and persistence for station views.
//!
//! Supports JSON serialization and CSV export of day rows.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::view::severity::Severity;
use crate::view::types::StationView;
use csv::WriterBuilder;

/// One CSV line: a day row tagged with its station.
#[derive(Debug, Serialize)]
struct DayRecord<'a> {
    station: &'a str,
    date: &'a str,
    weekday: &'a str,
    total_services: u32,
    total_ran: u32,
    total_ontime: u32,
    ppm: &'a str,
    ran: &'a str,
    severity: Severity,
}

/// Serializes station views as pretty-printed JSON.
pub fn to_json(views: &[StationView]) -> Result<String> {
    Ok(serde_json::to_string_pretty(views)?)
}

/// Writes every day row of every station to a CSV file, replacing it.
///
/// Returns the number of rows written, header excluded.
pub fn export_day_rows(path: impl AsRef<Path>, views: &[StationView]) -> Result<usize> {
    let path = path.as_ref();
    debug!(path = %path.display(), stations = views.len(), "Exporting day rows");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("cannot open {} for export", path.display()))?;

    let mut count = 0;
    for view in views {
        for day in &view.days {
            writer.serialize(DayRecord {
                station: &view.key,
                date: &day.date,
                weekday: &day.weekday,
                total_services: day.total_services,
                total_ran: day.total_ran,
                total_ontime: day.total_ontime,
                ppm: &day.ppm,
                ran: &day.ran,
                severity: day.severity,
            })?;
            count += 1;
        }
    }
    writer.flush()?;

    info!(path = %path.display(), rows = count, "Day rows exported");
    Ok(count)
}
