//! Punctuality view model.
//!
//! Turns a read-only [`Station`](crate::dataset::Station) into ordered day
//! rows and service rows, each carrying display strings and a severity band.
//! Everything here is a pure function of its input.

pub mod builder;
pub mod format;
pub mod severity;
pub mod types;

pub use builder::{build_dataset_view, build_day_rows, build_service_rows, build_station_view};
pub use severity::{ServiceStatus, Severity, classify};
pub use types::{DayRow, ServiceRow, StationView};
