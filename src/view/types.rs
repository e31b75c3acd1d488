//! View structures handed to the rendering layer.

use serde::Serialize;

use crate::view::severity::{ServiceStatus, Severity};

/// One summary line per calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayRow {
    /// Date key in the station's `dates` map, used for expansion.
    pub key: String,
    pub date: String,
    pub weekday: String,
    pub total_services: u32,
    pub total_ran: u32,
    pub total_ontime: u32,
    pub percent_ontime: Option<f64>,
    pub ppm: String,
    pub ran: String,
    pub severity: Severity,
    /// Shown beneath the row while the day is expanded.
    pub services: Vec<ServiceRow>,
}

/// Detail line for one service within an expanded day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRow {
    pub key: String,
    pub planned: String,
    pub actual: String,
    pub delay: String,
    pub status: ServiceStatus,
    pub severity: Severity,
}

impl ServiceRow {
    pub fn label(&self) -> &'static str {
        self.status.label()
    }
}

/// A station's header and its day rows, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationView {
    pub key: String,
    pub title: String,
    pub days: Vec<DayRow>,
}
