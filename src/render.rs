//! Terminal tables for station views.
//!
//! Tables use `tabled` with a borderless style. The expanded day (if any)
//! lists its services directly beneath its row.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::expansion::Expansion;
use crate::view::severity::{ServiceStatus, Severity};
use crate::view::types::{DayRow, ServiceRow, StationView};

const SERVICE_INDENT: &str = "      ";

#[derive(Debug, Tabled)]
struct DayLine<'a> {
    #[tabled(rename = "Date")]
    date: &'a str,
    #[tabled(rename = "Weekday")]
    weekday: &'a str,
    #[tabled(rename = "Total Services")]
    total_services: u32,
    #[tabled(rename = "Total Ontime")]
    total_ontime: u32,
    #[tabled(rename = "PPM")]
    ppm: &'a str,
    #[tabled(rename = "Band")]
    severity: Severity,
}

impl<'a> From<&'a DayRow> for DayLine<'a> {
    fn from(day: &'a DayRow) -> Self {
        Self {
            date: &day.date,
            weekday: &day.weekday,
            total_services: day.total_services,
            total_ontime: day.total_ontime,
            ppm: &day.ppm,
            severity: day.severity,
        }
    }
}

#[derive(Debug, Tabled)]
struct ServiceLine<'a> {
    #[tabled(rename = "Planned")]
    planned: &'a str,
    #[tabled(rename = "Actual")]
    actual: &'a str,
    #[tabled(rename = "Delay")]
    delay: &'a str,
    #[tabled(rename = "Status")]
    status: ServiceStatus,
    #[tabled(rename = "Band")]
    severity: Severity,
}

impl<'a> From<&'a ServiceRow> for ServiceLine<'a> {
    fn from(service: &'a ServiceRow) -> Self {
        Self {
            planned: &service.planned,
            actual: &service.actual,
            delay: &service.delay,
            status: service.status,
            severity: service.severity,
        }
    }
}

/// Renders one station table, marking the expanded day with `>`.
pub fn render_station(view: &StationView, expansion: &Expansion) -> String {
    let mut out = String::new();
    out.push_str(&view.title);
    out.push('\n');

    if view.days.is_empty() {
        out.push_str("  No dates recorded\n");
        return out;
    }

    let table = borderless(view.days.iter().map(DayLine::from));
    let mut lines = table.lines();

    // Borderless tables render the header and each row on one line apiece.
    if let Some(header) = lines.next() {
        push_line(&mut out, " ", header);
    }
    for (day, line) in view.days.iter().zip(lines) {
        let expanded = expansion.is_expanded(&day.key);
        push_line(&mut out, if expanded { ">" } else { " " }, line);

        if expanded {
            render_services(&mut out, &day.services);
        }
    }

    out
}

/// Renders every station, separated by a blank line.
pub fn render_dataset(views: &[StationView], expansion: &Expansion) -> String {
    views
        .iter()
        .map(|view| render_station(view, expansion))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_services(out: &mut String, services: &[ServiceRow]) {
    if services.is_empty() {
        out.push_str(SERVICE_INDENT);
        out.push_str("No services recorded\n");
        return;
    }

    let table = borderless(services.iter().map(ServiceLine::from));
    for line in table.lines() {
        push_line(out, SERVICE_INDENT, line);
    }
}

fn borderless<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::blank()).to_string()
}

fn push_line(out: &mut String, prefix: &str, line: &str) {
    out.push_str(prefix);
    out.push_str(line.trim_end());
    out.push('\n');
}
