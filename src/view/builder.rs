use tracing::debug;

use crate::dataset::{Dataset, DateRecord, Station, StationMeta};
use crate::view::format::{
    PLACEHOLDER, format_delay, format_percent, format_weekday, or_placeholder,
};
use crate::view::severity::{ServiceStatus, classify};
use crate::view::types::{DayRow, ServiceRow, StationView};

/// Builds the day rows of a station, most recent first.
///
/// Rows come out in reverse insertion order of `station.dates`. Dates are not
/// re-sorted, so a file written out of order displays out of order.
pub fn build_day_rows(station: &Station) -> Vec<DayRow> {
    station
        .dates
        .iter()
        .rev()
        .map(|(key, record)| build_day_row(key, record))
        .collect()
}

fn build_day_row(key: &str, record: &DateRecord) -> DayRow {
    let analysis = &record.analysis;

    let weekday = format_weekday(&record.date).unwrap_or_else(|e| {
        debug!(date_key = key, error = %e, "Weekday unavailable");
        PLACEHOLDER.to_string()
    });

    if let Some(ratio) = analysis
        .percent_ontime
        .filter(|r| !(0.0..=1.0).contains(r))
    {
        debug!(date_key = key, ratio, "On-time ratio outside [0, 1]");
    }

    DayRow {
        key: key.to_string(),
        date: record.date.clone(),
        weekday,
        total_services: analysis.total_services,
        total_ran: analysis.total_ran,
        total_ontime: analysis.total_ontime,
        percent_ontime: analysis.percent_ontime,
        ppm: format_percent(analysis.percent_ontime),
        ran: format_percent(analysis.percent_ran),
        severity: classify(analysis.percent_ontime.unwrap_or(0.0)),
        services: build_service_rows(record),
    }
}

/// Builds the service rows of one day in their original order.
pub fn build_service_rows(record: &DateRecord) -> Vec<ServiceRow> {
    record
        .services
        .iter()
        .map(|(key, service)| {
            let status = ServiceStatus::from_flags(service.ran, service.ontime);
            ServiceRow {
                key: key.clone(),
                planned: or_placeholder(service.planned.as_deref()),
                actual: or_placeholder(service.actual.as_deref()),
                delay: format_delay(service.delay),
                status,
                severity: status.severity(),
            }
        })
        .collect()
}

/// `Arriving at <station>, from <origin>`.
pub fn station_title(meta: &StationMeta) -> String {
    format!(
        "Arriving at {}, from {}",
        or_placeholder(meta.station_name.as_deref()),
        or_placeholder(meta.origin.as_deref())
    )
}

/// Titled day rows of one station, keyed by its dataset key.
pub fn build_station_view(key: &str, station: &Station) -> StationView {
    StationView {
        key: key.to_string(),
        title: station_title(&station.meta),
        days: build_day_rows(station),
    }
}

/// Builds a view for every station in dataset order.
pub fn build_dataset_view(dataset: &Dataset) -> Vec<StationView> {
    dataset
        .iter()
        .map(|(key, station)| build_station_view(key, station))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Analysis, ServiceRecord};
    use crate::view::severity::Severity;
    use indexmap::IndexMap;

    #[test]
    fn test_day_rows_reverse_insertion_order() {
        let station = station_with_dates(&["2021-03-13", "2021-03-14", "2021-03-15"]);
        let rows = build_day_rows(&station);

        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["2021-03-15", "2021-03-14", "2021-03-13"]);
    }

    #[test]
    fn test_day_rows_do_not_sort_by_date() {
        let station = station_with_dates(&["2021-03-15", "2021-03-13", "2021-03-14"]);
        let rows = build_day_rows(&station);

        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["2021-03-14", "2021-03-13", "2021-03-15"]);
    }

    #[test]
    fn test_day_rows_empty_station() {
        assert!(build_day_rows(&Station::default()).is_empty());
    }

    #[test]
    fn test_day_rows_idempotent() {
        let station = station_with_dates(&["2021-03-14", "2021-03-15"]);
        assert_eq!(build_day_rows(&station), build_day_rows(&station));
    }

    #[test]
    fn test_day_row_fields() {
        let mut station = Station::default();
        station.dates.insert(
            "2021-03-15".to_string(),
            DateRecord {
                date: "2021-03-15".to_string(),
                analysis: Analysis {
                    total_services: 21,
                    total_ran: 20,
                    total_ontime: 20,
                    percent_ran: Some(20.0 / 21.0),
                    percent_ontime: Some(0.9523),
                },
                services: IndexMap::new(),
            },
        );

        let row = &build_day_rows(&station)[0];
        assert_eq!(row.date, "2021-03-15");
        assert_eq!(row.weekday, "Monday");
        assert_eq!(row.total_services, 21);
        assert_eq!(row.total_ontime, 20);
        assert_eq!(row.ppm, "95.23%");
        assert_eq!(row.ran, "95.24%");
        assert_eq!(row.severity, Severity::Success);
    }

    #[test]
    fn test_day_row_without_analysis() {
        let station = station_with_dates(&["2021-03-15"]);
        let row = &build_day_rows(&station)[0];

        assert_eq!(row.total_services, 0);
        assert_eq!(row.ppm, "-");
        assert_eq!(row.severity, Severity::Error);
        assert!(row.services.is_empty());
    }

    #[test]
    fn test_day_row_carries_service_rows() {
        let mut station = Station::default();
        station.dates.insert(
            "2021-03-15".to_string(),
            date_with_services(&[
                service(Some("0800"), None, None, false, false),
                service(Some("0815"), Some("0815"), Some(0.0), true, true),
            ]),
        );

        let row = &build_day_rows(&station)[0];
        let labels: Vec<_> = row.services.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Cancelled", "Ontime"]);
        assert_eq!(row.services, build_service_rows(&station.dates["2021-03-15"]));
    }

    #[test]
    fn test_day_row_bad_date_keeps_row() {
        let station = station_with_dates(&["not-a-date", "2021-03-15"]);
        let rows = build_day_rows(&station);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].weekday, "Monday");
        assert_eq!(rows[1].weekday, "-");
        assert_eq!(rows[1].date, "not-a-date");
    }

    #[test]
    fn test_day_row_severity_bands() {
        for (ratio, expected) in [
            (0.95, Severity::Success),
            (0.9, Severity::Warning),
            (0.8, Severity::Warning),
            (0.5, Severity::Error),
        ] {
            let mut station = Station::default();
            station.dates.insert(
                "d".to_string(),
                DateRecord {
                    date: "2021-03-15".to_string(),
                    analysis: Analysis {
                        percent_ontime: Some(ratio),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            );
            assert_eq!(build_day_rows(&station)[0].severity, expected);
        }
    }

    #[test]
    fn test_service_rows_preserve_order() {
        let record = date_with_services(&[
            service(Some("0815"), Some("0816"), Some(1.0), true, true),
            service(Some("0800"), None, None, false, false),
            service(Some("0830"), Some("0837"), Some(7.0), true, false),
        ]);
        let rows = build_service_rows(&record);

        let planned: Vec<_> = rows.iter().map(|r| r.planned.as_str()).collect();
        assert_eq!(planned, vec!["0815", "0800", "0830"]);
        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_service_rows_status_and_placeholders() {
        let record = date_with_services(&[
            service(Some("0815"), Some("0816"), Some(1.0), true, true),
            service(Some("0800"), None, None, false, true),
            service(Some("0830"), Some("0837"), Some(7.5), true, false),
        ]);
        let rows = build_service_rows(&record);

        assert_eq!(rows[0].label(), "Ontime");
        assert_eq!(rows[0].severity, Severity::Success);
        assert_eq!(rows[0].delay, "1");

        assert_eq!(rows[1].label(), "Cancelled");
        assert_eq!(rows[1].severity, Severity::Error);
        assert_eq!(rows[1].actual, "-");
        assert_eq!(rows[1].delay, "-");

        assert_eq!(rows[2].label(), "Delayed");
        assert_eq!(rows[2].severity, Severity::Warning);
        assert_eq!(rows[2].delay, "7.5");
    }

    #[test]
    fn test_service_rows_empty() {
        assert!(build_service_rows(&DateRecord::default()).is_empty());
    }

    #[test]
    fn test_station_title() {
        let meta = StationMeta {
            station_name: Some("London Paddington".to_string()),
            origin: Some("Abbey Wood".to_string()),
            ..Default::default()
        };
        assert_eq!(station_title(&meta), "Arriving at London Paddington, from Abbey Wood");
        assert_eq!(station_title(&StationMeta::default()), "Arriving at -, from -");
    }

    #[test]
    fn test_dataset_view_keeps_station_order() {
        let mut dataset = Dataset::new();
        dataset.insert("PAD".to_string(), station_with_dates(&["2021-03-15"]));
        dataset.insert("ABW".to_string(), Station::default());

        let view = build_dataset_view(&dataset);
        let keys: Vec<_> = view.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["PAD", "ABW"]);
        assert_eq!(view[0].days.len(), 1);
        assert!(view[1].days.is_empty());
    }

    // Helper functions for tests
    fn station_with_dates(dates: &[&str]) -> Station {
        let mut station = Station::default();
        for date in dates {
            station.dates.insert(
                date.to_string(),
                DateRecord {
                    date: date.to_string(),
                    ..Default::default()
                },
            );
        }
        station
    }

    fn date_with_services(services: &[ServiceRecord]) -> DateRecord {
        DateRecord {
            date: "2021-03-15".to_string(),
            analysis: Analysis::default(),
            services: services
                .iter()
                .enumerate()
                .map(|(i, s)| (i.to_string(), s.clone()))
                .collect(),
        }
    }

    fn service(
        planned: Option<&str>,
        actual: Option<&str>,
        delay: Option<f64>,
        ran: bool,
        ontime: bool,
    ) -> ServiceRecord {
        ServiceRecord {
            planned: planned.map(str::to_string),
            actual: actual.map(str::to_string),
            delay,
            ran,
            ontime,
        }
    }
}
