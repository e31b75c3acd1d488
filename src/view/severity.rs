use serde::Serialize;
use std::fmt;

/// Ordinal severity band shared by day rows and service rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Band name as shown in tables and exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts an on-time ratio (0.0–1.0) into a severity band.
///
/// | Range       | Band    |
/// |-------------|---------|
/// | >= 0.95     | Success |
/// | >= 0.80     | Warning |
/// | < 0.80      | Error   |
pub fn classify(ratio: f64) -> Severity {
    match ratio {
        r if r >= 0.95 => Severity::Success,
        r if r >= 0.80 => Severity::Warning,
        _ => Severity::Error,
    }
}

/// Outcome of a single service, decided from its `ran` and `ontime` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceStatus {
    Cancelled,
    Delayed,
    Ontime,
}

impl ServiceStatus {
    /// `ontime` is ignored for a service that did not run.
    pub fn from_flags(ran: bool, ontime: bool) -> Self {
        match (ran, ontime) {
            (false, _) => ServiceStatus::Cancelled,
            (true, false) => ServiceStatus::Delayed,
            (true, true) => ServiceStatus::Ontime,
        }
    }

    /// `Cancelled`, `Delayed` or `Ontime`.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::Cancelled => "Cancelled",
            ServiceStatus::Delayed => "Delayed",
            ServiceStatus::Ontime => "Ontime",
        }
    }

    /// Fixed band per outcome; no ratio is involved.
    pub fn severity(&self) -> Severity {
        match self {
            ServiceStatus::Cancelled => Severity::Error,
            ServiceStatus::Delayed => Severity::Warning,
            ServiceStatus::Ontime => Severity::Success,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
