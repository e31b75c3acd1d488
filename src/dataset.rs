//! Data model of the pre-computed punctuality dataset.
//!
//! The dataset is produced by an external scraper and is read-only for the
//! lifetime of a view session. Every level tolerates missing fields so that a
//! partially populated file still renders.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Station key -> station, in document order.
pub type Dataset = IndexMap<String, Station>;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Station {
    #[serde(default, deserialize_with = "nullable")]
    pub meta: StationMeta,
    /// Date key -> record, ascending chronological as written by the scraper.
    /// Records that fail to decode are dropped.
    #[serde(default, deserialize_with = "dates_in_order")]
    pub dates: IndexMap<String, DateRecord>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StationMeta {
    pub station_name: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub station_code: Option<String>,
    /// Older scraper output used `station` for the code.
    pub station: Option<String>,
    pub toc: Option<String>,
}

impl StationMeta {
    /// The station code, whichever field the scraper wrote it to.
    pub fn code(&self) -> Option<&str> {
        self.station_code.as_deref().or(self.station.as_deref())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DateRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub analysis: Analysis,
    #[serde(default, deserialize_with = "services_in_order")]
    pub services: IndexMap<String, ServiceRecord>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Analysis {
    pub total_services: u32,
    pub total_ran: u32,
    pub total_ontime: u32,
    pub percent_ran: Option<f64>,
    pub percent_ontime: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceRecord {
    pub planned: Option<String>,
    pub actual: Option<String>,
    /// Minutes late; half minutes are recorded as `.5`.
    pub delay: Option<f64>,
    pub ran: bool,
    pub ontime: bool,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Either JSON container, with entries decoded one at a time later.
#[derive(Deserialize)]
#[serde(untagged)]
enum Entries {
    Listed(Vec<Value>),
    Keyed(IndexMap<String, Value>),
    Other(IgnoredAny),
}

/// Decodes each entry on its own so one malformed record only loses itself.
fn decode_entries<T, I>(kind: &str, entries: I) -> IndexMap<String, T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (String, Value)>,
{
    entries
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(entry) => Some((key, entry)),
            Err(e) => {
                warn!(kind, key = %key, error = %e, "Skipping malformed entry");
                None
            }
        })
        .collect()
}

fn dates_in_order<'de, D>(deserializer: D) -> Result<IndexMap<String, DateRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Entries>::deserialize(deserializer)? {
        None => IndexMap::new(),
        Some(Entries::Keyed(dates)) => decode_entries("date", dates),
        Some(_) => {
            warn!("Dates are not an object, treating as empty");
            IndexMap::new()
        }
    })
}

/// Accepts the scraper's array form as well as an object keyed by service id.
/// Array entries are keyed by position, skipped entries included.
fn services_in_order<'de, D>(deserializer: D) -> Result<IndexMap<String, ServiceRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Entries>::deserialize(deserializer)? {
        None => IndexMap::new(),
        Some(Entries::Keyed(services)) => decode_entries("service", services),
        Some(Entries::Listed(services)) => decode_entries(
            "service",
            services
                .into_iter()
                .enumerate()
                .map(|(i, service)| (i.to_string(), service)),
        ),
        Some(Entries::Other(_)) => {
            warn!("Services are neither a list nor an object, treating as empty");
            IndexMap::new()
        }
    })
}
