//! Runtime configuration resolved from the environment.
//!
//! ```text
//! PPM_DATA_SOURCE=public/data.json   # file path or URL of the dataset
//! PUBLIC_URL=https://example.org/ppm # used as <PUBLIC_URL>/data.json when no source is set
//! LOG_FILE_PATH=logs/ppm_viewer.log
//! ```

pub const DEFAULT_DATA_SOURCE: &str = "public/data.json";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/ppm_viewer.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub data_source: String,
    pub log_file_path: String,
}

impl ViewerConfig {
    /// Reads the process environment. Call after `dotenvy::dotenv()`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_source = get("PPM_DATA_SOURCE")
            .or_else(|| {
                get("PUBLIC_URL").map(|base| format!("{}/data.json", base.trim_end_matches('/')))
            })
            .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_string());

        let log_file_path =
            get("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string());

        Self {
            data_source,
            log_file_path,
        }
    }

    /// Replaces the data source when one was given on the command line.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        if let Some(source) = source {
            self.data_source = source;
        }
        self
    }
}
