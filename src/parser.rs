//! JSON decoder for the punctuality dataset.

use anyhow::{Context, Result};

use crate::dataset::Dataset;

/// Decodes a [`Dataset`] from raw JSON bytes.
///
/// Object order is kept at every level, so dates stay in the order the
/// scraper appended them.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON or do not match the dataset shape.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset> {
    serde_json::from_slice(bytes).context("dataset is not valid punctuality JSON")
}
