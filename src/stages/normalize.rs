use serde_json::Value;
use tracing::{debug, warn};

use crate::models::TranscriptionResults;

/// Normalize the raw document down to a single typed `results` payload.
///
/// The raw shape varies across producers: a previously labeled output
/// wraps the real document under `full_result`, and `results` arrives as
/// either a single object or a one-element array. `None` means no usable
/// payload; the caller falls through to the flat-transcript strategy
/// rather than failing.
pub fn normalize_results(doc: &Value) -> Option<TranscriptionResults> {
    let payload = doc.get("full_result").unwrap_or(doc);

    let results = match payload.get("results") {
        Some(results) => results,
        None => {
            debug!("document carries no results field");
            return None;
        }
    };

    let results = match results {
        Value::Array(elements) => match elements.first() {
            Some(first) => first,
            None => {
                warn!("results is an empty array");
                return None;
            }
        },
        other => other,
    };

    match serde_json::from_value(results.clone()) {
        Ok(results) => Some(results),
        Err(err) => {
            warn!("results payload did not deserialize: {err}");
            None
        }
    }
}
