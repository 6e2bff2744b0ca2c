//! Request and response types for the Sotaog API, plus re-exports from external crates that
//! appear in the public API.

pub mod request;
pub mod response;

/// Calendar date type used for well production dates.
pub use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
/// Opaque JSON value type returned by every read endpoint, and the [`json!`] macro for building
/// request bodies.
pub use serde_json::{Value, json};

/// Unix timestamp, in the resolution the API stores for the resource being queried.
pub type Timestamp = i64;

/// Sort order for datapoint queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first. Which order the API uses when none is sent is up to the server.
    #[default]
    Desc,
}
