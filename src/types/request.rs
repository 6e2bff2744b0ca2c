//! Request types for the Sotaog API.
//!
//! Every optional member is left out of the outgoing query string or body when it is unset. Empty
//! strings and empty lists are treated as unset.

#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

use bon::Builder;
use serde::Serialize;
use serde_json::Value;
use serde_with::skip_serializing_none;

use super::response::{Asset, SwdNetwork, field_contains, field_equals};
use super::{NaiveDate, SortOrder, Timestamp};

/// The asset collection queried when none is given.
pub const DEFAULT_ASSET_COLLECTION: &str = "assets";

#[expect(clippy::ref_option, reason = "Need an explicit reference for serde")]
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// Parameters for listing assets.
///
/// `facility` and `asset_type` are applied by the client after the collection is fetched. They
/// are never sent to the API.
///
/// # Example
///
/// ```
/// use sotaog_public_api_client::types::request::AssetsRequest;
///
/// let request = AssetsRequest::builder()
///     .collection("wells")
///     .facility("F1")
///     .build();
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Builder)]
pub struct AssetsRequest {
    /// Collection path segment, e.g. `assets`, `wells` or `tanks`.
    #[builder(default = DEFAULT_ASSET_COLLECTION.to_owned(), into)]
    pub collection: String,
    /// Keep only assets whose `facility` equals this id.
    #[builder(into)]
    pub facility: Option<String>,
    /// Keep only assets whose `asset_type` equals this id.
    #[builder(into)]
    pub asset_type: Option<String>,
}

impl Default for AssetsRequest {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AssetsRequest {
    pub(crate) fn retain(&self, assets: &mut Vec<Asset>) {
        if let Some(facility) = self.facility.as_deref().filter(|f| !f.is_empty()) {
            assets.retain(|asset| field_equals(asset, "facility", facility));
        }
        if let Some(asset_type) = self.asset_type.as_deref().filter(|t| !t.is_empty()) {
            assets.retain(|asset| field_equals(asset, "asset_type", asset_type));
        }
    }
}

/// Keeps the SWD networks that list `facility` among their facilities.
pub(crate) fn retain_swd_networks(networks: &mut Vec<SwdNetwork>, facility: Option<&str>) {
    if let Some(facility) = facility.filter(|f| !f.is_empty()) {
        networks.retain(|network| field_contains(network, "facilities", facility));
    }
}

/// Query parameters for `/v1/datatypes`.
#[non_exhaustive]
#[derive(Debug, Clone, Default, Serialize, Builder)]
pub struct DatatypesRequest {
    /// Grouping applied by the API, e.g. `asset`.
    #[serde(skip_serializing_if = "is_blank")]
    #[builder(into)]
    pub group_by: Option<String>,
}

/// Body of the multi-asset datapoint query (`POST /v1/datapoints`).
///
/// # Example
///
/// ```
/// use sotaog_public_api_client::types::{SortOrder, json};
/// use sotaog_public_api_client::types::request::DatapointsRequest;
///
/// let request = DatapointsRequest::builder()
///     .asset_datatypes(json!({"well-1": ["oil_rate", "tubing_pressure"]}))
///     .sort(SortOrder::Asc)
///     .limit(500)
///     .build();
/// ```
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Builder)]
pub struct DatapointsRequest {
    /// Datatypes to fetch, keyed by asset.
    #[builder(into)]
    pub asset_datatypes: Value,
    pub start_ts: Option<Timestamp>,
    pub end_ts: Option<Timestamp>,
    pub sort: Option<SortOrder>,
    pub limit: Option<u32>,
}

/// Query parameters for a single asset's datapoints (`GET /v1/datapoints/{asset_id}`).
///
/// `datatypes` is sent as one `datatypes=` pair per entry.
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Builder)]
pub struct AssetDatapointsRequest {
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub datatypes: Vec<String>,
    pub start_ts: Option<Timestamp>,
    pub end_ts: Option<Timestamp>,
    pub sort: Option<SortOrder>,
    pub limit: Option<u32>,
}

/// Query parameters for `/v1/truck-tickets`.
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Builder)]
pub struct TruckTicketsRequest {
    #[serde(skip_serializing_if = "is_blank")]
    #[builder(into)]
    pub facility: Option<String>,
    /// Ticket type, sent as `type`.
    #[serde(rename = "type", skip_serializing_if = "is_blank")]
    #[builder(into)]
    pub ticket_type: Option<String>,
    pub start_ts: Option<Timestamp>,
    pub end_ts: Option<Timestamp>,
}

/// Query parameters for `/v1/wells/production`.
///
/// # Example
///
/// ```
/// use sotaog_public_api_client::types::NaiveDate;
/// use sotaog_public_api_client::types::request::WellsProductionRequest;
///
/// let request = WellsProductionRequest::builder()
///     .well_ids(vec!["well-1".to_owned(), "well-2".to_owned()])
///     .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .build();
/// ```
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Builder)]
pub struct WellsProductionRequest {
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub well_ids: Vec<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facility_ids: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
