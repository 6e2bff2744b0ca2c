//! Resources returned by the Sotaog API.
//!
//! The client does not model resource shapes: each alias names what an endpoint returns, and the
//! value is the server's JSON, untouched.

use serde_json::Value;

pub type Facility = Value;
pub type Asset = Value;
pub type AssetType = Value;
pub type Customer = Value;
pub type Datatype = Value;
/// Datapoints keyed the way the API groups them for the queried assets and datatypes.
pub type Datapoints = Value;
/// Saltwater-disposal network. Carries a `facilities` array of facility ids.
pub type SwdNetwork = Value;
pub type TruckTicket = Value;
pub type AlarmService = Value;
pub type Alarm = Value;
pub type WellProduction = Value;
pub type WellConfig = Value;
/// A well's expected production-decline profile.
pub type TypeCurve = Value;
pub type FinancialsCategory = Value;

/// Whether `resource` has a `field` equal to the string `expected`. Resources without the field
/// never match.
pub(crate) fn field_equals(resource: &Value, field: &str, expected: &str) -> bool {
    resource
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|value| value == expected)
}

/// Whether `resource` has an array `field` containing the string `member`.
pub(crate) fn field_contains(resource: &Value, field: &str, member: &str) -> bool {
    resource
        .get(field)
        .and_then(Value::as_array)
        .is_some_and(|values| values.iter().any(|value| value.as_str() == Some(member)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_equals_should_drop_missing_fields() {
        assert!(field_equals(&json!({"facility": "F1"}), "facility", "F1"));
        assert!(!field_equals(&json!({"facility": "F2"}), "facility", "F1"));
        assert!(!field_equals(&json!({"other": "x"}), "facility", "F1"));
        assert!(!field_equals(&json!({"facility": 1}), "facility", "1"));
    }

    #[test]
    fn field_contains_should_match_array_members() {
        let network = json!({"facilities": ["F1", "F2"]});

        assert!(field_contains(&network, "facilities", "F2"));
        assert!(!field_contains(&network, "facilities", "F3"));
        assert!(!field_contains(&json!({"facilities": "F1"}), "facilities", "F1"));
        assert!(!field_contains(&json!({}), "facilities", "F1"));
    }
}
