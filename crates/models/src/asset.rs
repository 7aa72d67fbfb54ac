use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ValidationError;

pub const FIELD_NAME: &str = "name";
pub const FIELD_SERIAL_NO: &str = "serialNo";
pub const FIELD_ASSIGN_DATE: &str = "assignDate";

/// Persisted asset record.
///
/// Serialized with camelCase keys (`assetId`, `serialNo`, `assignDate`);
/// `assign_date` keeps the exact string the client supplied.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: String,
    pub name: String,
    pub serial_no: String,
    pub assign_date: String,
}

/// Candidate that passed [`validate`]; carries no id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedAsset {
    pub name: String,
    pub serial_no: String,
    pub assign_date: String,
}

impl ValidatedAsset {
    /// Attach an id, producing the record to store.
    pub fn into_asset(self, asset_id: impl Into<String>) -> Asset {
        Asset {
            asset_id: asset_id.into(),
            name: self.name,
            serial_no: self.serial_no,
            assign_date: self.assign_date,
        }
    }
}

/// Check a decoded candidate field by field, collecting every violation.
///
/// Anything that is not a JSON object is treated as an object with no fields.
/// Unknown keys, `assetId` included, are ignored.
pub fn validate(candidate: &Value) -> Result<ValidatedAsset, ValidationError> {
    let empty = Map::new();
    let fields = candidate.as_object().unwrap_or(&empty);

    let mut violations = Vec::new();
    let name = required_string(fields, FIELD_NAME, &mut violations);
    let serial_no = required_string(fields, FIELD_SERIAL_NO, &mut violations);
    let assign_date = required_date(fields, FIELD_ASSIGN_DATE, &mut violations);

    match (name, serial_no, assign_date) {
        (Some(name), Some(serial_no), Some(assign_date)) => Ok(ValidatedAsset { name, serial_no, assign_date }),
        _ => Err(ValidationError::new(violations)),
    }
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const LOCAL_DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an assignment date.
///
/// Accepts calendar dates (`2024-01-01`, `2024/01/01`), RFC 3339 date-times
/// with an offset, and local date-times without one (`2024-01-01T09:30:00`,
/// `2024-01-01 09:30:00`, fractional seconds allowed).
pub fn parse_assign_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            LOCAL_DATE_TIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}

fn required_string(fields: &Map<String, Value>, field: &str, violations: &mut Vec<String>) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            violations.push(format!("{field} is a required field"));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(format!("{field} is a required field"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(format!("{field} must be a `string` type"));
            None
        }
    }
}

fn required_date(fields: &Map<String, Value>, field: &str, violations: &mut Vec<String>) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            violations.push(format!("{field} is a required field"));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(format!("{field} is a required field"));
            None
        }
        Some(Value::String(s)) if parse_assign_date(s).is_some() => Some(s.clone()),
        Some(_) => {
            violations.push(format!("{field} must be a valid date"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_candidate_passes_unchanged() {
        let v = validate(&json!({"name": "Laptop", "serialNo": "SN-1", "assignDate": "2024-01-01"})).unwrap();
        assert_eq!(v.name, "Laptop");
        assert_eq!(v.serial_no, "SN-1");
        assert_eq!(v.assign_date, "2024-01-01");
    }

    #[test]
    fn missing_name_reports_only_name() {
        let err = validate(&json!({"serialNo": "SN-1", "assignDate": "2024-01-01"})).unwrap_err();
        assert_eq!(err.violations(), ["name is a required field"]);
    }

    #[test]
    fn every_violation_is_reported_in_field_order() {
        let err = validate(&json!({"assignDate": "2024-01-01"})).unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert!(err.violations()[0].starts_with("name"));
        assert!(err.violations()[1].starts_with("serialNo"));

        let err = validate(&json!({"name": 7, "serialNo": "", "assignDate": "not a date"})).unwrap_err();
        assert_eq!(
            err.violations(),
            [
                "name must be a `string` type",
                "serialNo is a required field",
                "assignDate must be a valid date",
            ]
        );
    }

    #[test]
    fn non_object_candidate_misses_all_fields() {
        for candidate in [json!(null), json!([1, 2]), json!("text"), json!(42)] {
            let err = validate(&candidate).unwrap_err();
            assert_eq!(err.violations().len(), 3);
        }
    }

    #[test]
    fn assign_date_accepts_dates_and_date_times() {
        assert!(parse_assign_date("2024-02-29").is_some());
        assert!(parse_assign_date("2024-01-01T09:30:00Z").is_some());
        assert!(parse_assign_date("2024-01-01T09:30:00+02:00").is_some());
        assert!(parse_assign_date("2024/01/01").is_some());
        assert!(parse_assign_date("2024-01-01T09:30:00").is_some());
        assert!(parse_assign_date("2024-01-01T09:30:00.250").is_some());
        assert!(parse_assign_date("2024-01-01T09:30").is_some());
        assert!(parse_assign_date("2024-01-01 09:30:00").is_some());
        assert!(parse_assign_date("2024-01-01T25:00:00").is_none());
        assert!(parse_assign_date("2023-02-29").is_none());
        assert!(parse_assign_date("2024-13-01").is_none());
        assert!(parse_assign_date("yesterday").is_none());
    }

    #[test]
    fn body_asset_id_is_ignored() {
        let v = validate(&json!({
            "assetId": "client-chosen",
            "name": "Monitor",
            "serialNo": "SN-2",
            "assignDate": "2024-03-15",
            "extra": true
        }))
        .unwrap();
        let asset = v.into_asset("server-id");
        assert_eq!(asset.asset_id, "server-id");
    }

    #[test]
    fn asset_serializes_with_camel_case_keys() {
        let asset = Asset {
            asset_id: "a1".into(),
            name: "Laptop".into(),
            serial_no: "SN-1".into(),
            assign_date: "2024-01-01".into(),
        };
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value, json!({"assetId": "a1", "name": "Laptop", "serialNo": "SN-1", "assignDate": "2024-01-01"}));
    }
}
