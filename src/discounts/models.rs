use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Option key for the catch-all collection written by the save endpoint
pub const CATCH_ALL_OPTION: &str = "aio_woodiscount_data";

/// The five typed discount collections, in their fixed merge order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    FlatPercentage,
    Bogo,
    Shipping,
    BuyXGetY,
    Bulk,
}

impl DiscountKind {
    /// Merge order for get-all-discounts
    pub const ALL: [DiscountKind; 5] = [
        DiscountKind::FlatPercentage,
        DiscountKind::Bogo,
        DiscountKind::Shipping,
        DiscountKind::BuyXGetY,
        DiscountKind::Bulk,
    ];

    /// Option key the collection is stored under
    pub fn option_key(self) -> &'static str {
        match self {
            DiscountKind::FlatPercentage => "aio_flatpercentage_discount",
            DiscountKind::Bogo => "aio_bogo_discount",
            DiscountKind::Shipping => "aio_shipping_discount",
            DiscountKind::BuyXGetY => "aio_bxgy_discount",
            DiscountKind::Bulk => "aio_bulk_discount",
        }
    }
}

/// One persisted discount rule, held and returned verbatim
///
/// The typed collections are written by other admin surfaces, so this
/// layer treats record internals as opaque pass-through data: any JSON
/// shape survives the round trip unchanged. Only a string `createdAt` is
/// inspected, and only to order the merged listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiscountRecord(#[schema(value_type = Object)] pub Value);

impl DiscountRecord {
    /// Seconds since the epoch for ordering purposes
    ///
    /// Records without a parseable string `createdAt` sort as the epoch
    /// itself, which puts them at the front of the ascending merge.
    pub fn created_epoch(&self) -> i64 {
        self.0
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
            .unwrap_or(0)
    }
}

/// Parse the ISO-like timestamp formats the admin UI has produced
fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp());
    }
    None
}

/// One applicability clause of a discount rule
///
/// This is the canonical shape the intake sanitizer writes; stored
/// records are never re-validated against it on the way out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    /// Attribute being tested, e.g. "cart_quantity"
    #[serde(default)]
    pub field: String,

    /// Comparison applied to the attribute, e.g. "greater_than"
    #[serde(default)]
    pub operator: String,

    /// Comparison operand: integer, string, or a list of either
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: ConditionValue,
}

/// Canonical condition operand after sanitization
///
/// Numeric-looking inputs become integers, everything else a sanitized
/// string; lists are coerced element-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Int(i64),
    Text(String),
    List(Vec<ConditionValue>),
}

impl Default for ConditionValue {
    fn default() -> Self {
        ConditionValue::Text(String::new())
    }
}

/// Acknowledgement returned by the save endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct SaveAck {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Data saved successfully.")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_epoch_parses_rfc3339() {
        let record = DiscountRecord(json!({ "createdAt": "2024-03-01T12:00:00.000Z" }));
        assert_eq!(record.created_epoch(), 1_709_294_400);
    }

    #[test]
    fn created_epoch_parses_space_separated_format() {
        assert_eq!(parse_timestamp("2024-03-01 12:00:00"), Some(1_709_294_400));
        assert_eq!(parse_timestamp("2024-03-01"), Some(1_709_251_200));
    }

    #[test]
    fn created_epoch_defaults_to_zero() {
        assert_eq!(DiscountRecord(json!({})).created_epoch(), 0);
        assert_eq!(
            DiscountRecord(json!({ "createdAt": "not a date" })).created_epoch(),
            0
        );
        // non-string timestamps have no parseable form
        assert_eq!(
            DiscountRecord(json!({ "createdAt": 1_700_000_000 })).created_epoch(),
            0
        );
        assert_eq!(DiscountRecord(json!("not even an object")).created_epoch(), 0);
    }

    #[test]
    fn any_record_shape_round_trips_verbatim() {
        let shapes = [
            json!({
                "createdAt": "2024-03-01T12:00:00Z",
                "fpDiscountType": "percentage",
                "discountValue": 15.5,
                "conditions": [
                    { "field": "cart_quantity", "operator": "greater_than", "value": 5.5 }
                ]
            }),
            json!({ "createdAt": 1_700_000_000, "conditions": "oops" }),
            json!("stray entry"),
            json!(42),
        ];

        for shape in shapes {
            let record: DiscountRecord = serde_json::from_value(shape.clone()).unwrap();
            assert_eq!(serde_json::to_value(&record).unwrap(), shape);
        }
    }

    #[test]
    fn condition_defaults_missing_fields_to_empty() {
        let condition: Condition = serde_json::from_value(json!({})).unwrap();
        assert_eq!(condition.field, "");
        assert_eq!(condition.operator, "");
        assert_eq!(condition.value, ConditionValue::Text(String::new()));
    }
}
