//! Customer criteria model
//!
//! [`CustomerCriteria`] is the typed, validated form of one filter request.
//! It is built from the untyped JSON object a language model returns and
//! either comes out fully valid or fails with a [`ValidationError`] that
//! lists every violated field.
//!
//! Construction runs in a fixed order:
//!
//! 1. bare numbers become [`NumericCriterion`]s with `>=`
//! 2. categorical strings are lowercased
//! 3. numeric and percentage bounds are checked
//! 4. the result limit is validated, defaulting to 5 when absent or not an integer
//!
//! Fields the prompt did not mention stay `None`, so "absent" and "zero"
//! remain distinguishable downstream.

use crate::field::{FilterKind, LogicalField};
use crate::numeric::{format_number, NumericCriterion};
use crate::operator::CompareOp;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result limit used when the request does not state one
pub const DEFAULT_LIMIT: u32 = 5;

/// Smallest accepted result limit
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted result limit
pub const MAX_LIMIT: u32 = 20;

/// Key under which the result limit travels
const LIMIT_KEY: &str = "limit";

/// Why a single field was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// The criteria payload is not a JSON object
    NotAnObject,

    /// A numeric field holds something other than a number
    NotANumber {
        /// JSON type that was found
        found: String,
    },

    /// A text field holds something other than a string
    NotAString {
        /// JSON type that was found
        found: String,
    },

    /// The operator is outside `=`, `<`, `<=`, `>`, `>=`
    UnknownOperator(String),

    /// A numeric value lies outside the field's bounds
    OutOfRange {
        /// Offending value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound, if any
        max: Option<f64>,
    },

    /// The result limit is an integer outside [1, 20]; holds the number as written
    LimitOutOfRange(String),
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::NotAnObject => write!(f, "expected a JSON object"),
            ViolationKind::NotANumber { found } => write!(f, "expected a number, got {}", found),
            ViolationKind::NotAString { found } => write!(f, "expected a string, got {}", found),
            ViolationKind::UnknownOperator(op) => write!(
                f,
                "unknown operator '{}' (expected one of =, <, <=, >, >=)",
                op
            ),
            ViolationKind::OutOfRange { value, min, max: Some(max) } => write!(
                f,
                "{} is outside [{}, {}]",
                format_number(*value),
                format_number(*min),
                format_number(*max)
            ),
            ViolationKind::OutOfRange { value, min, max: None } => write!(
                f,
                "{} is below the minimum of {}",
                format_number(*value),
                format_number(*min)
            ),
            ViolationKind::LimitOutOfRange(limit) => write!(
                f,
                "limit {} is outside [{}, {}]",
                limit, MIN_LIMIT, MAX_LIMIT
            ),
        }
    }
}

/// One rejected field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    /// Key of the offending field as it appeared in the input
    pub field: String,
    /// What is wrong with it
    pub kind: ViolationKind,
}

impl FieldViolation {
    fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Criteria construction failed; every violated field is listed
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid criteria: {}", join_violations(.violations))]
pub struct ValidationError {
    /// All violations, in field order with the limit last
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Whether a given field key was rejected
    pub fn has_violation(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validated filter request for one prompt
///
/// Immutable once built: the only ways in are [`CustomerCriteria::from_json`],
/// [`CustomerCriteria::from_map`] and [`Default`] (every field absent, limit 5).
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerCriteria {
    text: BTreeMap<LogicalField, String>,
    numeric: BTreeMap<LogicalField, NumericCriterion>,
    limit: u32,
}

impl Default for CustomerCriteria {
    fn default() -> Self {
        Self {
            text: BTreeMap::new(),
            numeric: BTreeMap::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl CustomerCriteria {
    /// Build criteria from an untyped JSON value (must be an object)
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        match value.as_object() {
            Some(map) => Self::from_map(map),
            None => Err(ValidationError {
                violations: vec![FieldViolation::new("criteria", ViolationKind::NotAnObject)],
            }),
        }
    }

    /// Build criteria from an untyped JSON object
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        let mut criteria = CustomerCriteria::default();

        // 1. coerce every numeric field into value/operator form
        let mut coerced = Vec::new();
        for field in filterable_fields(FilterKind::Numeric) {
            if let Some((key, raw)) = lookup(map, field) {
                match coerce_numeric(raw) {
                    Ok(criterion) => coerced.push((field, key, criterion)),
                    Err(kind) => violations.push(FieldViolation::new(key, kind)),
                }
            }
        }

        // 2. text fields; categorical ones are lowercased
        for field in LogicalField::ALL {
            let kind = field.filter_kind();
            if kind != FilterKind::Substring && kind != FilterKind::Membership {
                continue;
            }
            if let Some((key, raw)) = lookup(map, field) {
                match raw {
                    Value::String(s) => {
                        let trimmed = s.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        let value = if is_categorical(field) {
                            trimmed.to_lowercase()
                        } else {
                            trimmed.to_string()
                        };
                        criteria.text.insert(field, value);
                    }
                    other => violations.push(FieldViolation::new(
                        key,
                        ViolationKind::NotAString {
                            found: json_type(other).to_string(),
                        },
                    )),
                }
            }
        }

        // 3. bounds
        for (field, key, criterion) in coerced {
            let (min, max) = if field.is_percentage() {
                (0.0, Some(100.0))
            } else {
                (0.0, None)
            };
            let below = criterion.value < min;
            let above = max.map_or(false, |m| criterion.value > m);
            if below || above {
                violations.push(FieldViolation::new(
                    key,
                    ViolationKind::OutOfRange {
                        value: criterion.value,
                        min,
                        max,
                    },
                ));
            } else {
                criteria.numeric.insert(field, criterion);
            }
        }

        // 4. limit
        match validate_limit(map.get(LIMIT_KEY)) {
            Ok(limit) => criteria.limit = limit,
            Err(kind) => violations.push(FieldViolation::new(LIMIT_KEY, kind)),
        }

        if violations.is_empty() {
            Ok(criteria)
        } else {
            violations.sort_by_key(|v| field_rank(&v.field));
            Err(ValidationError { violations })
        }
    }

    /// Text value of a substring or membership field
    pub fn text(&self, field: LogicalField) -> Option<&str> {
        self.text.get(&field).map(|s| s.as_str())
    }

    /// Numeric criterion of a numeric field
    pub fn numeric(&self, field: LogicalField) -> Option<NumericCriterion> {
        self.numeric.get(&field).copied()
    }

    /// Account owner (substring match)
    pub fn account_owner(&self) -> Option<&str> {
        self.text(LogicalField::AccountOwner)
    }

    /// Customer / tenant name (substring match)
    pub fn tenant(&self) -> Option<&str> {
        self.text(LogicalField::Tenant)
    }

    /// Industry, lowercased
    pub fn industry(&self) -> Option<&str> {
        self.text(LogicalField::Industry)
    }

    /// ERP system, lowercased
    pub fn erp_system(&self) -> Option<&str> {
        self.text(LogicalField::ErpSystem)
    }

    /// Product activation, lowercased
    pub fn product_activations(&self) -> Option<&str> {
        self.text(LogicalField::ProductActivations)
    }

    /// Invoice volume filter
    pub fn invoice_volume(&self) -> Option<NumericCriterion> {
        self.numeric(LogicalField::InvoiceVolume)
    }

    /// PO percentage filter
    pub fn po_percentage(&self) -> Option<NumericCriterion> {
        self.numeric(LogicalField::PoPercentage)
    }

    /// Non-PO percentage filter
    pub fn non_po_percentage(&self) -> Option<NumericCriterion> {
        self.numeric(LogicalField::NonPoPercentage)
    }

    /// PO touchless percentage filter
    pub fn po_touchless_percentage(&self) -> Option<NumericCriterion> {
        self.numeric(LogicalField::PoTouchlessPercentage)
    }

    /// Automatic distribution percentage filter
    pub fn automatic_distribution(&self) -> Option<NumericCriterion> {
        self.numeric(LogicalField::AutomaticDistribution)
    }

    /// Maximum number of records to return, always within [1, 20]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether no filter field is present
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.numeric.is_empty()
    }

    /// Number of filter fields present
    pub fn filter_count(&self) -> usize {
        self.text.len() + self.numeric.len()
    }

    /// Flat JSON form (logical names, numeric fields as value/operator)
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for field in LogicalField::ALL {
            if let Some(text) = self.text.get(&field) {
                map.insert(field.name().to_string(), Value::String(text.clone()));
            } else if let Some(c) = self.numeric.get(&field) {
                map.insert(
                    field.name().to_string(),
                    serde_json::json!({ "value": c.value, "operator": c.operator.as_str() }),
                );
            }
        }
        map.insert(LIMIT_KEY.to_string(), Value::from(self.limit));
        Value::Object(map)
    }
}

impl Serialize for CustomerCriteria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Log-friendly form: `industry=retail, invoice_volume=> 10000, limit=5`
impl fmt::Display for CustomerCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in LogicalField::ALL {
            if let Some(text) = self.text.get(&field) {
                write!(f, "{}={}, ", field, text)?;
            } else if let Some(c) = self.numeric.get(&field) {
                write!(f, "{}={}, ", field, c)?;
            }
        }
        write!(f, "limit={}", self.limit)
    }
}

/// Fields of a given filter kind, in field order
fn filterable_fields(kind: FilterKind) -> impl Iterator<Item = LogicalField> {
    LogicalField::ALL
        .into_iter()
        .filter(move |f| f.filter_kind() == kind)
}

/// Keys the model may use for a field; the canonical name comes first
fn keys_for(field: LogicalField) -> &'static [&'static str] {
    match field {
        LogicalField::AccountOwner => &["account_owner_text", "account_owner"],
        LogicalField::Tenant => &["tenant", "customer_name"],
        LogicalField::Industry => &["industry"],
        LogicalField::ErpSystem => &["erp_system"],
        LogicalField::ProductActivations => &["product_activations"],
        LogicalField::InvoiceVolume => &["invoice_volume"],
        LogicalField::PoPercentage => &["po_percentage"],
        LogicalField::NonPoPercentage => &["non_po_percentage"],
        LogicalField::PoTouchlessPercentage => &["po_touchless_percentage"],
        LogicalField::AutomaticDistribution => &["automatic_distribution"],
        LogicalField::AccountUrlLink | LogicalField::IsLatest | LogicalField::CustomerType => &[],
    }
}

/// Whether a key names a criteria field (or the limit)
pub fn is_criteria_key(key: &str) -> bool {
    key == LIMIT_KEY
        || LogicalField::ALL
            .iter()
            .any(|f| keys_for(*f).contains(&key))
}

/// Position of a key in field order; the limit sorts after every field
fn field_rank(key: &str) -> usize {
    LogicalField::ALL
        .iter()
        .position(|f| keys_for(*f).contains(&key))
        .unwrap_or(LogicalField::ALL.len())
}

/// First non-null value present under any of the field's keys
fn lookup<'a>(map: &'a Map<String, Value>, field: LogicalField) -> Option<(&'static str, &'a Value)> {
    keys_for(field)
        .iter()
        .find_map(|key| match map.get(*key) {
            Some(Value::Null) | None => None,
            Some(value) => Some((*key, value)),
        })
}

fn is_categorical(field: LogicalField) -> bool {
    matches!(
        field,
        LogicalField::Industry | LogicalField::ErpSystem | LogicalField::ProductActivations
    )
}

fn coerce_numeric(raw: &Value) -> Result<NumericCriterion, ViolationKind> {
    match raw {
        Value::Number(n) => number_value(n).map(NumericCriterion::at_least),
        Value::Object(obj) => {
            let value = match obj.get("value") {
                Some(Value::Number(n)) => number_value(n)?,
                Some(other) => {
                    return Err(ViolationKind::NotANumber {
                        found: json_type(other).to_string(),
                    })
                }
                None => {
                    return Err(ViolationKind::NotANumber {
                        found: "object without 'value'".to_string(),
                    })
                }
            };
            let operator = match obj.get("operator") {
                None | Some(Value::Null) => CompareOp::default(),
                Some(Value::String(s)) => CompareOp::parse(s)
                    .ok_or_else(|| ViolationKind::UnknownOperator(s.clone()))?,
                Some(other) => return Err(ViolationKind::UnknownOperator(other.to_string())),
            };
            Ok(NumericCriterion::new(value, operator))
        }
        other => Err(ViolationKind::NotANumber {
            found: json_type(other).to_string(),
        }),
    }
}

fn number_value(n: &serde_json::Number) -> Result<f64, ViolationKind> {
    n.as_f64().ok_or_else(|| ViolationKind::NotANumber {
        found: "unrepresentable number".to_string(),
    })
}

fn validate_limit(raw: Option<&Value>) -> Result<u32, ViolationKind> {
    let n = match raw {
        Some(Value::Number(n)) => n,
        // absent, null or wrong type
        _ => return Ok(DEFAULT_LIMIT),
    };
    let limit = if let Some(u) = n.as_u64() {
        u32::try_from(u).ok()
    } else if n.is_i64() {
        // negative
        None
    } else {
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 => {
                if f >= MIN_LIMIT as f64 && f <= MAX_LIMIT as f64 {
                    Some(f as u32)
                } else {
                    None
                }
            }
            _ => return Ok(DEFAULT_LIMIT),
        }
    };
    match limit {
        Some(limit) if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) => Ok(limit),
        _ => Err(ViolationKind::LimitOutOfRange(n.to_string())),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_default_is_empty_with_limit_five() {
        let criteria = CustomerCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.limit(), 5);
        assert_eq!(criteria.industry(), None);
        assert_eq!(criteria.invoice_volume(), None);
    }

    #[test]
    fn test_plain_number_becomes_ge_criterion() {
        let criteria = CustomerCriteria::from_json(&json!({ "invoice_volume": 10000 })).unwrap();
        assert_eq!(
            criteria.invoice_volume(),
            Some(NumericCriterion::new(10_000.0, CompareOp::Ge))
        );
    }

    #[test]
    fn test_operator_object_preserved() {
        let criteria = CustomerCriteria::from_json(&json!({
            "po_percentage": { "value": 30, "operator": "<" }
        }))
        .unwrap();
        assert_eq!(
            criteria.po_percentage(),
            Some(NumericCriterion::new(30.0, CompareOp::Lt))
        );
    }

    #[test]
    fn test_operator_object_without_operator_defaults() {
        let criteria =
            CustomerCriteria::from_json(&json!({ "non_po_percentage": { "value": 12 } })).unwrap();
        assert_eq!(criteria.non_po_percentage().unwrap().operator, CompareOp::Ge);
    }

    #[test]
    fn test_percentage_above_100_fails() {
        let err = CustomerCriteria::from_json(&json!({ "po_percentage": 101 })).unwrap_err();
        assert!(err.has_violation("po_percentage"));
        assert!(matches!(
            err.violations[0].kind,
            ViolationKind::OutOfRange { value, .. } if value == 101.0
        ));
    }

    #[test]
    fn test_negative_invoice_volume_fails_instead_of_clamping() {
        let err = CustomerCriteria::from_json(&json!({
            "invoice_volume": { "value": -5, "operator": ">" }
        }))
        .unwrap_err();
        assert!(err.has_violation("invoice_volume"));
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = CustomerCriteria::from_json(&json!({
            "po_percentage": 150,
            "automatic_distribution": { "value": -1, "operator": ">" },
            "invoice_volume": { "value": 10, "operator": "==" },
            "industry": 42,
            "limit": 25
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 5);
        for key in [
            "po_percentage",
            "automatic_distribution",
            "invoice_volume",
            "industry",
            "limit",
        ] {
            assert!(err.has_violation(key), "missing violation for {}", key);
        }
        let order: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            order,
            [
                "invoice_volume",
                "po_percentage",
                "automatic_distribution",
                "industry",
                "limit"
            ]
        );
        let message = err.to_string();
        assert!(message.contains("unknown operator '=='"));
        assert!(message.contains("limit 25 is outside [1, 20]"));
    }

    #[test]
    fn test_numeric_string_is_rejected() {
        let err = CustomerCriteria::from_json(&json!({ "invoice_volume": "10k" })).unwrap_err();
        assert_eq!(
            err.violations[0].kind,
            ViolationKind::NotANumber {
                found: "string".to_string()
            }
        );
    }

    #[test]
    fn test_categorical_fields_lowercased() {
        let criteria = CustomerCriteria::from_json(&json!({
            "industry": "Retail",
            "erp_system": "MS Dynamics",
            "product_activations": "Readsoft Invoices",
            "tenant": "Acme Corp"
        }))
        .unwrap();
        assert_eq!(criteria.industry(), Some("retail"));
        assert_eq!(criteria.erp_system(), Some("ms dynamics"));
        assert_eq!(criteria.product_activations(), Some("readsoft invoices"));
        // free-text fields keep their casing
        assert_eq!(criteria.tenant(), Some("Acme Corp"));
    }

    #[test]
    fn test_key_aliases() {
        let criteria = CustomerCriteria::from_json(&json!({
            "account_owner_text": "Jane Smith",
            "customer_name": "Globex"
        }))
        .unwrap();
        assert_eq!(criteria.account_owner(), Some("Jane Smith"));
        assert_eq!(criteria.tenant(), Some("Globex"));
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let criteria = CustomerCriteria::from_json(&json!({
            "tenant": "Initech",
            "customer_name": "Globex"
        }))
        .unwrap();
        assert_eq!(criteria.tenant(), Some("Initech"));
    }

    #[test]
    fn test_null_and_empty_are_absent() {
        let criteria = CustomerCriteria::from_json(&json!({
            "industry": null,
            "erp_system": "   ",
            "po_percentage": null,
            "limit": null
        }))
        .unwrap();
        assert!(criteria.is_empty());
        assert_eq!(criteria.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_zero_is_distinct_from_absent() {
        let criteria = CustomerCriteria::from_json(&json!({ "po_percentage": 0 })).unwrap();
        assert_eq!(criteria.po_percentage(), Some(NumericCriterion::at_least(0.0)));
        assert_eq!(criteria.non_po_percentage(), None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let criteria = CustomerCriteria::from_json(&json!({
            "revenue": 1_000_000,
            "account_url_link": "https://example.com",
            "industry": "retail"
        }))
        .unwrap();
        assert_eq!(criteria.filter_count(), 1);
        assert!(!is_criteria_key("revenue"));
        assert!(is_criteria_key("account_owner_text"));
        assert!(is_criteria_key("limit"));
    }

    #[test]
    fn test_limit_policy() {
        let limit = |v: Value| CustomerCriteria::from_json(&json!({ "limit": v }));
        assert_eq!(limit(json!(1)).unwrap().limit(), 1);
        assert_eq!(limit(json!(20)).unwrap().limit(), 20);
        assert_eq!(limit(json!(10.0)).unwrap().limit(), 10);
        assert_eq!(limit(json!("ten")).unwrap().limit(), DEFAULT_LIMIT);
        assert_eq!(limit(json!(2.5)).unwrap().limit(), DEFAULT_LIMIT);
        assert!(limit(json!(0)).is_err());
        assert!(limit(json!(25)).is_err());
        assert!(limit(json!(-3)).is_err());
        assert!(limit(json!(-4.0)).is_err());
    }

    #[test]
    fn test_oversized_integral_limit_is_rejected() {
        let limit = |v: Value| CustomerCriteria::from_json(&json!({ "limit": v }));
        for value in [json!(u64::MAX), json!(1e19), json!(i64::MIN), json!(4_294_967_297u64)] {
            let err = limit(value.clone()).unwrap_err();
            assert!(err.has_violation("limit"), "{} should be rejected", value);
        }
        let err = limit(json!(u64::MAX)).unwrap_err();
        assert_eq!(
            err.violations[0].kind,
            ViolationKind::LimitOutOfRange(u64::MAX.to_string())
        );
    }

    #[test]
    fn test_non_object_rejected() {
        let err = CustomerCriteria::from_json(&json!(["industry", "retail"])).unwrap_err();
        assert_eq!(err.violations[0].kind, ViolationKind::NotAnObject);
    }

    #[test]
    fn test_display_formats_numeric_fields() {
        let criteria = CustomerCriteria::from_json(&json!({
            "industry": "retail",
            "invoice_volume": { "value": 10000, "operator": ">" },
            "limit": 3
        }))
        .unwrap();
        assert_eq!(
            criteria.to_string(),
            "invoice_volume=> 10000, industry=retail, limit=3"
        );
    }

    #[test]
    fn test_to_json_round_trip() {
        let criteria = CustomerCriteria::from_json(&json!({
            "account_owner_text": "Jane",
            "po_touchless_percentage": { "value": 30, "operator": "<" },
            "erp_system": "sap",
            "limit": 7
        }))
        .unwrap();
        let rebuilt = CustomerCriteria::from_json(&criteria.to_json()).unwrap();
        assert_eq!(rebuilt, criteria);
    }

    proptest! {
        #[test]
        fn prop_plain_numbers_normalize_to_ge(n in 0u32..=100) {
            for field in LogicalField::ALL.into_iter().filter(|f| f.filter_kind() == FilterKind::Numeric) {
                let mut map = Map::new();
                map.insert(field.name().to_string(), json!(n));
                let criteria = CustomerCriteria::from_map(&map).unwrap();
                prop_assert_eq!(criteria.numeric(field), Some(NumericCriterion::new(n as f64, CompareOp::Ge)));
            }
        }

        #[test]
        fn prop_percentage_bounds(value in -1000.0f64..1000.0, op_idx in 0usize..5) {
            let op = CompareOp::ALL[op_idx];
            for field in LogicalField::PERCENTAGES {
                let mut map = Map::new();
                map.insert(field.name().to_string(), json!({ "value": value, "operator": op.as_str() }));
                let result = CustomerCriteria::from_map(&map);
                if (0.0..=100.0).contains(&value) {
                    prop_assert_eq!(result.unwrap().numeric(field), Some(NumericCriterion::new(value, op)));
                } else {
                    prop_assert!(result.unwrap_err().has_violation(field.name()));
                }
            }
        }

        #[test]
        fn prop_limit_always_in_bounds_when_accepted(limit in -50i64..50) {
            match CustomerCriteria::from_json(&json!({ "limit": limit })) {
                Ok(criteria) => {
                    prop_assert!((MIN_LIMIT..=MAX_LIMIT).contains(&criteria.limit()));
                    prop_assert_eq!(criteria.limit() as i64, limit);
                }
                Err(err) => {
                    prop_assert!(limit < 1 || limit > 20);
                    prop_assert!(err.has_violation("limit"));
                }
            }
        }
    }
}
