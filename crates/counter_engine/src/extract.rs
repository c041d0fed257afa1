use counter_core::Count;
use serde_json::{Number, Value};

use crate::{FailureKind, FetchError};

/// Field names the counting service has used for the count, in precedence order.
pub const COUNT_FIELDS: [&str; 3] = ["count", "visit_count", "visitor_count"];

/// Read the count from a decoded payload.
///
/// The first field of [`COUNT_FIELDS`] that is present and not `null` wins,
/// even when its value is `0`. Any JSON number is accepted. A winning field
/// that is not a number is a payload failure rather than a reason to try the
/// next field.
pub fn extract_count(payload: &Value) -> Result<Count, FetchError> {
    let object = payload.as_object().ok_or_else(|| {
        FetchError::new(FailureKind::NotAnObject, format!("payload was {payload}"))
    })?;

    let (field, value) = COUNT_FIELDS
        .iter()
        .find_map(|&field| {
            object
                .get(field)
                .filter(|value| !value.is_null())
                .map(|value| (field, value))
        })
        .ok_or_else(|| {
            FetchError::new(
                FailureKind::MissingCount,
                format!("expected one of {}", COUNT_FIELDS.join(", ")),
            )
        })?;

    let number = match value {
        Value::Number(number) => Some(number),
        _ => None,
    };
    number.and_then(count_from_number).ok_or_else(|| {
        FetchError::new(FailureKind::InvalidCount { field }, format!("{field} was {value}"))
    })
}

fn count_from_number(number: &Number) -> Option<Count> {
    if let Some(value) = number.as_u64() {
        return Some(Count::from(value));
    }
    if let Some(value) = number.as_i64() {
        return Some(Count::from(value));
    }
    number.as_f64().map(Count::from)
}
