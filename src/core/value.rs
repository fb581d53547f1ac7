use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Raw data value accepted on either chart axis.
///
/// Continuous scales consume numbers and timestamps (as unix milliseconds);
/// band and ordinal scales consume categories. Numbers are also accepted by
/// discrete scales through their default string form, so `x: 1` matches a
/// band domain entry `"1"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Time(DateTime<Utc>),
    Category(String),
}

impl DataValue {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    #[must_use]
    pub fn category(value: impl Into<String>) -> Self {
        Self::Category(value.into())
    }

    pub fn from_decimal(value: Decimal) -> ChartResult<Self> {
        value.to_f64().map(Self::Number).ok_or_else(|| {
            ChartError::InvalidData("decimal value cannot be represented as f64".to_owned())
        })
    }

    #[must_use]
    pub fn from_unix_millis(millis: f64) -> Option<Self> {
        if !millis.is_finite() {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(millis.round() as i64).map(Self::Time)
    }

    /// Numeric representation used by continuous scales.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Time(time) => Some(datetime_to_unix_millis(*time)),
            Self::Category(_) => None,
        }
    }

    /// Key used by discrete scales to look a value up in their domain.
    #[must_use]
    pub fn category_key(&self) -> String {
        match self {
            Self::Category(value) => value.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Time(time) => write!(f, "{}", time.to_rfc3339()),
            Self::Category(value) => f.write_str(value),
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DataValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Category(value.to_owned())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

impl From<DateTime<Utc>> for DataValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

#[cfg(test)]
mod tests {
    use super::DataValue;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    #[test]
    fn numbers_use_display_form_as_category_key() {
        assert_eq!(DataValue::from(3).category_key(), "3");
        assert_eq!(DataValue::from(2.5).category_key(), "2.5");
        assert_eq!(DataValue::from("apple").category_key(), "apple");
    }

    #[test]
    fn time_values_are_unix_millis_for_continuous_scales() {
        let time = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).single().expect("valid");
        let value = DataValue::from(time);
        assert_eq!(value.as_f64(), Some(1_577_836_800_000.0));
        assert_eq!(DataValue::from_unix_millis(1_577_836_800_000.0), Some(value));
    }

    #[test]
    fn decimal_conversion_keeps_value() {
        let value = DataValue::from_decimal(Decimal::new(1234, 2)).expect("decimal");
        assert_eq!(value.as_f64(), Some(12.34));
    }

    #[test]
    fn untagged_json_round_trips_by_shape() {
        let parsed: Vec<DataValue> =
            serde_json::from_str(r#"[1.5, "a"]"#).expect("parse values");
        assert_eq!(parsed, vec![DataValue::Number(1.5), DataValue::category("a")]);
    }
}
