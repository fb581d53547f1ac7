use chrono::{DateTime, Utc};
use indexmap::IndexSet;

use crate::core::{DataValue, ScaleDomain, ScaleKind};
use crate::error::{ChartError, ChartResult};

/// Half-width used to open up a time domain whose data sits at one instant.
const DEGENERATE_TIME_PAD_MS: f64 = 60_000.0;

/// Derives a scale domain from data values.
///
/// Continuous kinds take `[min, max]` of the numeric values (optionally
/// widened to include zero), discrete kinds take the distinct categories in
/// first-seen order. Without data a continuous kind falls back to a unit
/// domain; a discrete kind has nothing to fall back to and fails.
pub(crate) fn derive_domain<'a>(
    kind: ScaleKind,
    values: impl IntoIterator<Item = &'a DataValue>,
    include_zero: bool,
    axis: &'static str,
) -> ChartResult<ScaleDomain> {
    if kind.is_discrete() {
        let categories: IndexSet<String> =
            values.into_iter().map(DataValue::category_key).collect();
        if categories.is_empty() {
            return Err(ChartError::Config(format!(
                "{axis} {kind:?} scale has no domain and no data to derive one from"
            )));
        }
        return Ok(ScaleDomain::Discrete(categories.into_iter().collect()));
    }

    let mut bounds: Option<(f64, f64)> = None;
    for value in values.into_iter().filter_map(DataValue::as_f64) {
        if !value.is_finite() || (kind == ScaleKind::Log && value == 0.0) {
            continue;
        }
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }
    if include_zero && kind == ScaleKind::Linear {
        bounds = bounds.map(|(lo, hi)| (lo.min(0.0), hi.max(0.0)));
    }

    let (lo, hi) = match (bounds, kind) {
        (Some(bounds), _) => widen_degenerate(bounds, kind),
        (None, ScaleKind::Log) => (1.0, 10.0),
        (None, ScaleKind::Time) => (0.0, DEGENERATE_TIME_PAD_MS * 2.0),
        (None, _) => (0.0, 1.0),
    };

    if kind == ScaleKind::Time {
        let start = millis_to_datetime(lo, axis)?;
        let end = millis_to_datetime(hi, axis)?;
        return Ok(ScaleDomain::Time { start, end });
    }
    Ok(ScaleDomain::Continuous { min: lo, max: hi })
}

fn widen_degenerate((lo, hi): (f64, f64), kind: ScaleKind) -> (f64, f64) {
    if lo < hi {
        return (lo, hi);
    }
    let pad = match kind {
        ScaleKind::Time => DEGENERATE_TIME_PAD_MS,
        _ if lo == 0.0 => 1.0,
        _ => lo.abs() * 0.1,
    };
    (lo - pad, hi + pad)
}

fn millis_to_datetime(millis: f64, axis: &'static str) -> ChartResult<DateTime<Utc>> {
    match DataValue::from_unix_millis(millis) {
        Some(DataValue::Time(time)) => Ok(time),
        _ => Err(ChartError::Config(format!(
            "{axis} time domain bound {millis} is out of range"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::derive_domain;
    use crate::core::{DataValue, ScaleDomain, ScaleKind};

    #[test]
    fn discrete_domain_keeps_first_seen_order() {
        let values = [
            DataValue::category("b"),
            DataValue::category("a"),
            DataValue::category("b"),
        ];
        let domain = derive_domain(ScaleKind::Band, &values, false, "x").expect("domain");
        assert_eq!(domain, ScaleDomain::discrete(["b", "a"]));
    }

    #[test]
    fn include_zero_extends_positive_data() {
        let values = [DataValue::Number(3.0), DataValue::Number(7.0)];
        let domain = derive_domain(ScaleKind::Linear, &values, true, "y").expect("domain");
        assert_eq!(domain, ScaleDomain::Continuous { min: 0.0, max: 7.0 });
    }

    #[test]
    fn single_value_is_widened() {
        let values = [DataValue::Number(5.0)];
        let domain = derive_domain(ScaleKind::Linear, &values, false, "y").expect("domain");
        assert_eq!(domain, ScaleDomain::Continuous { min: 4.5, max: 5.5 });
    }

    #[test]
    fn empty_band_data_is_a_config_error() {
        let empty: [DataValue; 0] = [];
        assert!(derive_domain(ScaleKind::Band, &empty, false, "x").is_err());
    }
}
