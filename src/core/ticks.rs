use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::format::{format_number, format_number_with_step, format_time};
use crate::core::scale::{ContinuousScale, Interpolation, ResolvedScale};
use crate::core::DataValue;

pub const DEFAULT_TICK_COUNT: usize = 10;

/// Upper bound on generated ticks; larger requested counts are capped.
pub const MAX_TICK_COUNT: usize = 1_000;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Label callback receiving the tick value and its index in the tick list.
pub type TickFormatter = Arc<dyn Fn(&DataValue, usize) -> String + Send + Sync>;

/// Labeled reference point along an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: DataValue,
    /// Pixel coordinate along the axis, always inside the scale range.
    pub position: f64,
    pub label: String,
}

#[derive(Clone, Default)]
pub struct TickOptions {
    /// Target tick count for continuous scales (defaults to 10, capped at
    /// [`MAX_TICK_COUNT`]).
    pub count: Option<usize>,
    pub formatter: Option<TickFormatter>,
    /// Explicit tick values; values the scale cannot place are dropped.
    pub values: Option<Vec<DataValue>>,
}

impl fmt::Debug for TickOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickOptions")
            .field("count", &self.count)
            .field("formatter", &self.formatter.is_some())
            .field("values", &self.values)
            .finish()
    }
}

impl TickOptions {
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_formatter(
        mut self,
        formatter: impl Fn(&DataValue, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: Vec<DataValue>) -> Self {
        self.values = Some(values);
        self
    }
}

/// Produces ticks ordered from the start of the scale range toward its end.
///
/// Continuous scales get "nice" values (1, 2 or 5 times a power of ten for
/// linear scales) restricted to the domain, so the actual count may differ
/// from the requested one. Discrete scales get one tick per domain value at
/// the band centre.
#[must_use]
pub fn generate_ticks(scale: &ResolvedScale, options: &TickOptions) -> Vec<Tick> {
    let count = options
        .count
        .unwrap_or(DEFAULT_TICK_COUNT)
        .min(MAX_TICK_COUNT);
    let candidates = match &options.values {
        Some(values) => values
            .iter()
            .filter(|value| within_domain(scale, value))
            .map(|value| (value.clone(), default_label(value, None)))
            .collect(),
        None => candidate_values(scale, count),
    };

    let (lo, hi) = scale.range_extent();
    candidates
        .into_iter()
        .filter_map(|(value, default)| {
            let position = scale.map_center(&value)?;
            Some((value, position.clamp(lo, hi), default))
        })
        .enumerate()
        .map(|(index, (value, position, default))| {
            let label = match &options.formatter {
                Some(formatter) => formatter(&value, index),
                None => default,
            };
            Tick {
                value,
                position,
                label,
            }
        })
        .collect()
}

/// Continuous scales only accept explicit values inside their domain.
fn within_domain(scale: &ResolvedScale, value: &DataValue) -> bool {
    match (scale, value.as_f64()) {
        (ResolvedScale::Continuous(continuous), Some(number)) => {
            let (d0, d1) = continuous.domain();
            d0.min(d1) <= number && number <= d0.max(d1)
        }
        _ => true,
    }
}

fn candidate_values(scale: &ResolvedScale, count: usize) -> Vec<(DataValue, String)> {
    match scale {
        ResolvedScale::Band(band) => band
            .domain()
            .map(|key| (DataValue::category(key), key.to_owned()))
            .collect(),
        ResolvedScale::Continuous(continuous) => continuous_candidates(*continuous, count),
    }
}

fn continuous_candidates(scale: ContinuousScale, count: usize) -> Vec<(DataValue, String)> {
    let (d0, d1) = scale.domain();
    match scale.interpolation() {
        Interpolation::Linear => {
            let step = tick_step(d0, d1, count as f64);
            linear_ticks(d0, d1, count as f64)
                .into_iter()
                .map(|value| (DataValue::Number(value), format_number_with_step(value, step)))
                .collect()
        }
        Interpolation::Log { base } => log_ticks(d0, d1, base, count)
            .into_iter()
            .map(|value| (DataValue::Number(value), format_number(value)))
            .collect(),
        Interpolation::Time => time_ticks(d0, d1, count)
            .into_iter()
            .filter_map(DataValue::from_unix_millis)
            .map(|value| {
                let label = default_label(&value, None);
                (value, label)
            })
            .collect(),
    }
}

fn default_label(value: &DataValue, step: Option<f64>) -> String {
    match (value, step) {
        (DataValue::Number(number), Some(step)) => format_number_with_step(*number, step),
        (DataValue::Number(number), None) => format_number(*number),
        (DataValue::Time(time), _) => format_time(*time),
        (DataValue::Category(category), _) => category.clone(),
    }
}

/// Returns `(first, last, increment)` where ticks are `first..=last` times
/// the increment; a negative increment means "divide by its magnitude".
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        inc = 10f64.powf(-power) / factor;
        i1 = (start * inc).round();
        i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        return (i1, i2, -inc);
    }

    inc = 10f64.powf(power) * factor;
    i1 = (start / inc).round();
    i2 = (stop / inc).round();
    if i1 * inc < start {
        i1 += 1.0;
    }
    if i2 * inc > stop {
        i2 -= 1.0;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nice tick values covering `[start, stop]`, in domain order.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let count = count.min(MAX_TICK_COUNT as f64);
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) || !inc.is_finite() {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    (0..n)
        .map(|i| {
            let i = i as f64;
            let k = if reverse { i2 - i } else { i1 + i };
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}

fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

/// Signed distance between adjacent nice ticks.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let inc = if reverse {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let magnitude = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -magnitude } else { magnitude }
}

/// Extends `domain` to nice round bounds; returns it unchanged when the
/// step does not settle.
#[must_use]
pub fn nice_linear_domain(domain: (f64, f64), count: usize) -> (f64, f64) {
    let reversed = domain.1 < domain.0;
    let (mut start, mut stop) = if reversed {
        (domain.1, domain.0)
    } else {
        domain
    };
    let count = count as f64;
    let mut previous_step = None;

    for _ in 0..10 {
        let step = tick_increment(start, stop, count);
        if previous_step == Some(step) {
            return if reversed { (stop, start) } else { (start, stop) };
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }
    domain
}

fn log_ticks(d0: f64, d1: f64, base: f64, count: usize) -> Vec<f64> {
    let reverse = d1 < d0;
    let (lo, hi) = if reverse { (d1, d0) } else { (d0, d1) };
    let negative = hi < 0.0;
    // Negative domains are generated on magnitudes and mirrored back.
    let (u, v) = if negative { (-hi, -lo) } else { (lo, hi) };
    let log = |value: f64| value.ln() / base.ln();
    let (mut i, mut j) = (log(u), log(v));

    let mut ticks = Vec::new();
    if base.fract() == 0.0 && j - i < count as f64 {
        i = i.floor();
        j = j.ceil();
        let mut exponent = i;
        'outer: while exponent <= j {
            let mut k = 1.0;
            while k < base {
                let t = if exponent < 0.0 {
                    k / base.powf(-exponent)
                } else {
                    k * base.powf(exponent)
                };
                k += 1.0;
                if t < u {
                    continue;
                }
                if t > v {
                    break 'outer;
                }
                ticks.push(t);
            }
            exponent += 1.0;
        }
        if ticks.len() * 2 < count {
            ticks = linear_ticks(u, v, count as f64);
        }
    } else {
        let target = (j - i).min(count as f64);
        ticks = linear_ticks(i, j, target)
            .into_iter()
            .map(|exponent| base.powf(exponent))
            .collect();
    }

    if negative {
        ticks = ticks.into_iter().rev().map(|t| -t).collect();
    }
    if reverse {
        ticks.reverse();
    }
    ticks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeInterval {
    Fixed(i64),
    Week,
    Months(i32),
    Years(i32),
}

const TIME_INTERVALS: [(TimeInterval, i64); 18] = [
    (TimeInterval::Fixed(SECOND_MS), SECOND_MS),
    (TimeInterval::Fixed(5 * SECOND_MS), 5 * SECOND_MS),
    (TimeInterval::Fixed(15 * SECOND_MS), 15 * SECOND_MS),
    (TimeInterval::Fixed(30 * SECOND_MS), 30 * SECOND_MS),
    (TimeInterval::Fixed(MINUTE_MS), MINUTE_MS),
    (TimeInterval::Fixed(5 * MINUTE_MS), 5 * MINUTE_MS),
    (TimeInterval::Fixed(15 * MINUTE_MS), 15 * MINUTE_MS),
    (TimeInterval::Fixed(30 * MINUTE_MS), 30 * MINUTE_MS),
    (TimeInterval::Fixed(HOUR_MS), HOUR_MS),
    (TimeInterval::Fixed(3 * HOUR_MS), 3 * HOUR_MS),
    (TimeInterval::Fixed(6 * HOUR_MS), 6 * HOUR_MS),
    (TimeInterval::Fixed(12 * HOUR_MS), 12 * HOUR_MS),
    (TimeInterval::Fixed(DAY_MS), DAY_MS),
    (TimeInterval::Fixed(2 * DAY_MS), 2 * DAY_MS),
    (TimeInterval::Week, WEEK_MS),
    (TimeInterval::Months(1), MONTH_MS),
    (TimeInterval::Months(3), 3 * MONTH_MS),
    (TimeInterval::Years(1), YEAR_MS),
];

fn choose_time_interval(lo: f64, hi: f64, count: usize) -> TimeInterval {
    let target = (hi - lo).abs() / count.max(1) as f64;
    let index = TIME_INTERVALS
        .iter()
        .take_while(|(_, duration)| (*duration as f64) <= target)
        .count();

    if index == TIME_INTERVALS.len() {
        let years = tick_step(lo / YEAR_MS as f64, hi / YEAR_MS as f64, count as f64);
        return TimeInterval::Years(years.abs().round().max(1.0) as i32);
    }
    if index == 0 {
        let millis = tick_step(lo, hi, count as f64).abs().round().max(1.0);
        return TimeInterval::Fixed(millis as i64);
    }

    let (below, below_ms) = TIME_INTERVALS[index - 1];
    let (above, above_ms) = TIME_INTERVALS[index];
    if target / (below_ms as f64) < (above_ms as f64) / target {
        below
    } else {
        above
    }
}

fn month_start_millis(year: i32, month0: i32) -> Option<i64> {
    let year = year + month0.div_euclid(12);
    let month = month0.rem_euclid(12) as u32 + 1;
    Some(
        NaiveDate::from_ymd_opt(year, month, 1)?
            .and_hms_opt(0, 0, 0)?
            .and_utc()
            .timestamp_millis(),
    )
}

impl TimeInterval {
    fn floor(self, millis: i64) -> Option<i64> {
        match self {
            Self::Fixed(step) => Some(millis.div_euclid(step) * step),
            Self::Week => {
                // 1970-01-01 was a Thursday; weeks start on Sunday.
                let days = millis.div_euclid(DAY_MS);
                let since_sunday = (days + 4).rem_euclid(7);
                Some((days - since_sunday) * DAY_MS)
            }
            Self::Months(every) => {
                let time = DateTime::<Utc>::from_timestamp_millis(millis)?;
                let month0 = time.month0() as i32;
                month_start_millis(time.year(), month0 - month0.rem_euclid(every))
            }
            Self::Years(every) => {
                let time = DateTime::<Utc>::from_timestamp_millis(millis)?;
                month_start_millis(time.year() - time.year().rem_euclid(every), 0)
            }
        }
    }

    fn next(self, aligned: i64) -> Option<i64> {
        match self {
            Self::Fixed(step) => Some(aligned + step),
            Self::Week => Some(aligned + WEEK_MS),
            Self::Months(every) => {
                let time = DateTime::<Utc>::from_timestamp_millis(aligned)?;
                month_start_millis(time.year(), time.month0() as i32 + every)
            }
            Self::Years(every) => {
                let time = DateTime::<Utc>::from_timestamp_millis(aligned)?;
                month_start_millis(time.year() + every, 0)
            }
        }
    }

    fn ceil(self, millis: i64) -> Option<i64> {
        let floor = self.floor(millis)?;
        if floor < millis { self.next(floor) } else { Some(floor) }
    }
}

fn time_ticks(d0: f64, d1: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let reverse = d1 < d0;
    let (lo, hi) = if reverse { (d1, d0) } else { (d0, d1) };
    let interval = choose_time_interval(lo, hi, count);

    let mut ticks = Vec::new();
    let mut cursor = interval.ceil(lo.ceil() as i64);
    while let Some(millis) = cursor {
        if millis as f64 > hi || ticks.len() >= MAX_TICK_COUNT {
            break;
        }
        ticks.push(millis as f64);
        cursor = interval.next(millis);
    }
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Extends a millisecond domain outward to the boundaries of the interval
/// that tick generation would pick for it.
#[must_use]
pub fn nice_time_domain(domain: (f64, f64), count: usize) -> (f64, f64) {
    let reversed = domain.1 < domain.0;
    let (lo, hi) = if reversed {
        (domain.1, domain.0)
    } else {
        domain
    };
    let interval = choose_time_interval(lo, hi, count);
    let (Some(lo_nice), Some(hi_nice)) = (
        interval.floor(lo.floor() as i64),
        interval.ceil(hi.ceil() as i64),
    ) else {
        return domain;
    };
    let (lo, hi) = (lo_nice as f64, hi_nice as f64);
    if reversed { (hi, lo) } else { (lo, hi) }
}
