use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ticks::{nice_linear_domain, nice_time_domain};
use crate::core::value::datetime_to_unix_millis;
use crate::core::DataValue;
use crate::error::{ChartError, ChartResult};

/// Scale family requested by a [`ScaleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    /// Affine mapping over a numeric interval.
    #[default]
    Linear,
    /// Affine mapping in logarithm space (domain must not cross zero).
    Log,
    /// Affine mapping over UTC timestamps.
    Time,
    /// Equal-width buckets, one per discrete domain value.
    Band,
    /// Evenly spaced points, one per discrete domain value.
    Ordinal,
}

impl ScaleKind {
    #[must_use]
    pub fn is_discrete(self) -> bool {
        matches!(self, Self::Band | Self::Ordinal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleDomain {
    Continuous { min: f64, max: f64 },
    Time { start: DateTime<Utc>, end: DateTime<Utc> },
    Discrete(Vec<String>),
}

impl ScaleDomain {
    #[must_use]
    pub fn discrete<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Discrete(values.into_iter().map(Into::into).collect())
    }

    fn numeric_bounds(&self) -> Option<(f64, f64)> {
        match self {
            Self::Continuous { min, max } => Some((*min, *max)),
            Self::Time { start, end } => Some((
                datetime_to_unix_millis(*start),
                datetime_to_unix_millis(*end),
            )),
            Self::Discrete(_) => None,
        }
    }
}

/// Spacing controls for band and ordinal scales, as fractions of one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPadding {
    /// Gap between adjacent bands, in `[0, 1)`.
    pub inner: f64,
    /// Gap before the first and after the last band. Defaults to `inner`.
    #[serde(default)]
    pub outer: Option<f64>,
    /// Distribution of leftover space before the first band, in `[0, 1]`.
    pub align: f64,
}

impl Default for BandPadding {
    fn default() -> Self {
        Self {
            inner: 0.0,
            outer: None,
            align: 0.5,
        }
    }
}

impl BandPadding {
    #[must_use]
    pub fn uniform(padding: f64) -> Self {
        Self {
            inner: padding,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn outer(self) -> f64 {
        self.outer.unwrap_or(self.inner)
    }

    fn validate(self) -> ChartResult<Self> {
        if !self.inner.is_finite() || !(0.0..1.0).contains(&self.inner) {
            return Err(ChartError::config(format!(
                "band inner padding must be in [0, 1), got {}",
                self.inner
            )));
        }
        let outer = self.outer();
        if !outer.is_finite() || outer < 0.0 {
            return Err(ChartError::config(format!(
                "band outer padding must be finite and >= 0, got {outer}"
            )));
        }
        if !self.align.is_finite() || !(0.0..=1.0).contains(&self.align) {
            return Err(ChartError::config(format!(
                "band align must be in [0, 1], got {}",
                self.align
            )));
        }
        Ok(self)
    }
}

/// Declarative description of one axis scale. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub kind: ScaleKind,
    #[serde(default)]
    pub domain: Option<ScaleDomain>,
    #[serde(default)]
    pub range: Option<(f64, f64)>,
    #[serde(default)]
    pub padding: BandPadding,
    /// Extend continuous domains to round bounds before mapping.
    #[serde(default)]
    pub nice: bool,
    /// Clamp continuous output to the range.
    #[serde(default)]
    pub clamp: bool,
    #[serde(default = "default_log_base")]
    pub log_base: f64,
}

fn default_log_base() -> f64 {
    10.0
}

impl ScaleConfig {
    #[must_use]
    pub fn new(kind: ScaleKind) -> Self {
        Self {
            kind,
            domain: None,
            range: None,
            padding: BandPadding::default(),
            nice: false,
            clamp: false,
            log_base: default_log_base(),
        }
    }

    #[must_use]
    pub fn linear(min: f64, max: f64) -> Self {
        Self::new(ScaleKind::Linear).with_domain(ScaleDomain::Continuous { min, max })
    }

    #[must_use]
    pub fn log(min: f64, max: f64) -> Self {
        Self::new(ScaleKind::Log).with_domain(ScaleDomain::Continuous { min, max })
    }

    #[must_use]
    pub fn time(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(ScaleKind::Time).with_domain(ScaleDomain::Time { start, end })
    }

    #[must_use]
    pub fn band<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ScaleKind::Band).with_domain(ScaleDomain::discrete(values))
    }

    #[must_use]
    pub fn ordinal<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ScaleKind::Ordinal).with_domain(ScaleDomain::discrete(values))
    }

    #[must_use]
    pub fn with_domain(mut self, domain: ScaleDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: BandPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    #[must_use]
    pub fn with_log_base(mut self, base: f64) -> Self {
        self.log_base = base;
        self
    }
}

/// Either a declarative scale config or an already resolved scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleSource {
    Config(ScaleConfig),
    Prebuilt(ResolvedScale),
}

impl From<ScaleConfig> for ScaleSource {
    fn from(value: ScaleConfig) -> Self {
        Self::Config(value)
    }
}

impl From<ResolvedScale> for ScaleSource {
    fn from(value: ResolvedScale) -> Self {
        Self::Prebuilt(value)
    }
}

impl ScaleSource {
    pub fn resolve(self) -> ChartResult<ResolvedScale> {
        match self {
            Self::Config(config) => resolve(&config),
            Self::Prebuilt(scale) => Ok(scale),
        }
    }
}

/// Interpolation family of a continuous scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpolation {
    Linear,
    Log { base: f64 },
    Time,
}

/// Continuous scale over a numeric (or millisecond timestamp) interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousScale {
    interpolation: Interpolation,
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl ContinuousScale {
    fn new(
        interpolation: Interpolation,
        domain: (f64, f64),
        range: (f64, f64),
        clamp: bool,
    ) -> ChartResult<Self> {
        let (d0, d1) = domain;
        if !d0.is_finite() || !d1.is_finite() || d0 == d1 {
            return Err(ChartError::config(format!(
                "continuous domain must be finite and non-empty, got [{d0}, {d1}]"
            )));
        }
        if let Interpolation::Log { base } = interpolation {
            if !base.is_finite() || base <= 1.0 {
                return Err(ChartError::config(format!(
                    "log base must be finite and > 1, got {base}"
                )));
            }
            if d0 * d1 <= 0.0 {
                return Err(ChartError::config(format!(
                    "log domain must not include or cross zero, got [{d0}, {d1}]"
                )));
            }
        }
        Ok(Self {
            interpolation,
            domain,
            range,
            clamp,
        })
    }

    #[must_use]
    pub fn interpolation(self) -> Interpolation {
        self.interpolation
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    fn transform(self, value: f64) -> Option<f64> {
        match self.interpolation {
            Interpolation::Linear | Interpolation::Time => Some(value),
            Interpolation::Log { base } => {
                let negative_domain = self.domain.0 < 0.0;
                if value == 0.0 || (value < 0.0) != negative_domain {
                    return None;
                }
                let magnitude = value.abs().ln() / base.ln();
                Some(if negative_domain { -magnitude } else { magnitude })
            }
        }
    }

    fn untransform(self, value: f64) -> f64 {
        match self.interpolation {
            Interpolation::Linear | Interpolation::Time => value,
            Interpolation::Log { base } => {
                if self.domain.0 < 0.0 {
                    -base.powf(-value)
                } else {
                    base.powf(value)
                }
            }
        }
    }

    /// Maps a domain value to a pixel. Values outside the domain extrapolate
    /// unless the scale clamps.
    #[must_use]
    pub fn map(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let t0 = self.transform(self.domain.0)?;
        let t1 = self.transform(self.domain.1)?;
        let mut normalized = (self.transform(value)? - t0) / (t1 - t0);
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        let (r0, r1) = self.range;
        Some(r0 + normalized * (r1 - r0))
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> Option<f64> {
        let (r0, r1) = self.range;
        if !pixel.is_finite() || r0 == r1 {
            return None;
        }
        let mut normalized = (pixel - r0) / (r1 - r0);
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        let t0 = self.transform(self.domain.0)?;
        let t1 = self.transform(self.domain.1)?;
        Some(self.untransform(t0 + normalized * (t1 - t0)))
    }
}

/// Band (or point) scale over an ordered set of categories.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: IndexSet<String>,
    range: (f64, f64),
    step: f64,
    bandwidth: f64,
    first_start: f64,
    ordinal: bool,
}

impl PartialEq for BandScale {
    fn eq(&self, other: &Self) -> bool {
        self.domain.iter().eq(other.domain.iter())
            && self.range == other.range
            && self.step == other.step
            && self.bandwidth == other.bandwidth
            && self.first_start == other.first_start
            && self.ordinal == other.ordinal
    }
}

impl BandScale {
    fn new(
        values: &[String],
        range: (f64, f64),
        padding: BandPadding,
        ordinal: bool,
    ) -> ChartResult<Self> {
        if values.is_empty() {
            return Err(ChartError::config("discrete domain must not be empty"));
        }
        let mut domain = IndexSet::with_capacity(values.len());
        for value in values {
            if !domain.insert(value.clone()) {
                return Err(ChartError::config(format!(
                    "discrete domain contains duplicate value `{value}`"
                )));
            }
        }

        // Point scales are band scales whose buckets have collapsed to zero width.
        let (inner, outer) = if ordinal {
            let checked = BandPadding {
                inner: 0.0,
                outer: Some(padding.outer.unwrap_or(0.0)),
                align: padding.align,
            }
            .validate()?;
            (1.0, checked.outer())
        } else {
            let padding = padding.validate()?;
            (padding.inner, padding.outer())
        };

        let n = domain.len() as f64;
        let (r0, r1) = range;
        let (lo, hi) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
        let span = hi - lo;
        let step = span / (n - inner + outer * 2.0).max(1.0);
        let first_start = lo + (span - step * (n - inner)) * padding.align;
        let bandwidth = step * (1.0 - inner);

        Ok(Self {
            domain,
            range,
            step,
            bandwidth,
            first_start,
            ordinal,
        })
    }

    #[must_use]
    pub fn domain(&self) -> impl ExactSizeIterator<Item = &str> {
        self.domain.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn is_ordinal(&self) -> bool {
        self.ordinal
    }

    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.domain.get_index_of(key)
    }

    /// Pixel where the band at `index` starts (left or top edge).
    #[must_use]
    pub fn band_start(&self, index: usize) -> Option<f64> {
        if index >= self.domain.len() {
            return None;
        }
        let slot = if self.range.1 < self.range.0 {
            self.domain.len() - 1 - index
        } else {
            index
        };
        Some(self.first_start + self.step * slot as f64)
    }

    #[must_use]
    pub fn band_center(&self, index: usize) -> Option<f64> {
        self.band_start(index).map(|start| start + self.bandwidth * 0.5)
    }

    #[must_use]
    pub fn map(&self, key: &str) -> Option<f64> {
        self.index_of(key).and_then(|index| self.band_start(index))
    }

    /// Category whose band (or nearest point) contains `pixel`.
    #[must_use]
    pub fn invert(&self, pixel: f64) -> Option<&str> {
        if !pixel.is_finite() {
            return None;
        }
        let (lo, hi) = if self.range.0 <= self.range.1 {
            (self.range.0, self.range.1)
        } else {
            (self.range.1, self.range.0)
        };
        if pixel < lo || pixel > hi {
            return None;
        }
        (0..self.domain.len())
            .filter_map(|index| Some((index, self.band_center(index)?)))
            .min_by(|left, right| {
                (left.1 - pixel).abs().total_cmp(&(right.1 - pixel).abs())
            })
            .and_then(|(index, _)| self.domain.get_index(index).map(String::as_str))
    }
}

/// Callable data → pixel mapping produced by [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedScale {
    Continuous(ContinuousScale),
    Band(BandScale),
}

impl ResolvedScale {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Continuous(scale) => match scale.interpolation {
                Interpolation::Linear => ScaleKind::Linear,
                Interpolation::Log { .. } => ScaleKind::Log,
                Interpolation::Time => ScaleKind::Time,
            },
            Self::Band(scale) if scale.ordinal => ScaleKind::Ordinal,
            Self::Band(_) => ScaleKind::Band,
        }
    }

    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Band(_))
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Continuous(scale) => scale.range,
            Self::Band(scale) => scale.range,
        }
    }

    /// Width of one band; zero for continuous and ordinal scales.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Continuous(_) => 0.0,
            Self::Band(scale) => scale.bandwidth,
        }
    }

    /// Maps a data value to a pixel.
    ///
    /// Band scales return the band start, matching the convention that bars
    /// span `[map(x), map(x) + bandwidth]`; use [`Self::map_center`] for marks
    /// centred in their band. Returns `None` for values a discrete scale does
    /// not know or that a continuous scale cannot interpret.
    #[must_use]
    pub fn map(&self, value: &DataValue) -> Option<f64> {
        match self {
            Self::Continuous(scale) => scale.map(value.as_f64()?),
            Self::Band(scale) => scale.map(&value.category_key()),
        }
    }

    #[must_use]
    pub fn map_center(&self, value: &DataValue) -> Option<f64> {
        self.map(value).map(|start| start + self.bandwidth() * 0.5)
    }

    #[must_use]
    pub fn map_number(&self, value: f64) -> Option<f64> {
        match self {
            Self::Continuous(scale) => scale.map(value),
            Self::Band(scale) => scale.map(&DataValue::Number(value).category_key()),
        }
    }

    #[must_use]
    pub fn invert(&self, pixel: f64) -> Option<DataValue> {
        match self {
            Self::Continuous(scale) => {
                let value = scale.invert(pixel)?;
                match scale.interpolation {
                    Interpolation::Time => DataValue::from_unix_millis(value),
                    _ => Some(DataValue::Number(value)),
                }
            }
            Self::Band(scale) => scale.invert(pixel).map(DataValue::category),
        }
    }

    #[must_use]
    pub fn as_continuous(&self) -> Option<ContinuousScale> {
        match self {
            Self::Continuous(scale) => Some(*scale),
            Self::Band(_) => None,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(scale) => Some(scale),
            Self::Continuous(_) => None,
        }
    }

    /// Returns `(min, max)` of the pixel range regardless of its direction.
    #[must_use]
    pub fn range_extent(&self) -> (f64, f64) {
        let (r0, r1) = self.range();
        if r0 <= r1 { (r0, r1) } else { (r1, r0) }
    }
}

/// Resolves a scale configuration into a callable mapping.
pub fn resolve(config: &ScaleConfig) -> ChartResult<ResolvedScale> {
    let range = validate_range(config.range)?;
    let domain = config
        .domain
        .as_ref()
        .ok_or_else(|| ChartError::config(format!("{:?} scale requires a domain", config.kind)))?;

    let resolved = match config.kind {
        ScaleKind::Band | ScaleKind::Ordinal => {
            let ScaleDomain::Discrete(values) = domain else {
                return Err(ChartError::config(format!(
                    "{:?} scale requires a discrete domain",
                    config.kind
                )));
            };
            ResolvedScale::Band(BandScale::new(
                values,
                range,
                config.padding,
                config.kind == ScaleKind::Ordinal,
            )?)
        }
        ScaleKind::Linear | ScaleKind::Log | ScaleKind::Time => {
            let bounds = domain.numeric_bounds().ok_or_else(|| {
                ChartError::config(format!(
                    "{:?} scale requires a numeric or time domain",
                    config.kind
                ))
            })?;
            let interpolation = match config.kind {
                ScaleKind::Log => Interpolation::Log {
                    base: config.log_base,
                },
                ScaleKind::Time => Interpolation::Time,
                _ => Interpolation::Linear,
            };
            // Validate before niceing so malformed input is reported as given.
            let scale = ContinuousScale::new(interpolation, bounds, range, config.clamp)?;
            if config.nice {
                let niced = match interpolation {
                    Interpolation::Linear => nice_linear_domain(bounds, 10),
                    Interpolation::Log { base } => nice_log_domain(bounds, base),
                    Interpolation::Time => nice_time_domain(bounds, 10),
                };
                ResolvedScale::Continuous(ContinuousScale::new(
                    interpolation,
                    niced,
                    range,
                    config.clamp,
                )?)
            } else {
                ResolvedScale::Continuous(scale)
            }
        }
    };

    debug!(kind = ?config.kind, range = ?range, nice = config.nice, "resolved scale");
    Ok(resolved)
}

fn validate_range(range: Option<(f64, f64)>) -> ChartResult<(f64, f64)> {
    let (r0, r1) = range.ok_or_else(|| ChartError::config("scale requires a pixel range"))?;
    if !r0.is_finite() || !r1.is_finite() || r0 == r1 {
        return Err(ChartError::config(format!(
            "scale range must be finite and non-empty, got [{r0}, {r1}]"
        )));
    }
    Ok((r0, r1))
}

fn nice_log_domain(domain: (f64, f64), base: f64) -> (f64, f64) {
    let (d0, d1) = domain;
    let reversed = d1 < d0;
    let (lo, hi) = if reversed { (d1, d0) } else { (d0, d1) };
    let floor_pow = |value: f64| {
        let sign = value.signum();
        sign * base.powf((value.abs().ln() / base.ln()).floor())
    };
    let ceil_pow = |value: f64| {
        let sign = value.signum();
        sign * base.powf((value.abs().ln() / base.ln()).ceil())
    };
    let (lo, hi) = if lo > 0.0 {
        (floor_pow(lo), ceil_pow(hi))
    } else {
        (ceil_pow(lo), floor_pow(hi))
    };
    if reversed { (hi, lo) } else { (lo, hi) }
}
