use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Malformed scale, domain, range or chart configuration.
    ///
    /// Fatal for the render pass that hit it.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A single datum cannot be placed under the current scale domains.
    ///
    /// Recovered locally: the datum is omitted and rendering continues.
    #[error("data point {index} skipped: {reason}")]
    DataPointSkipped { index: usize, reason: String },

    /// A component needs a scale the chart does not provide.
    #[error("missing {axis} scale")]
    MissingScale { axis: &'static str },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn skipped(index: usize, reason: impl Into<String>) -> Self {
        Self::DataPointSkipped {
            index,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors a renderer recovers from by omitting output.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DataPointSkipped { .. } | Self::MissingScale { .. }
        )
    }
}
