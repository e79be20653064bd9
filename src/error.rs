//! Error and result types shared across the crate.

use derive_more::{Display, Error};

/// Result type used throughout sweep-kit.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the sweep loop and the demo composition code.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// A conversion was triggered but no completion was observed within the
    /// configured sample timeout.
    #[display("analog conversion did not complete within the sample timeout")]
    SampleTimeout,

    /// A telemetry line did not fit its formatting buffer.
    #[display("telemetry line overflowed its buffer")]
    TelemetryFormat,

    /// The telemetry link rejected a write.
    #[display("telemetry link write failed")]
    TelemetryLink,

    /// Failed to spawn a device task.
    #[display("task spawn failed: {_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),
}
