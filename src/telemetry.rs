//! Telemetry line encoder for the serial link.

use core::fmt::Write as _;

use embedded_io_async::Write;
use heapless::String;

use crate::{Error, Result};

// Longest line: "65535,65535\r\n" (13 bytes).
const LINE_CAPACITY: usize = 16;

/// Encodes angle/sample pairs as `<angle>,<sample>\r\n` and writes them to an
/// outbound serial link, waiting on the link until every byte is accepted.
///
/// Fields are unsigned decimal ASCII with no leading zeros (zero itself
/// renders as `0`) and no fixed width; readers split on the comma, not on
/// column positions.
///
/// # Example
///
/// ```rust,no_run
/// use sweep_kit::telemetry::Telemetry;
///
/// async fn example(link: impl embedded_io_async::Write) -> sweep_kit::Result<()> {
///     let mut telemetry = Telemetry::new(link);
///     telemetry.emit(345, 4095).await // "345,4095\r\n"
/// }
/// ```
pub struct Telemetry<W> {
    link: W,
}

impl<W: Write> Telemetry<W> {
    /// Wrap an outbound serial link.
    pub fn new(link: W) -> Self {
        Self { link }
    }

    /// Emit one line pairing the tracked angle with the latest raw sample.
    ///
    /// Returns once the link has accepted the whole line, so lines from
    /// consecutive ticks never interleave.
    pub async fn emit(&mut self, angle: u16, sample: u16) -> Result<()> {
        let mut line: String<LINE_CAPACITY> = String::new();
        write!(line, "{angle},{sample}\r\n").map_err(|_| Error::TelemetryFormat)?;
        self.link
            .write_all(line.as_bytes())
            .await
            .map_err(|_| Error::TelemetryLink)?;
        Ok(())
    }

    /// Hand the link back, consuming the encoder.
    pub fn into_link(self) -> W {
        self.link
    }
}
