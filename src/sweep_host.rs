#![cfg(feature = "host")]
//! Recording and scripted stand-ins for the hardware capabilities, so the
//! sweep loop can run on the host platform without a Pico attached.

use core::convert::Infallible;
use std::collections::VecDeque;

use crate::drive::{DrivePulses, Motion, SpeedControl};
use crate::sample::{SampleSlot, Sampler};

/// Speed control that records every pulse-width write instead of touching PWM.
pub struct RecordingDrive {
    pulses: DrivePulses,
    /// Every commanded pulse width, in write order.
    pub writes: Vec<u16>,
}

impl RecordingDrive {
    /// Record against the given calibration.
    #[must_use]
    pub fn new(pulses: DrivePulses) -> Self {
        Self {
            pulses,
            writes: Vec::new(),
        }
    }

    /// The pulse width last written, if anything was commanded yet.
    #[must_use]
    pub fn last_write(&self) -> Option<u16> {
        self.writes.last().copied()
    }
}

impl SpeedControl for RecordingDrive {
    fn set_motion(&mut self, motion: Motion) {
        self.writes.push(self.pulses.pulse_us(motion));
    }
}

/// Sampler that completes a real [`SampleSlot`] from a script.
///
/// Each trigger consumes the next scripted value and publishes it as a
/// finished conversion. An exhausted script leaves the conversion incomplete
/// forever, which is how tests exercise the bounded wait.
pub struct ScriptedSampler {
    slot: SampleSlot,
    script: VecDeque<u16>,
    /// Number of triggers observed.
    pub triggers: usize,
}

impl ScriptedSampler {
    /// Respond to triggers with `results`, in order, then go silent.
    #[must_use]
    pub fn new<I: IntoIterator<Item = u16>>(results: I) -> Self {
        Self {
            slot: SampleSlot::new(),
            script: results.into_iter().collect(),
            triggers: 0,
        }
    }

    /// Respond to the next `len` triggers with the same value.
    #[must_use]
    pub fn constant(raw: u16, len: usize) -> Self {
        Self::new(core::iter::repeat(raw).take(len))
    }

    /// Never complete anything.
    #[must_use]
    pub fn silent() -> Self {
        Self::new([])
    }
}

impl Sampler for ScriptedSampler {
    fn trigger(&mut self) {
        self.triggers += 1;
        if let Some(raw) = self.script.pop_front() {
            self.slot.complete(raw);
        }
    }

    fn is_ready(&self) -> bool {
        self.slot.is_ready()
    }

    fn take(&mut self) -> Option<u16> {
        self.slot.take()
    }
}

/// In-memory telemetry link capturing every byte written.
#[derive(Default)]
pub struct CaptureLink {
    /// Raw bytes in write order.
    pub bytes: Vec<u8>,
}

impl CaptureLink {
    /// An empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured bytes as text (telemetry is ASCII).
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes).unwrap_or("<non-utf8>")
    }

    /// Captured telemetry lines, in emit order, CRLF terminators stripped.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        self.as_str()
            .split("\r\n")
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl embedded_io_async::ErrorType for CaptureLink {
    type Error = Infallible;
}

impl embedded_io_async::Write for CaptureLink {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Time source that returns immediately, accumulating the time it was asked
/// to spend.
#[derive(Default)]
pub struct InstantDelay {
    /// Total requested delay, nanoseconds.
    pub total_ns: u64,
}

impl InstantDelay {
    /// A fresh, zero-elapsed time source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl embedded_hal_async::delay::DelayNs for InstantDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
