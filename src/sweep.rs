//! The sweep loop: rotation sequencing and the top-level scan cycle.
//!
//! [`Sweeper`] is generic over its capabilities (speed control, sampling, the
//! serial link, a time source), so the whole loop runs unmodified against real
//! Pico peripherals or against the recording stand-ins used by the tests.

use core::convert::Infallible;

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;
use embedded_io_async::Write;

use crate::angle::AngleTracker;
use crate::drive::{Motion, SpeedControl};
use crate::sample::Sampler;
use crate::telemetry::Telemetry;
use crate::{Error, Result};

/// Poll interval while waiting for a conversion to complete (microseconds).
const SAMPLE_POLL_US: u32 = 50;

// ============================================================================
// SweepConfig - Timing and geometry
// ============================================================================

/// Timing and geometry for the sweep loop.
///
/// All tuning lives here as named values; nothing is read from flash or a
/// config file at runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub struct SweepConfig {
    /// How long each speed command is held before re-sampling.
    pub dwell_tick: Duration,
    /// Assumed angular displacement per dwell tick, in degrees.
    pub step_degrees: i16,
    /// Length of one full sweep in either direction.
    pub sweep_duration: Duration,
    /// Rest between sweeps.
    pub pause: Duration,
    /// Upper bound on the wait for a conversion to complete.
    pub sample_timeout: Duration,
}

impl SweepConfig {
    /// Timing matching the reference scanner: 250 ms dwell, 15° per tick, 6 s
    /// sweeps, 500 ms rests.
    pub const DEFAULT: Self = Self {
        dwell_tick: Duration::from_millis(250),
        step_degrees: 15,
        sweep_duration: Duration::from_millis(6000),
        pause: Duration::from_millis(500),
        sample_timeout: Duration::from_millis(100),
    };
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Sweeper - The control loop
// ============================================================================

/// The scan control loop: drive, sampler, telemetry and a time source,
/// sequenced one dwell tick at a time.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use embedded_hal_async::delay::DelayNs;
/// use embedded_io_async::Write;
/// use sweep_kit::Result;
/// use sweep_kit::drive::SpeedControl;
/// use sweep_kit::sample::Sampler;
/// use sweep_kit::sweep::{SweepConfig, Sweeper};
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_info: &PanicInfo) -> ! { loop {} }
///
/// async fn example(
///     drive: impl SpeedControl,
///     sampler: impl Sampler,
///     link: impl Write,
/// ) -> Result<()> {
///     let mut sweeper = Sweeper::new(
///         drive,
///         sampler,
///         link,
///         embassy_time::Delay,
///         SweepConfig::DEFAULT,
///     );
///     let err = sweeper.run().await.unwrap_err(); // runs until something fails
///     Err(err)
/// }
/// ```
pub struct Sweeper<C, S, W, D> {
    drive: C,
    sampler: S,
    telemetry: Telemetry<W>,
    delay: D,
    angle: AngleTracker,
    config: SweepConfig,
}

impl<C, S, W, D> Sweeper<C, S, W, D>
where
    C: SpeedControl,
    S: Sampler,
    W: Write,
    D: DelayNs,
{
    /// Assemble a sweeper from its capabilities.
    ///
    /// The tracked angle starts at 0° and persists across every rotation this
    /// sweeper runs; it is never reset mid-operation.
    pub fn new(drive: C, sampler: S, link: W, delay: D, config: SweepConfig) -> Self {
        Self {
            drive,
            sampler,
            telemetry: Telemetry::new(link),
            delay,
            angle: AngleTracker::new(config.step_degrees),
            config,
        }
    }

    /// Rotate in one direction for `duration`, sampling once per dwell tick.
    ///
    /// Runs `duration / dwell_tick` whole ticks; a remainder is dropped, not
    /// carried into the next call. Each tick holds the speed command for one
    /// dwell, runs one conversion, steps the tracked angle, and emits one
    /// telemetry line. Ticks are strictly sequential: a line is on the wire
    /// before the next tick begins, so lines arrive in step order.
    pub async fn rotate(&mut self, motion: Motion, duration: Duration) -> Result<()> {
        let steps = duration.as_millis() / self.config.dwell_tick.as_millis();
        for _ in 0..steps {
            self.drive.set_motion(motion);
            self.delay.delay_ms(millis_u32(self.config.dwell_tick)).await;

            self.sampler.trigger();
            let sample = self.wait_sample().await?;

            self.angle.advance(motion);
            self.telemetry.emit(self.angle.degrees(), sample).await?;
        }
        Ok(())
    }

    /// One full scan: reverse sweep, stop and rest, forward sweep, stop and
    /// rest.
    pub async fn cycle(&mut self) -> Result<()> {
        self.rotate(Motion::Reverse, self.config.sweep_duration).await?;
        self.drive.set_motion(Motion::Stop);
        self.delay.delay_ms(millis_u32(self.config.pause)).await;

        self.rotate(Motion::Forward, self.config.sweep_duration).await?;
        self.drive.set_motion(Motion::Stop);
        self.delay.delay_ms(millis_u32(self.config.pause)).await;

        Ok(())
    }

    /// Scan until something fails.
    ///
    /// There is no shutdown path. The only way out is an error (in practice
    /// [`Error::SampleTimeout`]), which callers surface; the demos panic on it.
    pub async fn run(&mut self) -> Result<Infallible> {
        loop {
            self.cycle().await?;
        }
    }

    /// Poll until the pending conversion result can be claimed.
    ///
    /// The wait is bounded: a completion that never arrives would otherwise
    /// stall the loop forever, so after `sample_timeout` the miss is reported
    /// as [`Error::SampleTimeout`] instead of being waited out.
    async fn wait_sample(&mut self) -> Result<u16> {
        let mut waited = Duration::from_ticks(0);
        loop {
            if self.sampler.is_ready() {
                if let Some(raw) = self.sampler.take() {
                    return Ok(raw);
                }
            }
            if waited >= self.config.sample_timeout {
                return Err(Error::SampleTimeout);
            }
            self.delay.delay_us(SAMPLE_POLL_US).await;
            waited += Duration::from_micros(u64::from(SAMPLE_POLL_US));
        }
    }
}

// DelayNs speaks u32 milliseconds; every duration in a SweepConfig is far
// below the cap, so saturation is fine.
fn millis_u32(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
