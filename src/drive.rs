//! A device abstraction for continuous-rotation servo drives.
//!
//! A positional servo maps pulse width to shaft angle; a continuous-rotation
//! servo maps pulse width to direction and speed. [`Drive`] owns the PWM slice
//! and rewrites only the compare register as [`Motion`] commands arrive, so the
//! 50 Hz frame the hardware was configured with never changes mid-run.

#[cfg(not(feature = "host"))]
use defmt::info;
#[cfg(not(feature = "host"))]
use embassy_rp::clocks::clk_sys_freq;
#[cfg(not(feature = "host"))]
use embassy_rp::pwm::{Config, Pwm};

/// PWM frame length for hobby servo signals (microseconds).
pub const DRIVE_PERIOD_US: u16 = 20_000; // 20 ms, 50 Hz

// ============================================================================
// Motion - Commanded direction
// ============================================================================

/// Commanded direction for a continuous-rotation drive.
///
/// A closed set: every command maps to exactly one pulse-width write, so there
/// is no error path through the drive.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Motion {
    /// Rotate clockwise at full speed.
    Forward,
    /// Rotate counter-clockwise at full speed.
    Reverse,
    /// Hold at the calibrated neutral point.
    Stop,
}

// ============================================================================
// DrivePulses - Pulse-width calibration
// ============================================================================

/// Pulse-width calibration for a continuous-rotation drive, in microseconds of
/// a [`DRIVE_PERIOD_US`] frame.
///
/// These are tunable policy values for the attached hardware, not computed
/// ones; the neutral point in particular is per-servo calibration. Whatever
/// reads the PWM signal downstream depends on them staying put across firmware
/// revisions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub struct DrivePulses {
    /// Pulse width commanding full clockwise rotation.
    pub forward_us: u16,
    /// Pulse width commanding full counter-clockwise rotation.
    pub reverse_us: u16,
    /// Calibrated neutral pulse width (no rotation).
    pub stop_us: u16,
}

impl DrivePulses {
    /// Calibration matching the reference scanner servo.
    pub const DEFAULT: Self = Self {
        forward_us: 1400,
        reverse_us: 1750,
        stop_us: 1520,
    };

    /// The pulse width a motion command maps to.
    #[must_use]
    pub const fn pulse_us(&self, motion: Motion) -> u16 {
        match motion {
            Motion::Forward => self.forward_us,
            Motion::Reverse => self.reverse_us,
            Motion::Stop => self.stop_us,
        }
    }
}

impl Default for DrivePulses {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// SpeedControl - Capability seam
// ============================================================================

/// Capability the sweep loop uses to command drive speed.
pub trait SpeedControl {
    /// Command a direction/speed. Infallible: the mapping from [`Motion`] to a
    /// duty write is total.
    fn set_motion(&mut self, motion: Motion);
}

impl<T: SpeedControl + ?Sized> SpeedControl for &mut T {
    fn set_motion(&mut self, motion: Motion) {
        T::set_motion(self, motion);
    }
}

// ============================================================================
// Drive - Hardware device
// ============================================================================

/// A continuous-rotation servo drive on a PWM slice.
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use embassy_rp::pwm::{Config, Pwm};
/// use embassy_time::Timer;
/// use sweep_kit::drive::{Drive, DrivePulses, Motion, SpeedControl};
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_info: &PanicInfo) -> ! { loop {} }
/// async fn example(p: embassy_rp::Peripherals) {
///     // Drive on GPIO 2 (even pin maps to channel A of PWM slice 1).
///     let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, Config::default());
///     let mut drive = Drive::new_output_a(pwm, DrivePulses::DEFAULT);
///
///     drive.set_motion(Motion::Forward);
///     Timer::after_millis(500).await;
///     drive.set_motion(Motion::Stop);
///     drive.disable(); // release the output, let the shaft coast
/// }
/// ```
#[cfg(not(feature = "host"))]
pub struct Drive<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Store config to avoid recreating default (which resets divider)
    pulses: DrivePulses,
    channel: DriveChannel, // Track which channel (A or B) this drive uses
}

#[cfg(not(feature = "host"))]
#[derive(Debug, Clone, Copy)]
enum DriveChannel {
    A,
    B,
}

#[cfg(not(feature = "host"))]
impl<'d> Drive<'d> {
    /// Create a drive on a PWM output A channel.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn new_output_a(pwm: Pwm<'d>, pulses: DrivePulses) -> Self {
        Self::init(pwm, DriveChannel::A, pulses)
    }

    /// Create a drive on a PWM output B channel.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn new_output_b(pwm: Pwm<'d>, pulses: DrivePulses) -> Self {
        Self::init(pwm, DriveChannel::B, pulses)
    }

    /// Configure PWM for a 1 µs tick and come up stopped. Internal shared logic.
    fn init(mut pwm: Pwm<'d>, channel: DriveChannel, pulses: DrivePulses) -> Self {
        let clk = u64::from(clk_sys_freq()); // Hz
        // Aim for tick ≈ 1 µs: divider = clk_sys / 1_000_000
        let div_int = (clk / 1_000_000).clamp(1, 255) as u8;

        let top = DRIVE_PERIOD_US - 1; // 19999 -> 20_000 ticks/frame

        let mut cfg = Config::default();
        cfg.top = top;
        cfg.phase_correct = false; // edge-aligned => exact 1 µs steps
        cfg.divider = div_int.into();

        // Come up at the neutral point, not rotating.
        match channel {
            DriveChannel::A => cfg.compare_a = pulses.stop_us,
            DriveChannel::B => cfg.compare_b = pulses.stop_us,
        }

        cfg.enable = true; // Enable PWM output
        pwm.set_config(&cfg);

        info!(
            "drive clk={}Hz div={} top={} stop={}µs",
            clk, div_int, top, pulses.stop_us
        );

        Self {
            pwm,
            cfg,
            pulses,
            channel,
        }
    }

    /// Set raw pulse width in microseconds.
    ///
    /// NOTE: only update the *compare* register; do not reconfigure the slice.
    fn set_pulse_us(&mut self, us: u16) {
        match self.channel {
            DriveChannel::A => self.cfg.compare_a = us,
            DriveChannel::B => self.cfg.compare_b = us,
        }
        self.pwm.set_config(&self.cfg);
    }

    /// Stop sending control pulses.
    ///
    /// A continuous-rotation servo without a pulse train coasts; use
    /// [`Motion::Stop`] for an actively held stop.
    pub fn disable(&mut self) {
        self.cfg.enable = false;
        self.pwm.set_config(&self.cfg);
    }

    /// Resume control pulses at the last commanded motion.
    pub fn enable(&mut self) {
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);
    }
}

#[cfg(not(feature = "host"))]
impl SpeedControl for Drive<'_> {
    fn set_motion(&mut self, motion: Motion) {
        self.set_pulse_us(self.pulses.pulse_us(motion));
    }
}
