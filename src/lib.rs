//! Device abstractions for a continuous-rotation servo sweep scanner on the Pico 1 and 2.
//!
//! The scanner turns a range sensor on a continuous-rotation servo, one dwell
//! tick at a time, and streams `<angle>,<sample>` telemetry over a serial link.
//!
//! # Glossary
//!
//! - **Dwell tick:** how long the sweep loop holds a speed command before
//!   re-sampling (250 ms by default).
//! - **Pulse-width constant:** compare value (µs of a 20 ms
//!   [PWM](https://en.wikipedia.org/wiki/Pulse-width_modulation) frame) encoding
//!   a commanded direction/speed for the drive.
//! - **Sampling completion:** the asynchronous event that publishes a finished
//!   analog conversion to the sweep loop.
//! - **Telemetry line:** one transmitted record pairing the tracked angle with
//!   the most recent raw sensor reading.
#![cfg_attr(not(feature = "host"), no_std)]
#![cfg_attr(not(feature = "host"), no_main)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

// Compile-time check: the architecture feature must be selected (unless testing with host feature)
#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature");

pub mod angle;
pub mod drive;
mod error;
// Interrupt bindings shared by the sampler and the demo UART.
#[cfg(not(feature = "host"))]
#[doc(hidden)]
pub mod irqs;
pub mod sample;
// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod sampler;
pub mod sweep;
#[cfg(feature = "host")]
pub mod sweep_host;
pub mod telemetry;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
