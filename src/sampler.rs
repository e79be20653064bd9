//! Hardware sampling channel for the Pico ADC.
//!
//! The ADC lives inside [`sample_worker`], a device task that runs one
//! interrupt-driven conversion per trigger and publishes the result through a
//! [`SampleSlot`]. The sweep loop holds an [`AdcSampler`] and never touches
//! the peripheral directly.

use defmt::warn;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::sample::{SampleSlot, Sampler};

/// Trigger signal from the sweep loop to the conversion worker.
pub type TriggerSignal = Signal<CriticalSectionRawMutex, ()>;

/// Sampling channel backed by [`sample_worker`].
///
/// # Example
///
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use embassy_rp::adc::{Adc, Channel, Config};
/// use embassy_rp::gpio::Pull;
/// use sweep_kit::irqs::Irqs;
/// use sweep_kit::sample::{SampleSlot, Sampler};
/// use sweep_kit::sampler::{AdcSampler, TriggerSignal, sample_worker};
/// # use panic_probe as _;
///
/// static GO: TriggerSignal = TriggerSignal::new();
/// static SLOT: SampleSlot = SampleSlot::new();
///
/// async fn example(spawner: embassy_executor::Spawner) -> sweep_kit::Result<()> {
///     let p = embassy_rp::init(Default::default());
///     let adc = Adc::new(p.ADC, Irqs, Config::default());
///     let channel = Channel::new_pin(p.PIN_26, Pull::None); // ADC0
///     spawner
///         .spawn(sample_worker(adc, channel, &GO, &SLOT))
///         .map_err(sweep_kit::Error::TaskSpawn)?;
///
///     let mut sampler = AdcSampler::new(&GO, &SLOT);
///     sampler.trigger();
///     Ok(())
/// }
/// ```
pub struct AdcSampler {
    go: &'static TriggerSignal,
    slot: &'static SampleSlot,
}

impl AdcSampler {
    /// Create the loop-side handle.
    ///
    /// Spawn [`sample_worker`] with the same signal and slot; nothing
    /// completes until the worker is running.
    #[must_use]
    pub const fn new(go: &'static TriggerSignal, slot: &'static SampleSlot) -> Self {
        Self { go, slot }
    }
}

impl Sampler for AdcSampler {
    fn trigger(&mut self) {
        // Re-triggering while a conversion is in flight just re-arms the
        // worker; the pending result is replaced whole, never torn.
        self.go.signal(());
    }

    fn is_ready(&self) -> bool {
        self.slot.is_ready()
    }

    fn take(&mut self) -> Option<u16> {
        self.slot.take()
    }
}

/// Conversion worker: one conversion per trigger, result into the slot.
///
/// The completion side of the handoff. It performs no work besides the
/// conversion itself and never waits on the consumer, so a slow sweep loop
/// cannot back it up.
#[embassy_executor::task]
pub async fn sample_worker(
    mut adc: Adc<'static, Async>,
    mut channel: Channel<'static>,
    go: &'static TriggerSignal,
    slot: &'static SampleSlot,
) -> ! {
    loop {
        go.wait().await;
        match adc.read(&mut channel).await {
            Ok(raw) => slot.complete(raw),
            // A failed conversion leaves the slot empty; the sweep loop's
            // bounded wait reports it as a timeout.
            Err(e) => warn!("sample_worker: conversion failed: {}", e),
        }
    }
}
