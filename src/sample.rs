//! The sampling channel: hands one completed conversion at a time from the
//! completion side to the sweep loop.
//!
//! [`SampleSlot`] is the shared handoff; [`Sampler`] is the capability the
//! sweep loop polls. The hardware side lives in the `sampler` module, the test
//! side in `sweep_host`.

use portable_atomic::{AtomicBool, AtomicU16, Ordering};

/// One-shot single-producer/single-consumer handoff for a raw conversion result.
///
/// The completion side calls [`complete`](Self::complete); the single consumer
/// polls [`is_ready`](Self::is_ready) and claims the value with
/// [`take`](Self::take). The value store happens-before the ready flag becomes
/// observable, so the consumer never reads a half-published sample, on any
/// core count.
///
/// # Example
///
/// ```rust,no_run
/// use sweep_kit::sample::SampleSlot;
///
/// static SLOT: SampleSlot = SampleSlot::new();
///
/// SLOT.complete(1234);
/// assert!(SLOT.is_ready());
/// assert_eq!(SLOT.take(), Some(1234));
/// assert_eq!(SLOT.take(), None); // cleared by the first take
/// ```
pub struct SampleSlot {
    ready: AtomicBool,
    raw: AtomicU16,
}

impl SampleSlot {
    /// Create an empty slot. `const`, so a slot can live in a `static` shared
    /// with a device task.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            raw: AtomicU16::new(0),
        }
    }

    /// Publish a completed conversion result and set the ready flag.
    ///
    /// Completion side only. A result published before the previous one was
    /// consumed replaces it whole; it is never torn.
    pub fn complete(&self, raw: u16) {
        self.raw.store(raw, Ordering::Relaxed);
        // Release pairs with the acquire in `take`/`is_ready`: whoever sees the
        // flag also sees the value stored above.
        self.ready.store(true, Ordering::Release);
    }

    /// Whether a completed sample is pending consumption.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Claim the pending sample, clearing the ready flag in the same step.
    ///
    /// Returns `None` when no completed sample is pending, so a misplaced call
    /// is inert rather than a stale read.
    pub fn take(&self) -> Option<u16> {
        if self.ready.swap(false, Ordering::Acquire) {
            Some(self.raw.load(Ordering::Relaxed))
        } else {
            None
        }
    }
}

impl Default for SampleSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability the sweep loop uses to run analog conversions.
///
/// [`trigger`](Self::trigger) requests a new conversion; the result surfaces
/// through [`take`](Self::take) once the completion side finishes. Triggering
/// again while a conversion is pending must not corrupt the pending result.
pub trait Sampler {
    /// Request a new conversion.
    fn trigger(&mut self);

    /// Whether a completed sample is pending consumption.
    fn is_ready(&self) -> bool;

    /// Claim the pending sample, clearing the ready state.
    ///
    /// `None` when nothing has completed since the last take.
    fn take(&mut self) -> Option<u16>;
}

impl<T: Sampler + ?Sized> Sampler for &mut T {
    fn trigger(&mut self) {
        T::trigger(self);
    }

    fn is_ready(&self) -> bool {
        T::is_ready(self)
    }

    fn take(&mut self) -> Option<u16> {
        T::take(self)
    }
}
