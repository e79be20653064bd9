//! Shared interrupt bindings for the ADC and the demo UART.

use embassy_rp::peripherals::UART0;
use embassy_rp::{adc, bind_interrupts, uart};

bind_interrupts!(
    /// Interrupt handlers the sampler and the demo UART register.
    pub struct Irqs {
        ADC_IRQ_FIFO => adc::InterruptHandler;
        UART0_IRQ => uart::BufferedInterruptHandler<UART0>;
    }
);
