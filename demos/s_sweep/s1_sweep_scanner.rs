//! The full sweep scanner.
//!
//! Continuous-rotation servo on GPIO 2, range sensor on GPIO 26 (ADC0),
//! telemetry on UART0 (TX on GPIO 0) at 9600 baud. Sweeps counter-clockwise
//! for 6 seconds, rests, sweeps back, forever.

#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use core::convert::Infallible;
use core::panic;

use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::Pull;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedUart, Config as UartConfig};
use embassy_time::Delay;
use static_cell::StaticCell;
use sweep_kit::drive::{Drive, DrivePulses};
use sweep_kit::irqs::Irqs;
use sweep_kit::sample::SampleSlot;
use sweep_kit::sampler::{AdcSampler, TriggerSignal, sample_worker};
use sweep_kit::sweep::{SweepConfig, Sweeper};
use sweep_kit::{Error, Result};
use {defmt::info, defmt_rtt as _, panic_probe as _};

const TELEMETRY_BAUD: u32 = 9600;

static GO: TriggerSignal = TriggerSignal::new();
static SLOT: SampleSlot = SampleSlot::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Drive on GPIO 2 (even pin -> channel A of PWM slice 1).
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, PwmConfig::default());
    let drive = Drive::new_output_a(pwm, DrivePulses::DEFAULT);

    // The conversion worker owns the ADC; the sweep loop only triggers it.
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let channel = Channel::new_pin(p.PIN_26, Pull::None);
    spawner
        .spawn(sample_worker(adc, channel, &GO, &SLOT))
        .map_err(Error::TaskSpawn)?;
    let sampler = AdcSampler::new(&GO, &SLOT);

    // Telemetry on UART0, 9600 8N1. RX is unused but comes with the pair.
    static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = TELEMETRY_BAUD;
    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        TX_BUF.init([0; 64]),
        RX_BUF.init([0; 16]),
        uart_config,
    );
    let (tx, _rx) = uart.split();

    info!("sweep scanner up, streaming at {} baud", TELEMETRY_BAUD);

    let mut sweeper = Sweeper::new(drive, sampler, tx, Delay, SweepConfig::DEFAULT);
    sweeper.run().await
}
