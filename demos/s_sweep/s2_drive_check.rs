//! Drive bring-up check.
//!
//! No sensor, no telemetry: forward, stop, reverse, stop, on repeat. Useful
//! for finding a servo's real neutral point before trusting
//! `DrivePulses::DEFAULT`.

#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]

use embassy_executor::Spawner;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Timer;
use sweep_kit::drive::{Drive, DrivePulses, Motion, SpeedControl};
use {defmt::info, defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    // Same wiring as the scanner demo: drive on GPIO 2.
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, PwmConfig::default());
    let mut drive = Drive::new_output_a(pwm, DrivePulses::DEFAULT);

    loop {
        info!("forward");
        drive.set_motion(Motion::Forward);
        Timer::after_millis(1500).await;

        info!("stop");
        drive.set_motion(Motion::Stop);
        Timer::after_millis(500).await;

        info!("reverse");
        drive.set_motion(Motion::Reverse);
        Timer::after_millis(1500).await;

        info!("stop");
        drive.set_motion(Motion::Stop);
        Timer::after_millis(500).await;
    }
}
