#![allow(missing_docs)]
//! Host-level tests for the sweep loop: tick counts, ordering, angle
//! progression, and the bounded sample wait.

use embassy_futures::block_on;
use embassy_time::Duration;
use sweep_kit::Error;
use sweep_kit::drive::{DrivePulses, Motion, SpeedControl};
use sweep_kit::sweep::{SweepConfig, Sweeper};
use sweep_kit::sweep_host::{CaptureLink, InstantDelay, RecordingDrive, ScriptedSampler};

const PULSES: DrivePulses = DrivePulses::DEFAULT;

#[test]
fn line_count_is_whole_ticks_with_remainder_dropped() {
    for (duration_ms, expected_lines) in [(6000, 24), (6100, 24), (250, 1), (249, 0), (0, 0)] {
        let mut drive = RecordingDrive::new(PULSES);
        let mut sampler = ScriptedSampler::constant(2048, expected_lines);
        let mut link = CaptureLink::new();
        let mut sweeper = Sweeper::new(
            &mut drive,
            &mut sampler,
            &mut link,
            InstantDelay::new(),
            SweepConfig::DEFAULT,
        );
        block_on(sweeper.rotate(Motion::Forward, Duration::from_millis(duration_ms)))
            .expect("scripted rotation cannot time out");
        drop(sweeper);

        assert_eq!(link.lines().len(), expected_lines, "{duration_ms} ms");
        assert_eq!(sampler.triggers, expected_lines, "{duration_ms} ms");
    }
}

#[test]
fn reverse_sweep_counts_down_from_345_and_lands_on_zero() {
    let mut drive = RecordingDrive::new(PULSES);
    let mut sampler = ScriptedSampler::constant(700, 24);
    let mut link = CaptureLink::new();
    let mut delay = InstantDelay::new();
    let mut sweeper = Sweeper::new(
        &mut drive,
        &mut sampler,
        &mut link,
        &mut delay,
        SweepConfig::DEFAULT,
    );
    block_on(sweeper.rotate(Motion::Reverse, Duration::from_millis(6000)))
        .expect("scripted rotation cannot time out");
    drop(sweeper);

    let lines = link.lines();
    assert_eq!(lines.len(), 24);
    for (step, line) in lines.iter().enumerate() {
        // 345, 330, ..., 15, 0: down 15° per tick, wrapped at the 0 boundary.
        let expected_angle = 345 - 15 * step as i32;
        assert_eq!(*line, format!("{expected_angle},700"));
    }
    assert_eq!(*lines.last().expect("24 lines"), "0,700");

    // One speed command per tick, all at the reverse pulse width.
    assert_eq!(drive.writes.len(), 24);
    assert!(drive.writes.iter().all(|&us| us == PULSES.reverse_us));

    // Each tick dwelt the full 250 ms before sampling.
    assert!(delay.total_ns >= 24 * 250_000_000);
}

#[test]
fn forward_sweep_wraps_through_zero() {
    let mut drive = RecordingDrive::new(PULSES);
    let mut sampler = ScriptedSampler::constant(700, 24);
    let mut link = CaptureLink::new();
    let mut sweeper = Sweeper::new(
        &mut drive,
        &mut sampler,
        &mut link,
        InstantDelay::new(),
        SweepConfig::DEFAULT,
    );
    block_on(sweeper.rotate(Motion::Forward, Duration::from_millis(6000)))
        .expect("scripted rotation cannot time out");
    drop(sweeper);

    let lines = link.lines();
    assert_eq!(lines.len(), 24);
    for (step, line) in lines.iter().enumerate() {
        // 15, 30, ..., 345, 0: up 15° per tick, wrapping on the last one.
        let expected_angle = (15 + 15 * step as i32) % 360;
        assert_eq!(*line, format!("{expected_angle},700"));
    }
}

#[test]
fn samples_are_reported_in_trigger_order() {
    let mut drive = RecordingDrive::new(PULSES);
    let mut sampler = ScriptedSampler::new([10, 20, 30, 40]);
    let mut link = CaptureLink::new();
    let mut sweeper = Sweeper::new(
        &mut drive,
        &mut sampler,
        &mut link,
        InstantDelay::new(),
        SweepConfig::DEFAULT,
    );
    block_on(sweeper.rotate(Motion::Forward, Duration::from_millis(1000)))
        .expect("scripted rotation cannot time out");
    drop(sweeper);

    assert_eq!(link.lines(), vec!["15,10", "30,20", "45,30", "60,40"]);
}

#[test]
fn angle_persists_across_rotation_calls() {
    let mut drive = RecordingDrive::new(PULSES);
    let mut sampler = ScriptedSampler::constant(700, 8);
    let mut link = CaptureLink::new();
    let mut sweeper = Sweeper::new(
        &mut drive,
        &mut sampler,
        &mut link,
        InstantDelay::new(),
        SweepConfig::DEFAULT,
    );
    block_on(async {
        sweeper
            .rotate(Motion::Forward, Duration::from_millis(1000))
            .await?;
        sweeper
            .rotate(Motion::Forward, Duration::from_millis(1000))
            .await
    })
    .expect("scripted rotation cannot time out");
    drop(sweeper);

    // The second call picks up at 75°, not back at 15°.
    assert_eq!(
        link.lines(),
        vec![
            "15,700", "30,700", "45,700", "60,700", "75,700", "90,700", "105,700", "120,700"
        ]
    );
}

#[test]
fn cycle_sweeps_both_ways_and_rests_at_neutral() {
    let mut drive = RecordingDrive::new(PULSES);
    let mut sampler = ScriptedSampler::constant(2048, 48);
    let mut link = CaptureLink::new();
    let mut sweeper = Sweeper::new(
        &mut drive,
        &mut sampler,
        &mut link,
        InstantDelay::new(),
        SweepConfig::DEFAULT,
    );
    block_on(sweeper.cycle()).expect("scripted cycle cannot time out");
    drop(sweeper);

    assert_eq!(link.lines().len(), 48);
    assert_eq!(sampler.triggers, 48);

    // 24 reverse commands, a stop, 24 forward commands, a stop.
    assert_eq!(drive.writes.len(), 50);
    assert!(drive.writes[..24].iter().all(|&us| us == PULSES.reverse_us));
    assert_eq!(drive.writes[24], PULSES.stop_us);
    assert!(drive.writes[25..49].iter().all(|&us| us == PULSES.forward_us));
    assert_eq!(drive.writes[49], PULSES.stop_us);
    assert_eq!(drive.last_write(), Some(PULSES.stop_us));
}

#[test]
fn repeated_stop_commands_leave_the_duty_unchanged() {
    let mut drive = RecordingDrive::new(PULSES);
    drive.set_motion(Motion::Stop);
    let after_first = drive.last_write();
    drive.set_motion(Motion::Stop);
    drive.set_motion(Motion::Stop);

    assert_eq!(after_first, Some(PULSES.stop_us));
    assert_eq!(drive.last_write(), after_first);
    assert!(drive.writes.iter().all(|&us| us == PULSES.stop_us));
}

#[test]
fn silent_sampler_reports_a_timeout_instead_of_stalling() {
    let mut drive = RecordingDrive::new(PULSES);
    let mut sampler = ScriptedSampler::silent();
    let mut link = CaptureLink::new();
    let mut sweeper = Sweeper::new(
        &mut drive,
        &mut sampler,
        &mut link,
        InstantDelay::new(),
        SweepConfig::DEFAULT,
    );
    let err = block_on(sweeper.rotate(Motion::Reverse, Duration::from_millis(6000)))
        .expect_err("no completion ever arrives");
    drop(sweeper);

    assert!(matches!(err, Error::SampleTimeout));
    // Nothing was consumed, so nothing was reported.
    assert!(link.lines().is_empty());
}
