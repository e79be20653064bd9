#![allow(missing_docs)]
//! Host-level tests for the conversion handoff.

use sweep_kit::sample::{SampleSlot, Sampler};
use sweep_kit::sweep_host::ScriptedSampler;

#[test]
fn starts_empty() {
    let slot = SampleSlot::new();
    assert!(!slot.is_ready());
    assert_eq!(slot.take(), None);
}

#[test]
fn complete_sets_ready_and_take_clears_it() {
    let slot = SampleSlot::new();
    slot.complete(700);
    assert!(slot.is_ready());
    assert_eq!(slot.take(), Some(700));
    assert!(!slot.is_ready());
}

#[test]
fn take_without_completion_is_inert() {
    let slot = SampleSlot::new();
    slot.complete(700);
    assert_eq!(slot.take(), Some(700));
    // No stale re-read: a second take needs a new completion.
    assert_eq!(slot.take(), None);
    assert_eq!(slot.take(), None);
}

#[test]
fn unconsumed_completion_is_replaced_whole() {
    let slot = SampleSlot::new();
    slot.complete(100);
    slot.complete(200);
    assert_eq!(slot.take(), Some(200));
    assert_eq!(slot.take(), None);
}

#[test]
fn ready_holds_exactly_between_trigger_and_take() {
    let mut sampler = ScriptedSampler::new([500, 600]);
    assert!(!sampler.is_ready());

    sampler.trigger();
    assert!(sampler.is_ready());
    assert_eq!(sampler.take(), Some(500));
    assert!(!sampler.is_ready());
    assert_eq!(sampler.take(), None);

    sampler.trigger();
    assert_eq!(sampler.take(), Some(600));
    assert_eq!(sampler.triggers, 2);
}

#[test]
fn exhausted_script_never_completes() {
    let mut sampler = ScriptedSampler::silent();
    sampler.trigger();
    assert!(!sampler.is_ready());
    assert_eq!(sampler.take(), None);
}
