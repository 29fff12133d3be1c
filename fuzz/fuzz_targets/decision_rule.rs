//! Fuzz the decision rule with arbitrary fee pairs and thresholds.
//!
//! Goals:
//! - Find panics or overflows in the percent computation.
//! - Verify the trigger agrees with an independent u128 computation.
//! - Verify the payload always round-trips through `Payload::classify`.

#![no_main]

use {
    arbitrary::{Arbitrary, Unstructured},
    basefee_trap::{decide, Payload, Sample, TrapConfig},
    libfuzzer_sys::fuzz_target,
};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    current: u64,
    previous: u64,
    config_threshold: u64,
    embedded_threshold: Option<u64>,
    extra_samples: u8,
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let input: FuzzInput = match u.arbitrary() {
        Ok(i) => i,
        Err(_) => return,
    };

    let previous = match input.embedded_threshold {
        Some(threshold) => Sample::with_threshold(input.previous, threshold),
        None => Sample::new(input.previous),
    };
    let mut samples = vec![Sample::new(input.current), previous];
    // Samples beyond the newest two must never change the outcome.
    samples.extend((0..input.extra_samples).map(|i| Sample::new(u64::from(i))));

    let config = TrapConfig::with_threshold(input.config_threshold);
    let decision = decide(&samples, &config);
    assert_eq!(decision, decide(&samples[..2], &config));

    let threshold = input.embedded_threshold.unwrap_or(input.config_threshold);
    let expected = if input.previous == 0 {
        Payload::ZeroBaseline
    } else {
        let diff = u128::from(input.current.abs_diff(input.previous));
        let percent = diff * 100 / u128::from(input.previous);
        if percent >= u128::from(threshold) {
            Payload::Spike(basefee_trap::Spike {
                current: input.current,
                previous: input.previous,
                percent_change: percent,
            })
        } else {
            Payload::Stable
        }
    };
    assert_eq!(decision.payload, expected);
    assert_eq!(decision.triggered, matches!(expected, Payload::Spike(_)));

    let bytes = decision.payload.to_bytes();
    assert_eq!(Payload::classify(&bytes).expect("payload must classify"), expected);
});
