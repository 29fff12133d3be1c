//! Feed arbitrary bytes to every decoder the trap exposes to untrusted input.
//!
//! Goals:
//! - No panics from `Sample::decode`, `Payload::classify` or `should_respond`.
//! - Anything that decodes re-encodes to the exact same bytes.

#![no_main]

use {
    basefee_trap::{BaseFeeTrap, Payload, Sample, SampleLayout, SequenceFeeSource, Trap, TrapConfig},
    libfuzzer_sys::fuzz_target,
};

fuzz_target!(|data: &[u8]| {
    for layout in [SampleLayout::Value, SampleLayout::ValueWithThreshold] {
        if let Ok(sample) = Sample::decode(data, layout) {
            assert_eq!(sample.layout(), layout);
            assert_eq!(sample.encode(), data, "sample encoding is not canonical");
        }
    }

    if let Ok(payload) = Payload::classify(data) {
        assert_eq!(payload.to_bytes(), data, "payload encoding is not canonical");
    }

    // Split the input into two candidate samples and run the full rule.
    let mid = data.len() / 2;
    let entries = vec![data[..mid].to_vec(), data[mid..].to_vec()];
    for layout in [SampleLayout::Value, SampleLayout::ValueWithThreshold] {
        let config = TrapConfig {
            layout,
            ..Default::default()
        };
        let Ok(trap) = BaseFeeTrap::new(SequenceFeeSource::default(), config) else {
            return;
        };
        if let Ok((triggered, payload)) = trap.should_respond(&entries) {
            let classified = Payload::classify(&payload).expect("trap output must classify");
            assert_eq!(triggered, matches!(classified, Payload::Spike(_)));
        }
    }
});
