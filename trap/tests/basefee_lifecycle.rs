//! End-to-end lifecycle through the public API: config from JSON, a trap
//! per deployment layout, an operator-style rolling buffer and an emitter.

use {
    assert_matches::assert_matches,
    basefee_trap::{
        emitter::{forward, Tee},
        BaseFeeTrap, LogEmitter, Payload, RecordingEmitter, SampleLayout, SequenceFeeSource,
        Spike, Trap, TrapConfig, TrapError,
    },
};

/// A day of base fees (gwei scaled to wei) with one congestion burst.
const FEES: [u64; 10] = [
    20_000_000_000,
    20_100_000_000,
    20_150_000_000,
    23_000_000_000,
    25_875_000_000,
    25_900_000_000,
    25_900_000_000,
    22_650_000_000,
    22_700_000_000,
    22_710_000_000,
];

struct Run {
    outcomes: Vec<Payload>,
    emitted: RecordingEmitter,
}

fn run(config: TrapConfig) -> Run {
    let trap = BaseFeeTrap::new(SequenceFeeSource::new(FEES.to_vec()), config).unwrap();
    let emitted = RecordingEmitter::new();
    let sink = Tee(LogEmitter, &emitted);
    let mut buffer: Vec<Vec<u8>> = Vec::new();
    let mut outcomes = Vec::new();

    for _ in FEES {
        buffer.insert(0, trap.collect().unwrap());
        buffer.truncate(2);
        let (triggered, payload) = trap.should_respond(&buffer).unwrap();
        forward(&sink, triggered, &payload);
        outcomes.push(Payload::classify(&payload).unwrap());
    }
    Run { outcomes, emitted }
}

#[test]
fn default_deployment_flags_the_burst() {
    let run = run(TrapConfig::default());

    assert_eq!(run.outcomes[0], Payload::NotEnoughData);
    assert_eq!(run.outcomes[1], Payload::Stable); // +0.5 %
    assert_eq!(run.outcomes[2], Payload::Stable); // +0.24 %
    assert_eq!(
        run.outcomes[3],
        Payload::Spike(Spike {
            current: 23_000_000_000,
            previous: 20_150_000_000,
            percent_change: 14,
        })
    );
    assert_matches!(run.outcomes[4], Payload::Spike(Spike { percent_change: 12, .. }));
    assert_eq!(run.outcomes[5], Payload::Stable);
    assert_eq!(run.outcomes[6], Payload::Stable);
    assert_matches!(run.outcomes[7], Payload::Spike(Spike { percent_change: 12, .. }));
    assert_eq!(run.outcomes[8], Payload::Stable);
    assert_eq!(run.outcomes[9], Payload::Stable);

    let events = run.emitted.events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|event| event.name == "BasefeeAlert"));
}

#[test]
fn json_configured_deployment() {
    let config: TrapConfig =
        serde_json::from_str(r#"{"version": 1, "threshold_pct": 13, "layout": "value-with-threshold"}"#)
            .unwrap();
    assert_eq!(config.layout, SampleLayout::ValueWithThreshold);

    let run = run(config);
    // Only the 14 % jump clears a 13 % threshold.
    assert_eq!(run.emitted.len(), 1);
    assert_matches!(
        run.outcomes[3],
        Payload::Spike(Spike { percent_change: 14, .. })
    );
}

#[test]
fn unsupported_config_version_is_rejected() {
    let config: TrapConfig = serde_json::from_str(r#"{"version": 0}"#).unwrap();
    assert_matches!(
        BaseFeeTrap::new(SequenceFeeSource::new(vec![]), config),
        Err(TrapError::InvalidConfig { .. })
    );
}
