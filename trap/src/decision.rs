use {
    crate::{
        abi,
        config::{TrapConfig, WORD_SIZE},
        error::DecodeError,
        sample::Sample,
    },
    log::debug,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Payload when fewer than two samples are available.
pub const NOT_ENOUGH_DATA: &str = "Not enough data";
/// Payload when the baseline sample is zero and percent change is undefined.
pub const ZERO_BASELINE: &str = "Previous basefee is zero";
/// Payload when the change stays under the threshold.
pub const STABLE: &str = "Stable gas";
/// Label of the structured payload of a triggered decision.
pub const SPIKE_LABEL: &str = "Basefee spike";

/// Number of head words in a spike payload: string offset + three integers.
const SPIKE_HEAD_WORDS: usize = 4;
/// Byte offset of the label tail in a spike payload.
const SPIKE_HEAD_LEN: usize = SPIKE_HEAD_WORDS * WORD_SIZE;

/// Details of a triggered decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spike {
    pub current: u64,
    pub previous: u64,
    /// Truncated percent change relative to `previous`.
    pub percent_change: u128,
}

/// Explanatory payload attached to every [`Decision`].
///
/// The three non-spike variants are control information for downstream
/// automation, not free-form log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    NotEnoughData,
    ZeroBaseline,
    Stable,
    Spike(Spike),
}

impl Payload {
    /// Wire bytes of this payload.
    ///
    /// Sentinels are their raw UTF-8 text. A spike is
    /// `abi.encode(string label, uint256 current, uint256 previous, uint256 percent_change)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Payload::NotEnoughData => NOT_ENOUGH_DATA.as_bytes().to_vec(),
            Payload::ZeroBaseline => ZERO_BASELINE.as_bytes().to_vec(),
            Payload::Stable => STABLE.as_bytes().to_vec(),
            Payload::Spike(spike) => {
                let mut out = Vec::with_capacity(
                    SPIKE_HEAD_LEN
                        .saturating_add(WORD_SIZE)
                        .saturating_add(abi::padded_len(SPIKE_LABEL.len())),
                );
                out.extend_from_slice(&abi::encode_word(SPIKE_HEAD_LEN as u128));
                out.extend_from_slice(&abi::encode_word(u128::from(spike.current)));
                out.extend_from_slice(&abi::encode_word(u128::from(spike.previous)));
                out.extend_from_slice(&abi::encode_word(spike.percent_change));
                abi::append_string_tail(&mut out, SPIKE_LABEL);
                out
            }
        }
    }

    /// Map payload bytes back to a control variant or a decoded spike.
    ///
    /// Bytes that are neither a sentinel nor a well-formed spike tuple are
    /// rejected.
    pub fn classify(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes == NOT_ENOUGH_DATA.as_bytes() {
            return Ok(Payload::NotEnoughData);
        }
        if bytes == ZERO_BASELINE.as_bytes() {
            return Ok(Payload::ZeroBaseline);
        }
        if bytes == STABLE.as_bytes() {
            return Ok(Payload::Stable);
        }

        let offset = abi::decode_u64(bytes, 0)?;
        if offset != SPIKE_HEAD_LEN as u64 {
            return Err(DecodeError::InvalidStringOffset { offset });
        }
        let current = abi::decode_u64(bytes, 1)?;
        let previous = abi::decode_u64(bytes, 2)?;
        let percent_change = abi::decode_u128(bytes, 3)?;
        let label = abi::decode_string_tail(bytes, SPIKE_HEAD_LEN)?;
        if label != SPIKE_LABEL {
            return Err(DecodeError::UnknownLabel(label));
        }
        Ok(Payload::Spike(Spike {
            current,
            previous,
            percent_change,
        }))
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::NotEnoughData => write!(f, "{NOT_ENOUGH_DATA}"),
            Payload::ZeroBaseline => write!(f, "{ZERO_BASELINE}"),
            Payload::Stable => write!(f, "{STABLE}"),
            Payload::Spike(spike) => write!(
                f,
                "{SPIKE_LABEL}: {} -> {} wei ({}%)",
                spike.previous, spike.current, spike.percent_change
            ),
        }
    }
}

/// Outcome of the decision rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub triggered: bool,
    pub payload: Payload,
}

impl Decision {
    fn quiet(payload: Payload) -> Self {
        Self {
            triggered: false,
            payload,
        }
    }

    fn spike(spike: Spike) -> Self {
        Self {
            triggered: true,
            payload: Payload::Spike(spike),
        }
    }

    /// The `(bool, bytes)` pair returned to the operator.
    pub fn into_response(self) -> (bool, Vec<u8>) {
        (self.triggered, self.payload.to_bytes())
    }
}

/// Truncated percent change of `current` relative to `previous`.
///
/// ```text
/// percent_change = floor(|current - previous| * 100 / previous)
/// ```
///
/// Returns `None` when `previous` is zero. Runs in `u128`, so the full `u64`
/// range cannot overflow.
pub fn percent_change(current: u64, previous: u64) -> Option<u128> {
    let diff = u128::from(current.abs_diff(previous));
    diff.saturating_mul(100).checked_div(u128::from(previous))
}

/// Decide whether the newest pair of samples shows a base-fee spike.
///
/// `samples` is newest first: `samples[0]` is current, `samples[1]` is the
/// baseline. Anything past index 1 is ignored. The threshold that governs is
/// the baseline's embedded threshold when it carries one, otherwise
/// `config.threshold_pct`; the current sample's threshold is never consulted.
pub fn decide(samples: &[Sample], config: &TrapConfig) -> Decision {
    let [current, previous, ..] = samples else {
        debug!("decide: {} sample(s), need 2", samples.len());
        return Decision::quiet(Payload::NotEnoughData);
    };

    let Some(percent) = percent_change(current.value, previous.value) else {
        debug!("decide: zero baseline, current={}", current.value);
        return Decision::quiet(Payload::ZeroBaseline);
    };

    let threshold = previous.threshold.unwrap_or(config.threshold_pct);
    debug!(
        "decide: current={} previous={} percent_change={} threshold={}",
        current.value, previous.value, percent, threshold
    );

    if percent >= u128::from(threshold) {
        Decision::spike(Spike {
            current: current.value,
            previous: previous.value,
            percent_change: percent,
        })
    } else {
        Decision::quiet(Payload::Stable)
    }
}
