use {
    crate::{abi, config::SampleLayout, error::DecodeError},
    serde::{Deserialize, Serialize},
};

/// One snapshot of the monitored base fee.
///
/// A sample is produced once per `collect()` call and never mutated. The
/// operator keeps the encoded bytes in its rolling buffer; the decision
/// rule decodes them again on `should_respond()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Base fee in wei at sampling time.
    pub value: u64,

    /// Percent threshold carried alongside the value.
    /// `Some` only for samples in the [`SampleLayout::ValueWithThreshold`] layout.
    pub threshold: Option<u64>,
}

impl Sample {
    /// A sample in the [`SampleLayout::Value`] layout.
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            threshold: None,
        }
    }

    /// A sample in the [`SampleLayout::ValueWithThreshold`] layout.
    pub const fn with_threshold(value: u64, threshold: u64) -> Self {
        Self {
            value,
            threshold: Some(threshold),
        }
    }

    /// The layout this sample encodes to.
    #[inline]
    pub fn layout(&self) -> SampleLayout {
        match self.threshold {
            None => SampleLayout::Value,
            Some(_) => SampleLayout::ValueWithThreshold,
        }
    }

    /// Encode as one word, or two when a threshold is carried.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.layout().encoded_len());
        out.extend_from_slice(&abi::encode_word(u128::from(self.value)));
        if let Some(threshold) = self.threshold {
            out.extend_from_slice(&abi::encode_word(u128::from(threshold)));
        }
        out
    }

    /// Decode bytes produced by [`Sample::encode`] for the given layout.
    ///
    /// The buffer length must match the layout exactly and every word must
    /// fit in a `u64`.
    pub fn decode(bytes: &[u8], layout: SampleLayout) -> Result<Self, DecodeError> {
        let expected = layout.encoded_len();
        if bytes.len() != expected {
            return Err(DecodeError::InvalidLength {
                expected,
                actual: bytes.len(),
            });
        }
        let value = abi::decode_u64(bytes, 0)?;
        let threshold = match layout {
            SampleLayout::Value => None,
            SampleLayout::ValueWithThreshold => Some(abi::decode_u64(bytes, 1)?),
        };
        Ok(Self { value, threshold })
    }
}
