use crate::{
    config::{SampleLayout, TrapConfig},
    error::{Result, TrapError},
    sample::Sample,
};

/// Read-only access to the network's current base fee.
///
/// On-chain the metric is ambient and always present. Off-chain sources can
/// fail; a failure is reported, never replaced by zero.
pub trait FeeSource {
    /// Current base fee in wei.
    fn base_fee(&self) -> Result<u64>;
}

impl<F: FeeSource + ?Sized> FeeSource for &F {
    fn base_fee(&self) -> Result<u64> {
        (**self).base_fee()
    }
}

impl<F: FeeSource + ?Sized> FeeSource for Box<F> {
    fn base_fee(&self) -> Result<u64> {
        (**self).base_fee()
    }
}

/// A fee source that always reports the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFeeSource(pub u64);

impl FeeSource for FixedFeeSource {
    fn base_fee(&self) -> Result<u64> {
        Ok(self.0)
    }
}

/// A fee source that replays a fixed sequence, one value per call.
///
/// Returns an error once the sequence is exhausted.
#[derive(Debug, Default)]
pub struct SequenceFeeSource {
    values: Vec<u64>,
    cursor: std::cell::Cell<usize>,
}

impl SequenceFeeSource {
    pub fn new(values: Vec<u64>) -> Self {
        Self {
            values,
            cursor: std::cell::Cell::new(0),
        }
    }

    /// Values not yet handed out.
    pub fn remaining(&self) -> usize {
        self.values.len().saturating_sub(self.cursor.get())
    }
}

impl FeeSource for SequenceFeeSource {
    fn base_fee(&self) -> Result<u64> {
        let index = self.cursor.get();
        let value = self.values.get(index).copied().ok_or_else(|| {
            TrapError::FeeSource(format!("sequence exhausted after {index} values"))
        })?;
        self.cursor.set(index.saturating_add(1));
        Ok(value)
    }
}

/// Captures one [`Sample`] per call from a [`FeeSource`].
#[derive(Debug)]
pub struct Sampler<S> {
    source: S,
    threshold_pct: u64,
    layout: SampleLayout,
}

impl<S: FeeSource> Sampler<S> {
    pub fn new(source: S, config: &TrapConfig) -> Self {
        Self {
            source,
            threshold_pct: config.threshold_pct,
            layout: config.layout,
        }
    }

    /// Read the current base fee. In the two-word layout the configured
    /// threshold rides along with the value.
    pub fn sample(&self) -> Result<Sample> {
        let value = self.source.base_fee()?;
        Ok(match self.layout {
            SampleLayout::Value => Sample::new(value),
            SampleLayout::ValueWithThreshold => Sample::with_threshold(value, self.threshold_pct),
        })
    }
}
