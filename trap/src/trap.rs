//! The two-call capability an operator drives.
//!
//! The operator calls [`Trap::collect`] once per observed block, keeps the
//! returned bytes in a rolling buffer, and periodically hands the newest
//! entries back to [`Trap::should_respond`]. Any monitored metric (base fee,
//! gas limit, transaction count) fits the same shape.

use {
    crate::{
        config::TrapConfig,
        decision::{decide, Decision},
        error::Result,
        sample::Sample,
        sampler::{FeeSource, Sampler},
    },
    log::trace,
};

pub trait Trap {
    /// Capture the current metric as opaque encoded bytes. Read-only.
    fn collect(&self) -> Result<Vec<u8>>;

    /// Decide over previously collected bytes, newest first.
    ///
    /// Pure: decoding and arithmetic only, no ambient reads.
    fn should_respond(&self, data: &[Vec<u8>]) -> Result<(bool, Vec<u8>)>;
}

/// Trap that fires when the base fee moves by at least the configured
/// percentage between two consecutive samples.
#[derive(Debug)]
pub struct BaseFeeTrap<S> {
    sampler: Sampler<S>,
    config: TrapConfig,
}

impl<S: FeeSource> BaseFeeTrap<S> {
    /// Build a trap over `source`, validating `config` first.
    pub fn new(source: S, config: TrapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: Sampler::new(source, &config),
            config,
        })
    }

    pub fn config(&self) -> &TrapConfig {
        &self.config
    }

    /// Decode and decide under this trap's configuration.
    pub fn evaluate(&self, data: &[Vec<u8>]) -> Result<Decision> {
        evaluate(data, &self.config)
    }
}

/// Decode the two newest entries of `data` in `config.layout` and decide.
///
/// Fewer than two entries short-circuits to "not enough data" before any
/// decoding happens. Entries past index 1 are never decoded.
pub fn evaluate(data: &[Vec<u8>], config: &TrapConfig) -> Result<Decision> {
    let samples = data
        .iter()
        .take(2)
        .map(|bytes| Sample::decode(bytes, config.layout))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(decide(&samples, config))
}

impl<S: FeeSource> Trap for BaseFeeTrap<S> {
    fn collect(&self) -> Result<Vec<u8>> {
        let sample = self.sampler.sample()?;
        trace!("collect: base_fee={}", sample.value);
        Ok(sample.encode())
    }

    fn should_respond(&self, data: &[Vec<u8>]) -> Result<(bool, Vec<u8>)> {
        self.evaluate(data).map(Decision::into_response)
    }
}
