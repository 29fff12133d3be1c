//! # Base-Fee Trap
//!
//! A **Drosera-style trap** that watches Ethereum's block base fee and fires
//! when it moves by at least a configured percentage (2% by default) between
//! two consecutive samples.
//!
//! The trap exposes the two-call shape an external operator drives:
//! [`Trap::collect`] samples the current base fee and returns it encoded,
//! and [`Trap::should_respond`] decodes the two newest samples and runs the
//! decision rule. Triggered payloads go to an [`Emitter`], which republishes
//! them as a `BasefeeAlert` event. Sample history lives in the operator;
//! nothing here persists state between calls.
//!
//! ## Quick start
//!
//! ```rust
//! use basefee_trap::{BaseFeeTrap, FixedFeeSource, Payload, Trap, TrapConfig};
//!
//! let config = TrapConfig::default();
//!
//! // Two blocks' worth of samples, as the operator would buffer them.
//! let older = BaseFeeTrap::new(FixedFeeSource(100), config.clone())?.collect()?;
//! let newer = BaseFeeTrap::new(FixedFeeSource(102), config.clone())?.collect()?;
//!
//! // Newest first.
//! let trap = BaseFeeTrap::new(FixedFeeSource(0), config)?;
//! let (triggered, payload) = trap.should_respond(&[newer, older])?;
//! assert!(triggered, "a 2% move meets the 2% threshold");
//! assert!(matches!(Payload::classify(&payload)?, Payload::Spike(_)));
//! # Ok::<(), basefee_trap::TrapError>(())
//! ```
//!
//! See [`decision`] for the exact edge-case policy and [`sample`] for the
//! wire layouts.

pub mod abi;
pub mod config;
pub mod decision;
pub mod emitter;
pub mod error;
pub mod sample;
pub mod sampler;
pub mod trap;


// Re-exports for convenience.
pub use config::{SampleLayout, TrapConfig};
pub use decision::{decide, percent_change, Decision, Payload, Spike};
pub use emitter::{Emitter, LogEmitter, RecordingEmitter};
pub use error::{DecodeError, TrapError};
pub use sample::Sample;
pub use sampler::{FeeSource, FixedFeeSource, Sampler, SequenceFeeSource};
pub use trap::{evaluate, BaseFeeTrap, Trap};
