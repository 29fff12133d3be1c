//! Base-Fee Trap Benchmark Suite
//!
//! Run all benchmarks:
//! ```bash
//! cargo bench -p basefee-trap-bench
//! ```

pub mod helpers;
