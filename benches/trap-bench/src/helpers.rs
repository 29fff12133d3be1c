//! Shared helpers for trap benchmarks.

/// A deterministic base-fee series of `n` blocks starting at 20 gwei.
///
/// Each block moves the fee by up to ±12.5 %, the EIP-1559 per-block bound,
/// following a fixed pattern so runs are comparable.
pub fn make_fee_series(n: usize) -> Vec<u64> {
    const PATTERN_PER_MILLE: [i64; 8] = [5, -3, 125, -40, 0, 18, -125, 21];
    let mut fee: u64 = 20_000_000_000;
    (0..n)
        .map(|i| {
            let step = PATTERN_PER_MILLE[i % PATTERN_PER_MILLE.len()];
            let delta = fee / 1_000 * step.unsigned_abs();
            fee = if step >= 0 {
                fee.saturating_add(delta)
            } else {
                fee.saturating_sub(delta)
            };
            fee
        })
        .collect()
}
