//! Logger setup for the command-line driver.
//!
//! Records go to stderr so command output on stdout stays machine-readable.

/// Install the global logger, honoring `RUST_LOG` and falling back to
/// `filter`. Calling it more than once is harmless.
pub fn setup_with_default(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Install the global logger for tests, capturing output per test.
#[cfg(test)]
pub fn setup_for_tests() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
