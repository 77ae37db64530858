// core/tests/common.rs
#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

static TRACING_INIT: Once = Once::new();

// Setup function to initialize tracing once per test binary.
pub fn setup_tracing() {
  TRACING_INIT.call_once(|| {
    // Default level filter; can be overridden by RUST_LOG.
    let default_filter = "tealoop=trace,info";
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_test_writer()
      .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
  });
}
