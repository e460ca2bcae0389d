//! Tracing initialization for drivers and demos.
//!
//! The engine itself only *emits* structured `tracing` events; wiring a
//! subscriber is the embedding application's call. [`init`] is the
//! convenience most drivers want: an env-filtered fmt subscriber writing to
//! stderr, honoring `RUST_LOG` (including values loaded from a `.env` file).

use tracing_subscriber::EnvFilter;

/// Installs the default subscriber: env-filtered, human-readable, stderr.
///
/// Filter resolution order: `RUST_LOG` from the process environment or a
/// `.env` file, falling back to `info`. Calling this twice is a no-op (the
/// second install attempt is ignored), so library consumers that already
/// installed their own subscriber are never clobbered.
///
/// # Examples
///
/// ```rust
/// migraph::telemetry::init();
/// tracing::info!("migration driver starting");
/// ```
pub fn init() {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
