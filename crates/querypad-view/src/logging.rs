//! Structured logging setup.
//!
//! The viewer emits `tracing` spans and events when the `tracing` feature is
//! enabled. Hosts that want output on native targets (benchmarks, tools) can
//! enable `tracing-json` and install the JSON subscriber below; filtering
//! follows `RUST_LOG`, defaulting to `querypad_view=info`.

/// Install a JSON `fmt` subscriber. Returns `false` if one was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("querypad_view=info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
