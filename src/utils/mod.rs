pub mod build_info;
pub mod paths;

/// Filter directive used when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "kbudget_core=info";

/// Installs the fmt subscriber. Guarded by [`crate::init`].
pub(crate) fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // Another subscriber may already be installed by an embedding binary or test harness.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
