//! Logging setup for Sajiki binaries and tests.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive, e.g. `sajiki_server=debug,sajiki_server=debug`.
///
/// Both the library crate and the binary target get the same level so that
/// spans emitted from either side are visible.
pub fn default_directive(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        crate_name.replace('-', "_"),
        default_log_level,
        binary_name.replace('-', "_"),
        default_log_level,
        default_log_level
    )
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the filter built by
/// [`default_directive`] is used.
///
/// # Examples
///
/// ```no_run
/// use sajiki_shared::logger::setup_logger;
///
/// setup_logger("sajiki-server", "sajiki-server", "info");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        default_directive(crate_name, binary_name, default_log_level).into()
    });

    // 二重初期化（テストなど）は無視する
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
