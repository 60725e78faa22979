// src/utils/logger.rs
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the logging system. Later calls are no-ops.
///
/// Defaults to `info`; `RUST_LOG` overrides it.
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        log::debug!("Logging system initialized");
    });
}
