//! Process-level setup for metaballs-rs.

/// Installs `env_logger` as the `log` backend.
///
/// Verbosity follows `RUST_LOG`. Calling this more than once, or after another
/// logger has been installed, is a no-op.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::info!("metaballs-rs logging initialized");
    }
}
