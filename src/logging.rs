//! Logger initialisation.

use env_logger::{Builder, Env, Target};

/// Installs the global logger.
///
/// `RUST_LOG` wins over `default_level` when set. Output goes to stderr so
/// the report on stdout stays clean. Calling this twice is harmless; the
/// second call is ignored.
pub fn init(default_level: &str) {
    let env = Env::default().default_filter_or(default_level);
    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();
}
