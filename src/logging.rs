//! Process logger setup driven by the `verbose` setting.

use crate::config::AppConfig;

/// Install an `env_logger` logger at the level `config` asks for.
///
/// `RUST_LOG` still refines the filter. Returns `false` when a logger was
/// already installed, in which case nothing changes.
pub fn init(config: &AppConfig) -> bool {
    builder(config).try_init().is_ok()
}

fn builder(config: &AppConfig) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level())
        .format_timestamp(None)
        .parse_default_env();
    builder
}
