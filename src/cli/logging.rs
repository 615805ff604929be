//! Log output for the command-line front end
//!
//! Logs go to stderr so they never mix with command output. The level comes
//! from `-v`, and `DRADIS_LOG` takes an `EnvFilter` directive that overrides it.

use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "DRADIS_LOG";

pub fn init(verbosity: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        level_from_verbosity(verbosity)
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0), LevelFilter::WARN);
        assert_eq!(level_from_verbosity(1), LevelFilter::INFO);
        assert_eq!(level_from_verbosity(2), LevelFilter::DEBUG);
        assert_eq!(level_from_verbosity(9), LevelFilter::DEBUG);
    }
}
