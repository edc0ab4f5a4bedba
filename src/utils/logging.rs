use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::{
        format::FmtSpan,
        writer::{BoxMakeWriter, MakeWriterExt},
    },
    EnvFilter,
};

pub const LOG_PREFIX: &str = "daily-activity";

/// Level used when neither `--log` nor `RUST_LOG` says otherwise. Skipped sub-queries and
/// unreachable instances are reported as warnings, so they stay visible by default.
const DEFAULT_LEVEL: &str = "warn";

fn crate_filter(level: impl std::fmt::Display) -> EnvFilter {
    EnvFilter::new(format!(
        "{}={level}",
        env!("CARGO_PKG_NAME").replace("-", "_"),
    ))
}

/// `--log` wins, then a valid `RUST_LOG`, then [DEFAULT_LEVEL] for this crate.
fn env_filter(log_level: Option<LevelFilter>, rust_log: Option<&str>) -> EnvFilter {
    match (log_level, rust_log) {
        (Some(level), _) => crate_filter(level),
        (None, Some(directives)) => {
            EnvFilter::try_new(directives).unwrap_or_else(|_| crate_filter(DEFAULT_LEVEL))
        }
        (None, None) => crate_filter(DEFAULT_LEVEL),
    }
}

/// Installs the global subscriber. Logs always go to stderr so that stdout only carries the
/// report. When `log_dir` is set, the same events are also written to a daily rotated file.
pub fn enable_logging(log_dir: Option<&Path>, log_level: Option<LevelFilter>) -> Result<()> {
    let writer = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix(LOG_PREFIX)
                .build(dir)?;
            BoxMakeWriter::new(std::io::stderr.and(appender))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let filter = env_filter(log_level, std::env::var("RUST_LOG").ok().as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .compact()
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::env_filter;

    #[test]
    fn defaults_to_warnings_for_this_crate() {
        assert_eq!(env_filter(None, None).to_string(), "daily_activity=warn");
    }

    #[test]
    fn rust_log_is_used_as_is() {
        assert_eq!(
            env_filter(None, Some("daily_activity=debug")).to_string(),
            "daily_activity=debug"
        );
    }

    #[test]
    fn log_flag_overrides_rust_log() {
        assert_eq!(
            env_filter(Some(LevelFilter::TRACE), Some("daily_activity=debug")).to_string(),
            "daily_activity=trace"
        );
    }
}
