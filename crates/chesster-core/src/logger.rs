//! Process-wide logging setup.
//!
//! Library code only uses the `log` macros. Binaries, examples and benches
//! pick one of the installers below:
//!
//! - [`init_with_level`]: stderr lines `[elapsed LEVEL module] message`.
//!   Records from the `chesster*` crates pass at the chosen level; other
//!   crates are capped at `warn` so image decoders stay quiet.
//! - [`init_from_env`]: same logger, level taken from `CHESSTER_LOG`.
//! - `init_tracing` (feature `tracing`): a `tracing-subscriber` with span
//!   timings, plain or JSON.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable read by [`init_from_env`].
pub const LOG_ENV: &str = "CHESSTER_LOG";

const OWN_PREFIX: &str = "chesster";

/// Filter directives used by `init_tracing` when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
const DEFAULT_DIRECTIVES: &str = "warn,chesster=info,chesster_board=info,chesster_core=info";

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

fn is_own_target(target: &str) -> bool {
    target
        .split("::")
        .next()
        .is_some_and(|root| root.starts_with(OWN_PREFIX))
}

/// `chesster_board::locator` -> `board::locator`, `chesster::vision` -> `vision`.
fn short_target(target: &str) -> &str {
    if !is_own_target(target) {
        return target;
    }
    let rest = target.trim_start_matches(OWN_PREFIX);
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let rest = rest.strip_prefix("::").unwrap_or(rest);
    if rest.is_empty() {
        target
    } else {
        rest
    }
}

impl StderrLogger {
    fn threshold(&self, target: &str) -> LevelFilter {
        if is_own_target(target) {
            self.level
        } else {
            self.level.min(LevelFilter::Warn)
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.threshold(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{elapsed:8.3}s {:<5} {}] {}",
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the given level for the `chesster*` crates.
///
/// Only the first call installs a logger; later calls return `Ok(())` and keep
/// the original level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Parse a level name (`off`, `error` .. `trace`, case-insensitive).
/// Unknown or missing values fall back to `info`.
pub fn level_from_str(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// [`init_with_level`] with the level read from `CHESSTER_LOG`.
pub fn init_from_env() -> Result<LevelFilter, log::SetLoggerError> {
    let level = level_from_str(std::env::var(LOG_ENV).ok().as_deref());
    init_with_level(level)?;
    Ok(level)
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to
/// `info` for the `chesster*` crates and `warn` elsewhere. Span close events
/// carry their duration.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .compact()
            .finish()
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_targets_are_recognized() {
        assert!(is_own_target("chesster"));
        assert!(is_own_target("chesster_board::locator"));
        assert!(is_own_target("chesster_core::fen"));
        assert!(!is_own_target("png::decoder"));
        assert!(!is_own_target("image"));
    }

    #[test]
    fn targets_drop_the_crate_prefix() {
        assert_eq!(short_target("chesster_board::locator"), "board::locator");
        assert_eq!(short_target("chesster::vision"), "vision");
        assert_eq!(short_target("chesster"), "chesster");
        assert_eq!(short_target("png::decoder"), "png::decoder");
    }

    #[test]
    fn foreign_crates_are_capped_at_warn() {
        let logger = StderrLogger {
            level: LevelFilter::Debug,
            started: Instant::now(),
        };
        assert_eq!(logger.threshold("chesster_board::scan"), LevelFilter::Debug);
        assert_eq!(logger.threshold("png"), LevelFilter::Warn);

        let quiet = StderrLogger {
            level: LevelFilter::Error,
            started: Instant::now(),
        };
        assert_eq!(quiet.threshold("png"), LevelFilter::Error);
    }

    #[test]
    fn level_names_parse_with_info_fallback() {
        assert_eq!(level_from_str(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from_str(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(level_from_str(Some("off")), LevelFilter::Off);
        assert_eq!(level_from_str(Some("loud")), LevelFilter::Info);
        assert_eq!(level_from_str(None), LevelFilter::Info);
    }
}
