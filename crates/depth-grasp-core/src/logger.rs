//! Stderr logging for the grasp pipelines.
//!
//! [`init_with_level`] installs a `log` backend that prints
//! `[elapsed LEVEL stage] message`, where `stage` is the last path segment of
//! the record's module. Records from the `depth_grasp*` crates pass at the
//! requested level; everything else (image decoders and the like) is capped at
//! `warn` unless `trace` is requested.
//!
//! With the `tracing` feature, [`init_tracing`] installs a
//! `tracing-subscriber` formatter with the same per-crate defaults, overridable
//! through `RUST_LOG`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, fmt::format::FmtSpan, util::SubscriberInitExt, EnvFilter};

const CRATE_PREFIX: &str = "depth_grasp";

/// `RUST_LOG`-style default used by [`init_tracing`].
#[cfg(feature = "tracing")]
pub const DEFAULT_TRACING_FILTER: &str = "warn,depth_grasp=info,depth_grasp_core=info,\
depth_grasp_mask=info,depth_grasp_efd=info";

struct PipelineLogger {
    level: LevelFilter,
    foreign: LevelFilter,
    started: Instant,
}

impl PipelineLogger {
    fn new(level: LevelFilter) -> Self {
        let foreign = if level >= LevelFilter::Trace {
            level
        } else {
            level.min(LevelFilter::Warn)
        };
        Self {
            level,
            foreign,
            started: Instant::now(),
        }
    }

    fn limit_for(&self, target: &str) -> LevelFilter {
        if target.starts_with(CRATE_PREFIX) {
            self.level
        } else {
            self.foreign
        }
    }
}

fn stage(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

impl Log for PipelineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.limit_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "[{:8.3}s {:>5} {}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            stage(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<PipelineLogger> = OnceLock::new();

/// Install the stderr logger. Only the first call has an effect.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| PipelineLogger::new(level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` formatter. Span close events carry their durations,
/// which is how per-stage timing is reported; `json` switches to one JSON
/// object per line.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_FILTER));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
