//! Logging bridge for the command-line tools.
//!
//! Routes every `log::info!()` etc. record to stderr, or appends to the file
//! named by `GITHUB_KNOWN_HOSTS_LOG` when that is set. User-facing progress
//! lines are printed directly by the CLI and are not affected by the level.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG` (a plain level name
//! such as `debug`), then `warn`.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;

/// Environment variable naming an optional log file.
pub const LOG_FILE_ENV: &str = "GITHUB_KNOWN_HOSTS_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

enum Sink {
    Stderr,
    File(Mutex<File>),
}

struct BridgeLogger {
    level: LevelFilter,
    sink: Sink,
}

impl Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        // Logging never fails the tool; write errors are dropped.
        match &self.sink {
            Sink::Stderr => {
                let _ = writeln!(std::io::stderr().lock(), "{}", line);
            }
            Sink::File(file) => {
                let _ = writeln!(file.lock(), "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Sink::File(file) = &self.sink {
            let _ = file.lock().flush();
        }
    }
}

static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

fn format_record(record: &Record) -> String {
    format!(
        "[{}] [{:<5}] [{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Pick the effective level from the CLI flag and the `RUST_LOG` value.
///
/// Unparseable `RUST_LOG` values are ignored.
pub fn resolve_level(cli_level: Option<LevelFilter>, env_value: Option<&str>) -> LevelFilter {
    cli_level
        .or_else(|| env_value.and_then(|v| LevelFilter::from_str(v.trim()).ok()))
        .unwrap_or(DEFAULT_LEVEL)
}

fn open_sink() -> Sink {
    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Sink::Stderr;
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Sink::File(Mutex::new(file)),
        Err(e) => {
            eprintln!(
                "warning: cannot open log file {}: {}; logging to stderr",
                path.to_string_lossy(),
                e
            );
            Sink::Stderr
        }
    }
}

/// Install the global logger. Later calls keep the first configuration.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env_value = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, env_value.as_deref());

    let logger = LOGGER.get_or_init(|| BridgeLogger {
        level,
        sink: open_sink(),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
