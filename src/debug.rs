//! Debug logging for par-trace.
//!
//! All `log` macros are routed through a bridge installed by
//! [`init_log_bridge`]. Records go to `par_trace_debug.log` in the system
//! temp directory so they never interleave with the rendered trace on
//! stdout.
//!
//! Controlled by the DEBUG_LEVEL environment variable:
//! - 0 or unset: No debug file
//! - 1: Errors only
//! - 2: Info level (config loading, strategy selection)
//! - 3: Debug level (snippet windows, chain walking)
//! - 4: Trace level
//!
//! When RUST_LOG is set the records are mirrored to stderr as well. The CLI
//! `--log-level` flag takes precedence over both.

use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

const LOG_FILE_NAME: &str = "par_trace_debug.log";

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    /// Parse a DEBUG_LEVEL value. Anything unrecognized is `Off`.
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<u8>() {
            Ok(1) => DebugLevel::Error,
            Ok(2) => DebugLevel::Info,
            Ok(3) => DebugLevel::Debug,
            Ok(4) => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn from_env() -> Self {
        std::env::var("DEBUG_LEVEL")
            .map(|v| Self::parse(&v))
            .unwrap_or(DebugLevel::Off)
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Error,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Most verbose level named in a RUST_LOG value such as `debug` or
/// `par_trace=trace,warn`.
pub fn parse_rust_log(value: &str) -> Option<log::LevelFilter> {
    value
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            level.trim().parse::<log::LevelFilter>().ok()
        })
        .max()
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

struct LogBridge {
    file: Option<Mutex<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn open(level: log::LevelFilter, mirror_stderr: bool) -> Self {
        let path = log_path();
        let file = match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
        {
            Ok(mut f) => {
                let rule = "=".repeat(80);
                let _ = writeln!(
                    f,
                    "\n{rule}\npar-trace debug session started at {} (level={level})\n{rule}",
                    get_timestamp()
                );
                Some(Mutex::new(f))
            }
            // A missing log file must never stop a trace from rendering.
            Err(_) => None,
        };
        Self {
            file,
            mirror_stderr,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprintln!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

static INSTALLED: OnceLock<()> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the log bridge. Later calls are no-ops.
///
/// Level precedence: `cli_level`, then RUST_LOG, then DEBUG_LEVEL. The log
/// file is only created when DEBUG_LEVEL or `cli_level` asks for output.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    INSTALLED.get_or_init(|| {
        let debug_level = DebugLevel::from_env();
        let env_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|v| parse_rust_log(&v));
        let level = cli_level
            .or(env_level)
            .unwrap_or_else(|| debug_level.to_level_filter());

        let wants_file = debug_level != DebugLevel::Off
            || cli_level.is_some_and(|l| l != log::LevelFilter::Off);
        let bridge = if wants_file && level != log::LevelFilter::Off {
            LogBridge::open(level, env_level.is_some())
        } else {
            LogBridge {
                file: None,
                mirror_stderr: env_level.is_some(),
            }
        };

        if log::set_logger(Box::leak(Box::new(bridge))).is_ok() {
            log::set_max_level(level);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_debug_level_parse() {
        assert_eq!(DebugLevel::parse("0"), DebugLevel::Off);
        assert_eq!(DebugLevel::parse(" 3 "), DebugLevel::Debug);
        assert_eq!(DebugLevel::parse("4"), DebugLevel::Trace);
        assert_eq!(DebugLevel::parse("9"), DebugLevel::Off);
        assert_eq!(DebugLevel::parse("loud"), DebugLevel::Off);
        assert!(DebugLevel::Info < DebugLevel::Debug);
    }

    #[test]
    fn test_debug_level_to_filter() {
        assert_eq!(DebugLevel::Off.to_level_filter(), LevelFilter::Off);
        assert_eq!(DebugLevel::Info.to_level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_parse_rust_log() {
        assert_eq!(parse_rust_log("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_rust_log("par_trace=trace,warn"), Some(LevelFilter::Trace));
        assert_eq!(parse_rust_log("INFO"), Some(LevelFilter::Info));
        assert_eq!(parse_rust_log("nonsense"), None);
        assert_eq!(parse_rust_log(""), None);
    }

    #[test]
    fn test_init_log_bridge_installs_once() {
        init_log_bridge(Some(LevelFilter::Off));
        assert_eq!(log::max_level(), LevelFilter::Off);
        // A second install keeps the first logger and level.
        init_log_bridge(Some(LevelFilter::Trace));
        assert_eq!(log::max_level(), LevelFilter::Off);
        log::error!("dropped while the bridge is off");
    }

    #[test]
    fn test_log_path_is_in_temp_dir() {
        let path = log_path();
        assert!(path.starts_with(std::env::temp_dir()));
        assert!(path.ends_with(LOG_FILE_NAME));
    }
}
