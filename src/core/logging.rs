//! Logging and diagnostic-report setup.
//!
//! The TUI owns the terminal, so logs only go to a daily-rolling JSON file.
//! `log` macros are bridged into `tracing`, and the miette report handler is
//! tuned to what the terminal supports for errors printed after the TUI exits.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use flate2::write::GzEncoder;
use flate2::Compression;
use supports_color::Stream;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_PREFIX: &str = "autoblitz.log";

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info";

static TERMINAL_CAPS: OnceLock<TerminalCapabilities> = OnceLock::new();

fn get_terminal_caps() -> &'static TerminalCapabilities {
    TERMINAL_CAPS.get_or_init(TerminalCapabilities::detect)
}

// ============================================================================
// Terminal Capability Detection
// ============================================================================

/// Terminal color support levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorLevel {
    TrueColor,
    Ansi256,
    Ansi16,
    NoColor,
}

/// Detected terminal capabilities
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color_level: ColorLevel,
    pub supports_unicode: bool,
    pub is_interactive: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities from environment
    pub fn detect() -> Self {
        use is_terminal::IsTerminal;

        let color_level = match supports_color::on(Stream::Stdout) {
            Some(support) if support.has_16m => ColorLevel::TrueColor,
            Some(support) if support.has_256 => ColorLevel::Ansi256,
            Some(support) if support.has_basic => ColorLevel::Ansi16,
            _ => ColorLevel::NoColor,
        };

        let is_interactive = io::stdout().is_terminal();

        let supports_unicode = std::env::var("TERM")
            .map(|t| !t.contains("dumb"))
            .unwrap_or(true)
            && std::env::var("LANG")
                .map(|l| l.contains("UTF-8") || l.contains("utf8"))
                .unwrap_or(true);

        Self {
            color_level,
            supports_unicode,
            is_interactive,
        }
    }

    pub fn should_colorize(&self) -> bool {
        self.is_interactive && self.color_level != ColorLevel::NoColor
    }

    /// Whether the terminal can render truecolor RGB theme colors.
    pub fn supports_truecolor(&self) -> bool {
        self.color_level == ColorLevel::TrueColor
    }
}

// ============================================================================
// Logging Initialization
// ============================================================================

/// Initialize file-only logging for TUI mode.
///
/// Writes JSON lines to `<log_dir>/autoblitz.log.<date>`, bridges `log`
/// macros into `tracing`, installs the miette hook and compresses rolled
/// files from earlier days in the background.
///
/// The returned guard must be kept alive until shutdown so buffered lines
/// are flushed.
pub fn init_tui(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer: TUI owns the terminal
    tracing_subscriber::registry().with(file_layer).init();

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    init_miette();

    let log_dir_clone = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Whether a file in the log directory is a rolled log from an earlier day.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    let Some(date) = name.strip_prefix(LOG_FILE_PREFIX).and_then(|s| s.strip_prefix('.')) else {
        return false;
    };
    !date.ends_with(".gz") && date != today_suffix
}

/// Gzip rolled log files from earlier days.
fn compress_old_logs(log_dir: PathBuf) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(&log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent_dir.join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;

    Ok(())
}

/// Configure the miette report handler for the current terminal.
fn init_miette() {
    let caps = get_terminal_caps();

    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(caps.supports_truecolor())
                .unicode(caps.supports_unicode)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .color(caps.should_colorize())
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_should_compress_only_older_rolled_files() {
        let today = "2026-10-19";
        assert!(should_compress("autoblitz.log.2026-10-18", today));
        assert!(!should_compress("autoblitz.log.2026-10-19", today));
        assert!(!should_compress("autoblitz.log.2026-10-18.gz", today));
        assert!(!should_compress("other.log.2026-10-18", today));
        assert!(!should_compress("autoblitz.log", today));
    }

    #[test]
    fn test_compress_file_replaces_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autoblitz.log.2020-01-01");
        fs::write(&path, "{\"msg\":\"hello\"}\n").unwrap();

        compress_file(&path).unwrap();

        assert!(!path.exists());
        let gz_path = dir.path().join("autoblitz.log.2020-01-01.gz");
        let mut decoder = flate2::read::GzDecoder::new(fs::File::open(gz_path).unwrap());
        let mut text = String::new();
        decoder.read_to_string(&mut text).unwrap();
        assert_eq!(text, "{\"msg\":\"hello\"}\n");
    }

    #[test]
    fn test_compress_old_logs_skips_today() {
        let dir = tempfile::tempdir().unwrap();
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let current = dir.path().join(format!("autoblitz.log.{today}"));
        let old = dir.path().join("autoblitz.log.2000-01-01");
        fs::write(&current, "now").unwrap();
        fs::write(&old, "then").unwrap();

        compress_old_logs(dir.path().to_path_buf());

        assert!(current.exists());
        assert!(!old.exists());
        assert!(dir.path().join("autoblitz.log.2000-01-01.gz").exists());
    }

    #[test]
    fn test_colorize_requires_interactive() {
        let caps = TerminalCapabilities {
            color_level: ColorLevel::TrueColor,
            supports_unicode: true,
            is_interactive: false,
        };
        assert!(!caps.should_colorize());
        assert!(caps.supports_truecolor());
    }
}
