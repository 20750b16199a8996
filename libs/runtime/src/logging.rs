use crate::config::LoggingConfig;
use std::{
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------
fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

// -------- rotating writer for files --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

fn make_rotating_writer(config: &LoggingConfig, path: &Path) -> RotWriter {
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }

    let max_files = config.max_backups.unwrap_or(3);
    let max_bytes = config.max_size_mb.unwrap_or(100).saturating_mul(1024 * 1024) as usize;

    let rotate = FileRotate::new(
        path,
        AppendTimestamp::default(FileLimit::MaxFiles(max_files)),
        ContentLimit::Bytes(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );

    RotWriter(Arc::new(Mutex::new(rotate)))
}

/// Initialize tracing from the logging section: a console layer plus an
/// optional rotating file layer. Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging_from_config(config: &LoggingConfig) {
    // Bridge `log` records from dependencies into tracing.
    let _ = tracing_log::LogTracer::init();

    let console_layer = parse_tracing_level(&config.console_level).map(|level| {
        fmt::layer()
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_target(true)
            .with_filter(LevelFilter::from_level(level))
    });

    let file_layer = config.file.as_ref().and_then(|file| {
        let level = parse_tracing_level(&config.file_level)?;
        let writer = make_rotating_writer(config, Path::new(file));
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .with_filter(LevelFilter::from_level(level)),
        )
    });

    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_and_off() {
        assert_eq!(parse_tracing_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_tracing_level("WARN"), Some(Level::WARN));
        assert_eq!(parse_tracing_level("off"), None);
        // unknown strings fall back to info
        assert_eq!(parse_tracing_level("verbose"), Some(Level::INFO));
    }

    #[test]
    fn init_is_idempotent() {
        let config = LoggingConfig::default();
        init_logging_from_config(&config);
        init_logging_from_config(&config);
    }
}
