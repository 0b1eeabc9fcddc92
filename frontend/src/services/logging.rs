use gloo::console;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Browser console logger with a component prefix on every line
pub struct Logger;

impl Logger {
    /// Install the console `tracing` subscriber and set the debug gate.
    /// Call once at start-up.
    pub fn init(debug: bool) {
        Self::set_debug_enabled(debug);

        let max_level = if debug { Level::DEBUG } else { Level::INFO };
        // No clock on wasm32-unknown-unknown, so no timestamps
        let result = tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_ansi(false)
            .without_time()
            .with_target(true)
            .with_writer(ConsoleMakeWriter)
            .try_init();

        if let Err(e) = result {
            Self::error_with_component("logging", &format!("Failed to install tracing subscriber: {}", e));
        }
    }

    /// Debug lines are dropped unless enabled at start-up
    pub fn set_debug_enabled(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
    }

    pub fn debug_with_component(component: &str, message: &str) {
        if DEBUG_ENABLED.load(Ordering::Relaxed) {
            console::debug!(format_line(component, message));
        }
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::info!(format_line(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(format_line(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(format_line(component, message));
    }
}

fn format_line(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConsoleLevel {
    Debug,
    Info,
    Warn,
    Error,
}

fn console_level(level: &Level) -> ConsoleLevel {
    match *level {
        Level::ERROR => ConsoleLevel::Error,
        Level::WARN => ConsoleLevel::Warn,
        Level::INFO => ConsoleLevel::Info,
        _ => ConsoleLevel::Debug,
    }
}

/// Collects one formatted event and prints it when dropped
pub struct ConsoleWriter {
    level: ConsoleLevel,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: ConsoleLevel) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    fn take_line(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let bytes = std::mem::take(&mut self.buffer);
        Some(String::from_utf8_lossy(&bytes).trim_end().to_string())
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = self.take_line() else {
            return;
        };
        match self.level {
            ConsoleLevel::Error => console::error!(line),
            ConsoleLevel::Warn => console::warn!(line),
            ConsoleLevel::Info => console::info!(line),
            ConsoleLevel::Debug => console::debug!(line),
        }
    }
}

/// `tracing_subscriber` writer that targets the devtools console,
/// picking the console method from the event level
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(console_level(meta.level()))
    }
}
