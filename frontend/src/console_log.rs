use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::{
    filter::Targets, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Routes `tracing` output to the browser console, which is where operators look.
pub fn init() {
    let targets = Targets::new()
        .with_target(env!("CARGO_CRATE_NAME"), Level::DEBUG)
        .with_target("ip_logger_lib", Level::DEBUG);

    tracing_subscriber::registry()
        .with(targets)
        .with(tracing_subscriber::fmt::layer()
            .without_time()
            .with_ansi(false)
            .with_writer(Console))
        .init();
}

struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it on drop.
struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
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
        let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        if line.is_empty() {
            return;
        }

        if self.level == Level::ERROR {
            gloo_console::error!(line);
        } else if self.level == Level::WARN {
            gloo_console::warn!(line);
        } else if self.level == Level::INFO {
            gloo_console::info!(line);
        } else {
            gloo_console::debug!(line);
        }
    }
}
