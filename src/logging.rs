//! `tracing` output for the browser: each formatted event becomes one console call.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Channel {
    Log,
    Warn,
    Error,
}

impl From<&Level> for Channel {
    fn from(level: &Level) -> Self {
        if *level == Level::ERROR {
            Channel::Error
        } else if *level == Level::WARN {
            Channel::Warn
        } else {
            Channel::Log
        }
    }
}

/// Buffers one formatted line and hands it to `console.*` when dropped.
pub struct ConsoleWriter {
    channel: Channel,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        let value = wasm_bindgen::JsValue::from_str(line);
        match self.channel {
            Channel::Log => web_sys::console::log_1(&value),
            Channel::Warn => web_sys::console::warn_1(&value),
            Channel::Error => web_sys::console::error_1(&value),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            channel: Channel::Log,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            channel: meta.level().into(),
            buf: Vec::new(),
        }
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(max_level: LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .with_writer(Console)
        .with_max_level(max_level)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_map_to_console_channels() {
        assert_eq!(Channel::from(&Level::ERROR), Channel::Error);
        assert_eq!(Channel::from(&Level::WARN), Channel::Warn);
        assert_eq!(Channel::from(&Level::INFO), Channel::Log);
        assert_eq!(Channel::from(&Level::TRACE), Channel::Log);
    }
}
