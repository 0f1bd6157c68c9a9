//! Tracing subscriber setup shared by the binaries.

use crate::config::{LogFormat, LoggingEnvConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;

/// A writer that sends formatted log lines to the UI via a crossbeam channel
pub struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).trim_end().to_string();
        // A full or disconnected UI must never block logging
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
pub struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl ChannelWriterFactory {
    pub fn new(sender: crossbeam_channel::Sender<String>) -> Self {
        Self { sender }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
pub fn env_filter(config: &LoggingEnvConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the stdout layer, plus a channel layer when `ui_sink` is given.
/// Fails if a global subscriber is already set.
pub fn init(
    config: &LoggingEnvConfig,
    ui_sink: Option<ChannelWriterFactory>,
) -> Result<(), TryInitError> {
    let (pretty, compact) = match config.format {
        LogFormat::Pretty => (
            Some(tracing_subscriber::fmt::layer().with_target(false).pretty()),
            None,
        ),
        LogFormat::Compact => (
            None,
            Some(tracing_subscriber::fmt::layer().with_target(false).compact()),
        ),
    };

    let ui_layer = ui_sink.map(|sink| {
        tracing_subscriber::fmt::layer()
            .with_writer(sink)
            .with_ansi(false) // No color codes for UI text
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(pretty)
        .with(compact)
        .with(ui_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn test_channel_writer_forwards_lines() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let factory = ChannelWriterFactory::new(tx);

        let mut writer = factory.make_writer();
        let written = writer.write(b"INFO model loaded\n").unwrap();

        assert_eq!(written, 18);
        assert_eq!(rx.try_recv().unwrap(), "INFO model loaded");
    }

    #[test]
    fn test_second_init_is_reported() {
        let config = LoggingEnvConfig::default();
        let _ = init(&config, None);
        assert!(init(&config, None).is_err());
    }

    #[test]
    fn test_channel_writer_ignores_disconnected_ui() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        drop(rx);
        let mut writer = ChannelWriterFactory::new(tx).make_writer();
        assert!(writer.write(b"dropped").is_ok());
    }
}
