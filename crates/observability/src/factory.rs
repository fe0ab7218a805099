//! Logger factory: configuration in, logger out.

use std::sync::Arc;

use crate::config::LoggerConfig;
use crate::logger::Logger;
use crate::sink::{Sink, StdoutSink};

/// Build a logger writing to standard output.
///
/// Never fails: unknown levels become `info`, any format other than
/// `"text"` becomes JSON.
pub fn build(config: &LoggerConfig) -> Logger {
    build_with_sink(config, Arc::new(StdoutSink))
}

/// Same level/format mapping as [`build`], writing to `sink`.
pub fn build_with_sink(config: &LoggerConfig, sink: Arc<dyn Sink>) -> Logger {
    Logger::new(config.level(), config.format(), sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogFormat, LogLevel};
    use crate::sink::MemorySink;

    #[test]
    fn level_threshold_ignores_case() {
        for raw in ["DEBUG", "debug", "Debug"] {
            assert_eq!(build(&LoggerConfig::new(raw, "json")).level(), LogLevel::Debug);
        }
        for raw in ["INFO", "info", "Info"] {
            assert_eq!(build(&LoggerConfig::new(raw, "json")).level(), LogLevel::Info);
        }
        for raw in ["WARN", "warn", "Warn"] {
            assert_eq!(build(&LoggerConfig::new(raw, "json")).level(), LogLevel::Warn);
        }
        for raw in ["ERROR", "error", "Error"] {
            assert_eq!(build(&LoggerConfig::new(raw, "json")).level(), LogLevel::Error);
        }
        assert_eq!(build(&LoggerConfig::new("verbose", "json")).level(), LogLevel::Info);
    }

    #[test]
    fn only_text_selects_text_encoder() {
        assert_eq!(build(&LoggerConfig::new("info", "text")).format(), LogFormat::Text);
        for raw in ["json", "", "anything-else"] {
            assert_eq!(build(&LoggerConfig::new("info", raw)).format(), LogFormat::Json, "{raw:?}");
        }
    }

    #[test]
    fn text_config_writes_text_lines() {
        let sink = MemorySink::new();
        let logger = build_with_sink(&LoggerConfig::new("debug", "text"), Arc::new(sink.clone()));

        logger.debug("booting", &[]);

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("time="));
        assert!(lines[0].ends_with("level=DEBUG msg=booting"));
    }

    #[test]
    fn unknown_format_writes_json_lines() {
        let sink = MemorySink::new();
        let logger = build_with_sink(&LoggerConfig::new("info", "logfmt"), Arc::new(sink.clone()));

        logger.info("booting", &[]);

        let records = sink.json();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["msg"], "booting");
        assert_eq!(records[0]["level"], "INFO");
    }
}
