//! Logger configuration: level threshold and output format.
//!
//! Configuration values arrive as free-form strings (env vars, TOML, JSON).
//! Resolution into [`LogLevel`] / [`LogFormat`] never fails:
//! - level: case-insensitive `debug|info|warn|error`, anything else is `info`
//! - format: exactly `"text"` selects text, anything else selects JSON
//!
//! The format branch is deliberately two-way. `"json"`, `""`, `"TEXT"` and
//! unknown names all land on JSON; consumers rely on JSON being the fallback.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable read by [`LoggerConfig::from_env`] for the level.
pub const LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable read by [`LoggerConfig::from_env`] for the format.
pub const FORMAT_ENV: &str = "LOG_FORMAT";

/// Severity threshold, ordered from most to least verbose.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Upper-case name as written into records.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Lower-case name, usable as an `EnvFilter` directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Lenient mapping used for configuration: unknown input becomes `Info`.
    pub fn from_config(raw: &str) -> Self {
        raw.parse().unwrap_or(LogLevel::Info)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse failure for [`LogLevel`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    /// Case-insensitive exact match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const LEVELS: [LogLevel; 4] = [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ];

        LEVELS
            .into_iter()
            .find(|level| level.as_directive().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Record encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LogFormat {
    /// `key=value` pairs on one line.
    Text,
    /// One JSON object per line. The fallback for every non-`"text"` value.
    Json,
}

impl LogFormat {
    pub fn from_config(raw: &str) -> Self {
        if raw == "text" {
            LogFormat::Text
        } else {
            LogFormat::Json
        }
    }
}

/// Declarative logger configuration as read from the outside world.
///
/// Fields stay raw strings so that any input is accepted; use
/// [`LoggerConfig::level`] and [`LoggerConfig::format`] for the resolved values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// `debug`, `info`, `warn` or `error` (any case).
    pub level: String,
    /// `text`, or anything else for JSON.
    pub format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new(level: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            format: format.into(),
        }
    }

    /// Read [`LEVEL_ENV`] and [`FORMAT_ENV`]; unset variables keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            level: lookup(LEVEL_ENV).unwrap_or(defaults.level),
            format: lookup(FORMAT_ENV).unwrap_or(defaults.format),
        }
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_config(&self.level)
    }

    pub fn format(&self) -> LogFormat {
        LogFormat::from_config(&self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn level_names_match_in_any_case() {
        for raw in ["DEBUG", "debug", "Debug", "dEbUg"] {
            assert_eq!(LogLevel::from_config(raw), LogLevel::Debug, "{raw}");
        }
        for raw in ["WARN", "warn", "Warn"] {
            assert_eq!(LogLevel::from_config(raw), LogLevel::Warn, "{raw}");
        }
        for raw in ["ERROR", "error", "Error"] {
            assert_eq!(LogLevel::from_config(raw), LogLevel::Error, "{raw}");
        }
    }

    #[test]
    fn unknown_levels_fall_back_to_info() {
        for raw in ["", "trace", "warning", "fatal", " info", "info "] {
            assert_eq!(LogLevel::from_config(raw), LogLevel::Info, "{raw:?}");
        }
        assert_eq!(
            "warning".parse::<LogLevel>(),
            Err(ParseLevelError("warning".to_string()))
        );
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn format_is_a_two_way_branch() {
        assert_eq!(LogFormat::from_config("text"), LogFormat::Text);
        for raw in ["json", "", "anything-else", "TEXT", "Text", " text"] {
            assert_eq!(LogFormat::from_config(raw), LogFormat::Json, "{raw:?}");
        }
    }

    #[test]
    fn missing_env_keeps_defaults() {
        let config = LoggerConfig::from_lookup(|_| None);
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level(), LogLevel::Info);
        assert_eq!(config.format(), LogFormat::Json);
    }

    #[test]
    fn env_values_are_picked_up() {
        let config = LoggerConfig::from_lookup(|key| match key {
            LEVEL_ENV => Some("DEBUG".to_string()),
            FORMAT_ENV => Some("text".to_string()),
            _ => None,
        });
        assert_eq!(config.level(), LogLevel::Debug);
        assert_eq!(config.format(), LogFormat::Text);
    }

    #[test]
    fn deserializes_partial_config_with_defaults() {
        let config: LoggerConfig = serde_json::from_str(r#"{"level":"Warn"}"#).unwrap();
        assert_eq!(config.level(), LogLevel::Warn);
        assert_eq!(config.format(), LogFormat::Json);
    }

    fn any_case(name: &'static str) -> impl Strategy<Value = String> {
        prop::collection::vec(any::<bool>(), name.len()).prop_map(move |upper| {
            name.chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every case permutation of a level name selects that level.
        #[test]
        fn case_permutations_select_same_level(
            (name, expected) in prop_oneof![
                Just(("debug", LogLevel::Debug)),
                Just(("info", LogLevel::Info)),
                Just(("warn", LogLevel::Warn)),
                Just(("error", LogLevel::Error)),
            ],
            seed in any::<u64>(),
        ) {
            let raw: String = name
                .chars()
                .enumerate()
                .map(|(i, c)| if seed >> (i % 64) & 1 == 1 { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(LogLevel::from_config(&raw), expected);
        }

        /// Property: mixed-case spellings of "debug" always resolve to Debug.
        #[test]
        fn debug_in_any_case(raw in any_case("debug")) {
            prop_assert_eq!(LogLevel::from_config(&raw), LogLevel::Debug);
        }

        /// Property: only the exact string "text" selects the text encoder.
        #[test]
        fn non_text_formats_select_json(raw in ".*") {
            prop_assume!(raw != "text");
            prop_assert_eq!(LogFormat::from_config(&raw), LogFormat::Json);
        }
    }
}
