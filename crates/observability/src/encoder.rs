//! Record encoders: one self-contained line per record.
//!
//! Both encoders write the same record shape: `time`, `level`, `msg`, then
//! the logger's bound fields, then the call-site fields, all in order.

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::config::{LogFormat, LogLevel};
use crate::field::Field;

pub const TIME_KEY: &str = "time";
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "msg";

/// A record about to be encoded. Borrowed from the emitting call.
#[derive(Debug)]
pub(crate) struct Record<'a> {
    pub time: DateTime<Utc>,
    pub level: LogLevel,
    pub message: &'a str,
    pub bound: &'a [Field],
    pub fields: &'a [Field],
}

impl Record<'_> {
    fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.bound.iter().chain(self.fields)
    }

    fn timestamp(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TIME_KEY, &self.timestamp())?;
        map.serialize_entry(LEVEL_KEY, self.level.as_str())?;
        map.serialize_entry(MESSAGE_KEY, self.message)?;
        for field in self.all_fields() {
            map.serialize_entry(field.key(), field.value())?;
        }
        map.end()
    }
}

/// Encode `record` as one newline-terminated line.
pub(crate) fn encode(format: LogFormat, record: &Record<'_>) -> io::Result<Vec<u8>> {
    let mut line = Vec::with_capacity(128);
    match format {
        LogFormat::Json => serde_json::to_writer(&mut line, record)?,
        LogFormat::Text => write_text(&mut line, record)?,
    }
    line.push(b'\n');
    Ok(line)
}

fn write_text(out: &mut Vec<u8>, record: &Record<'_>) -> io::Result<()> {
    write!(out, "{}={}", TIME_KEY, record.timestamp())?;
    write!(out, " {}={}", LEVEL_KEY, record.level.as_str())?;
    out.extend_from_slice(b" ");
    write_text_pair(out, MESSAGE_KEY, record.message)?;

    for field in record.all_fields() {
        out.extend_from_slice(b" ");
        match field.value() {
            Value::String(s) => write_text_pair(out, field.key(), s)?,
            Value::Null => write_text_pair(out, field.key(), "<nil>")?,
            other => write_text_pair(out, field.key(), &other.to_string())?,
        }
    }
    Ok(())
}

fn write_text_pair(out: &mut Vec<u8>, key: &str, value: &str) -> io::Result<()> {
    write_text_atom(out, key)?;
    out.extend_from_slice(b"=");
    write_text_atom(out, value)
}

fn write_text_atom(out: &mut Vec<u8>, s: &str) -> io::Result<()> {
    if needs_quoting(s) {
        serde_json::to_writer(out, s).map_err(io::Error::from)
    } else {
        out.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s.chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"')
}
