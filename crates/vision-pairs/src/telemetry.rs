//! Fire-and-forget key/value telemetry.
//!
//! A sink accepts a value per key and returns nothing: there is no
//! acknowledgment, no retry, and a later publish under the same key
//! replaces the earlier one.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Value published under a telemetry key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelemetryValue {
    Boolean(bool),
    Number(f64),
    StringArray(Vec<String>),
}

impl TelemetryValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TelemetryValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TelemetryValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string_array(&self) -> Option<&[String]> {
        match self {
            TelemetryValue::StringArray(v) => Some(v),
            _ => None,
        }
    }
}

/// Best-effort, last-write-wins publication channel.
pub trait TelemetrySink {
    fn publish(&self, key: &str, value: TelemetryValue);
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &T {
    fn publish(&self, key: &str, value: TelemetryValue) {
        (**self).publish(key, value)
    }
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for std::sync::Arc<T> {
    fn publish(&self, key: &str, value: TelemetryValue) {
        (**self).publish(key, value)
    }
}

/// Fully-qualified telemetry keys under one table prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelemetryKeys {
    pub target_pairs: String,
    pub process_time: String,
    pub post_process_time: String,
    pub image_center_x: String,
    pub is_ordered: String,
}

impl TelemetryKeys {
    pub fn new(table: &str) -> Self {
        Self {
            target_pairs: format!("{table}/targetPairs"),
            process_time: format!("{table}/processTime"),
            post_process_time: format!("{table}/postProcessTime"),
            image_center_x: format!("{table}/imageCenterX"),
            is_ordered: format!("{table}/isOrdered"),
        }
    }
}

impl Default for TelemetryKeys {
    fn default() -> Self {
        Self::new(crate::DEFAULT_TABLE)
    }
}

/// In-process table holding the latest value per key.
#[derive(Debug, Default)]
pub struct MemoryTelemetry {
    entries: Mutex<HashMap<String, TelemetryValue>>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value published under `key`.
    pub fn get(&self, key: &str) -> Option<TelemetryValue> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TelemetrySink for MemoryTelemetry {
    fn publish(&self, key: &str, value: TelemetryValue) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    key: &'a str,
    value: &'a TelemetryValue,
}

/// Writes one JSON object per publication, one per line.
///
/// Write failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct JsonLinesTelemetry<W> {
    out: Mutex<W>,
}

impl<W: Write> JsonLinesTelemetry<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> TelemetrySink for JsonLinesTelemetry<W> {
    fn publish(&self, key: &str, value: TelemetryValue) {
        let line = match serde_json::to_string(&Entry { key, value: &value }) {
            Ok(line) => line,
            Err(err) => {
                log::warn!("dropping telemetry for {key}: {err}");
                return;
            }
        };
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            log::warn!("telemetry write failed for {key}: {err}");
        }
    }
}
