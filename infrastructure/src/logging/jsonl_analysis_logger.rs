//! Append-only JSONL transcript of analysis requests.
//!
//! Each [`AnalysisEvent`] becomes one JSON object per line carrying `type`,
//! `timestamp` and the event payload. Runs append to the same file.

use sage_application::ports::analysis_logger::{AnalysisEvent, AnalysisLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct JsonlAnalysisLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAnalysisLogger {
    /// Open `path` for appending, creating it and its parent directories.
    ///
    /// Returns `None` (with a warning) when the file cannot be opened; the
    /// caller then runs without an analysis log.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create analysis log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                writer: Mutex::new(BufWriter::new(file)),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open analysis log {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: AnalysisEvent, timestamp: String) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), Value::String(event.event_type.to_string()));
    map.insert("timestamp".into(), Value::String(timestamp));
    match event.payload {
        Value::Object(fields) => {
            for (key, value) in fields {
                // type and timestamp are reserved
                map.entry(key).or_insert(value);
            }
        }
        other => {
            map.insert("data".into(), other);
        }
    }
    Value::Object(map)
}

impl AnalysisLogger for JsonlAnalysisLogger {
    fn log(&self, event: AnalysisEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&record(event, timestamp)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlAnalysisLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
