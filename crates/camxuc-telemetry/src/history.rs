//! Classification history
//!
//! Append-only log of past classifications with a "most recent N" query.
//! Records are never updated or deleted here; retention belongs to whoever
//! manages the storage.
//!
//! [`JsonlHistoryStore`] keeps one JSON object per line:
//!
//! ```text
//! {"id":1,"text":"Hôm nay tôi rất vui","sentiment":"POSITIVE","timestamp":"2024-05-01 09:30:12"}
//! ```

use camxuc_core::{Error, HistoryRecord, Result, Sentiment, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Number of records shown in the history view
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Current local time formatted for history records
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Storage seam for classification history
pub trait HistoryStore: Send + Sync {
    /// Persist a classification and return the stored record
    fn append(&self, text: &str, sentiment: Sentiment, timestamp: &str) -> Result<HistoryRecord>;

    /// Up to `limit` records, newest timestamp first
    fn query_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>>;
}

/// History store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// JSON-lines file holding the history
    #[serde(default = "default_history_path")]
    pub path: PathBuf,

    /// Records returned for the history view
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            limit: default_history_limit(),
        }
    }
}

fn default_history_path() -> PathBuf {
    PathBuf::from("sentiments.jsonl")
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn check_timestamp(timestamp: &str) -> Result<()> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map(|_| ())
        .map_err(|e| Error::history(format!("Invalid timestamp '{timestamp}': {e}")))
}

/// Newest first; records stamped within the same second fall back to id order.
fn most_recent(mut records: Vec<HistoryRecord>, limit: usize) -> Vec<HistoryRecord> {
    records.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
    records.truncate(limit);
    records
}

/// In-process history, lost on exit
#[derive(Default)]
pub struct MemoryHistoryStore {
    records: Mutex<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn append(&self, text: &str, sentiment: Sentiment, timestamp: &str) -> Result<HistoryRecord> {
        check_timestamp(timestamp)?;

        let mut records = self.records.lock();
        let record = HistoryRecord {
            id: records.len() as u64 + 1,
            text: text.to_string(),
            sentiment,
            timestamp: timestamp.to_string(),
        };
        records.push(record.clone());
        Ok(record)
    }

    fn query_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        Ok(most_recent(self.records.lock().clone(), limit))
    }
}

struct JsonlWriter {
    sink: Box<dyn Write + Send>,
    next_id: u64,
}

/// File-backed history in JSON-lines format
pub struct JsonlHistoryStore {
    path: PathBuf,
    writer: Mutex<JsonlWriter>,
}

impl JsonlHistoryStore {
    /// Open (or create) the history file at `path`.
    ///
    /// Ids continue from the largest id already in the file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let existing = read_records(&path)?;
        let next_id = existing
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| Error::history(format!("No ids left after the last record in {path:?}")))?;

        info!(
            "Opened history at {:?} ({} records)",
            path,
            existing.len()
        );

        Ok(Self::with_sink(path, Box::new(file), next_id))
    }

    fn with_sink(path: PathBuf, sink: Box<dyn Write + Send>, next_id: u64) -> Self {
        Self {
            path,
            writer: Mutex::new(JsonlWriter { sink, next_id }),
        }
    }

    /// Open the store described by `config`
    pub fn from_config(config: &HistoryConfig) -> Result<Self> {
        Self::open(&config.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse every well-formed record in `path`. Lines that do not match the
/// record schema are skipped.
fn read_records(path: &Path) -> Result<Vec<HistoryRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<HistoryRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!("Skipping malformed history line: {}", e);
                continue;
            }
        }
    }

    Ok(records)
}

impl HistoryStore for JsonlHistoryStore {
    fn append(&self, text: &str, sentiment: Sentiment, timestamp: &str) -> Result<HistoryRecord> {
        check_timestamp(timestamp)?;

        let mut writer = self.writer.lock();
        let id = writer.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| Error::history("History ids exhausted"))?;

        let record = HistoryRecord {
            id,
            text: text.to_string(),
            sentiment,
            timestamp: timestamp.to_string(),
        };

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        // An id is spent once a write is attempted: a partial line may already be on disk.
        writer.next_id = next_id;
        if let Err(e) = writer.sink.write_all(line.as_bytes()) {
            // Terminate any partial line so it cannot swallow the next record.
            let _ = writer.sink.write_all(b"\n");
            return Err(e.into());
        }
        writer.sink.flush()?;

        debug!(id = record.id, sentiment = %record.sentiment, "Appended history record");
        Ok(record)
    }

    fn query_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        // Hold the writer lock so a concurrent append is either fully visible or absent.
        let _writer = self.writer.lock();
        Ok(most_recent(read_records(&self.path)?, limit))
    }
}
