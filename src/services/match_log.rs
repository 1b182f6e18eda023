use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::MatchResult;

/// Errors that can occur while appending to the match log
#[derive(Debug, Error)]
pub enum MatchLogError {
    #[error("Match log I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One successful match, as written to the log
#[derive(Debug, Clone)]
pub struct MatchLogEntry {
    pub request_id: Uuid,
    pub logged_at: DateTime<Utc>,
    pub requester_ids: Vec<String>,
    pub recommendations: Vec<String>,
    pub similar_user_id: String,
    pub similarity: f64,
}

impl MatchLogEntry {
    pub fn new(requester_ids: Vec<String>, result: &MatchResult) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            logged_at: Utc::now(),
            requester_ids,
            recommendations: result.recommendations.clone(),
            similar_user_id: result.neighbor_id.clone(),
            similarity: result.similarity,
        }
    }

    /// Plain-text block, terminated by a blank line
    pub fn render(&self) -> String {
        let mut block = String::new();
        let _ = writeln!(block, "[{}] request {}", self.logged_at.to_rfc3339(), self.request_id);
        let _ = writeln!(block, "user_id: {}", self.requester_ids.join(", "));
        let _ = writeln!(block, "recommendations: {}", self.recommendations.join(", "));
        let _ = writeln!(block, "similar_user_id: {}", self.similar_user_id);
        let _ = writeln!(block, "similarity: {}", self.similarity);
        block.push('\n');
        block
    }
}

/// Append-only text log of successful matches
///
/// Writes are best effort: failures are reported through `tracing` and never
/// reach the caller. Concurrent appends are serialized.
pub struct MatchLog {
    path: Option<PathBuf>,
    write_lock: Mutex<()>,
}

impl MatchLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an entry, swallowing any failure
    pub async fn record(&self, entry: &MatchLogEntry) {
        if let Err(e) = self.try_record(entry).await {
            tracing::warn!("Failed to append to match log: {}", e);
        }
    }

    /// Append an entry, reporting failures
    pub async fn try_record(&self, entry: &MatchLogEntry) -> Result<(), MatchLogError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.write_lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        file.write_all(entry.render().as_bytes()).await?;
        file.flush().await?;

        tracing::trace!("Appended match log entry {}", entry.request_id);
        Ok(())
    }
}

impl Default for MatchLog {
    fn default() -> Self {
        Self::disabled()
    }
}
