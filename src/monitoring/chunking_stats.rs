use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

const HISTORY_SIZE: usize = 50;

static SNAPSHOTS: Lazy<Mutex<VecDeque<ChunkingSnapshot>>> =
    Lazy::new(|| Mutex::new(VecDeque::with_capacity(HISTORY_SIZE)));

/// What one parse request did: how much came in, how many sections went out.
#[derive(Clone, Serialize, Debug)]
pub struct ChunkingSnapshot {
    pub recorded_at: String,
    pub request_id: String,
    pub file: String,
    pub input_bytes: usize,
    pub sections: usize,
    pub duration_ms: u64,
}

impl ChunkingSnapshot {
    pub fn new(
        request_id: &str,
        file: &str,
        input_bytes: usize,
        sections: usize,
        duration_ms: u64,
    ) -> Self {
        Self {
            recorded_at: Utc::now().to_rfc3339(),
            request_id: request_id.to_string(),
            file: file.to_string(),
            input_bytes,
            sections,
            duration_ms,
        }
    }
}

pub fn record_snapshot(snapshot: ChunkingSnapshot) {
    tracing::debug!(
        target: "chunking_snapshot",
        file = %snapshot.file,
        sections = snapshot.sections,
        duration_ms = snapshot.duration_ms,
        "chunking completed"
    );

    if let Ok(mut guard) = SNAPSHOTS.lock() {
        if guard.len() == HISTORY_SIZE {
            guard.pop_front();
        }
        guard.push_back(snapshot);
    }
}

pub fn latest_snapshot() -> Option<ChunkingSnapshot> {
    SNAPSHOTS
        .lock()
        .ok()
        .and_then(|guard| guard.back().cloned())
}

/// Most recent snapshots, newest first.
pub fn snapshot_history(limit: usize) -> Vec<ChunkingSnapshot> {
    let limit = limit.clamp(1, HISTORY_SIZE);
    SNAPSHOTS
        .lock()
        .map(|guard| guard.iter().rev().take(limit).cloned().collect())
        .unwrap_or_default()
}
