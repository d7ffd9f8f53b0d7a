use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Store statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub opened_at: DateTime<Utc>,

    // Storage
    pub record_count: usize,
    pub backing_file_bytes: u64,

    // Mutations
    pub inserts: u64,
    pub deletes: u64,
    pub rejected_inserts: u64, // duplicate primary key
    pub rejected_deletes: u64, // primary key not present

    pub queries: u64,
}

/// Running counters kept by the store
#[derive(Debug, Clone, Default)]
pub struct Counters {
    pub inserts: u64,
    pub deletes: u64,
    pub rejected_inserts: u64,
    pub rejected_deletes: u64,
    pub queries: u64,
}

impl DatabaseStats {
    pub fn mutations(&self) -> u64 {
        self.inserts + self.deletes
    }

    pub fn rejection_rate(&self) -> f64 {
        let attempts = self.mutations() + self.rejected_inserts + self.rejected_deletes;
        if attempts == 0 {
            0.0
        } else {
            (self.rejected_inserts + self.rejected_deletes) as f64 / attempts as f64
        }
    }
}
