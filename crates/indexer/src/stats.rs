use crate::stanza::ParseSummary;
use serde::{Deserialize, Serialize};

/// Statistics about an indexing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of matching files found in the directory
    pub files_found: usize,

    /// Number of files parsed to completion (or to their terminator)
    pub files_parsed: usize,

    /// Number of gzip-compressed files among those parsed
    pub files_compressed: usize,

    /// Files that stopped early at the 0x1F terminator
    pub files_terminated: usize,

    /// Entries accepted into a section
    pub entries: usize,

    /// Entry lines dropped because no section was declared yet
    pub dropped_entries: usize,

    /// Distinct sections after merging
    pub sections: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Errors encountered
    pub errors: Vec<String>,
}

impl IndexStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, summary: &ParseSummary, compressed: bool) {
        self.files_parsed += 1;
        if compressed {
            self.files_compressed += 1;
        }
        if summary.hit_sentinel {
            self.files_terminated += 1;
        }
        self.entries += summary.entries;
        self.dropped_entries += summary.dropped_entries;
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}
