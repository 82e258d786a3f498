use crate::emitter::Producer;
use serde::{Deserialize, Serialize};

/// Configuration for an indexing run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Name of the index file written inside the scanned directory
    pub output_name: String,

    /// Visit files sorted by name instead of directory order
    pub sort_by_name: bool,

    /// Also read `.info.gz` manuals
    pub include_compressed: bool,

    /// Tool named on the `Produced by:` line
    pub producer: Producer,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            output_name: "dir".to_string(),
            sort_by_name: false,
            include_compressed: true,
            producer: Producer::default(),
        }
    }
}

impl IndexerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.output_name.is_empty() {
            return Err("output_name must not be empty".to_string());
        }

        if self.output_name.contains(['/', '\\']) || matches!(self.output_name.as_str(), "." | "..")
        {
            return Err(format!(
                "output_name ({}) must be a plain file name",
                self.output_name
            ));
        }

        if self.producer.name.is_empty() {
            return Err("producer name must not be empty".to_string());
        }

        Ok(())
    }
}
