//! # indexinfo indexer
//!
//! Builds the top-level `dir` node of an info documentation tree.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> Info Scanner (*.info, *.info.gz)
//!     │      └─> Info files
//!     │
//!     ├──> Line Source (plain or gzip) ──> Stanza Parser
//!     │      └─> Section Registry (merged across files)
//!     │
//!     └──> Index Emitter
//!            └─> <dir>/dir
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use indexinfo_indexer::InfoIndexer;
//!
//! fn main() -> indexinfo_indexer::Result<()> {
//!     let report = InfoIndexer::new("/usr/share/info")?.run()?;
//!
//!     println!(
//!         "{} sections, {} entries",
//!         report.stats.sections, report.stats.entries
//!     );
//!     Ok(())
//! }
//! ```

mod config;
mod emitter;
mod error;
mod indexer;
mod line_source;
mod registry;
mod scanner;
mod stanza;
mod stats;

pub use config::IndexerConfig;
pub use emitter::{write_index, EmitOutcome, IndexEmitter, Producer};
pub use error::{IndexerError, Result};
pub use indexer::{IndexReport, InfoIndexer};
pub use line_source::{open_line_source, Encoding, GzipLines, LineSource, PlainLines};
pub use registry::{Section, SectionId, SectionRegistry};
pub use scanner::{InfoFile, InfoScanner, ScannedFiles};
pub use stanza::{
    parse_source, Flow, ParseSummary, StanzaParser, ENTRY_END, ENTRY_START, SECTION_PREFIX,
    SENTINEL,
};
pub use stats::IndexStats;
