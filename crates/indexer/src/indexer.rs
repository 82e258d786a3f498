use crate::config::IndexerConfig;
use crate::emitter::{EmitOutcome, IndexEmitter};
use crate::line_source::open_line_source;
use crate::registry::SectionRegistry;
use crate::scanner::{InfoFile, InfoScanner, ScannedFiles};
use crate::stanza::{ParseSummary, StanzaParser};
use crate::{IndexStats, IndexerError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of a full run: what was read and what happened to the index file.
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    pub root: PathBuf,
    pub stats: IndexStats,
    pub outcome: EmitOutcome,
}

/// Builds the `dir` index for one directory of info manuals.
pub struct InfoIndexer {
    root: PathBuf,
    config: IndexerConfig,
}

impl InfoIndexer {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, IndexerConfig::default())
    }

    pub fn with_config(root: impl AsRef<Path>, config: IndexerConfig) -> Result<Self> {
        config.validate().map_err(IndexerError::InvalidConfig)?;
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    fn scanner(&self) -> InfoScanner {
        InfoScanner::new(&self.root)
            .output_name(self.config.output_name.clone())
            .include_compressed(self.config.include_compressed)
            .sort_by_name(self.config.sort_by_name)
    }

    /// Parse every matching file into a fresh registry.
    ///
    /// Files that cannot be opened or read are logged and skipped.
    pub fn collect(&self) -> Result<(SectionRegistry, IndexStats)> {
        let start = Instant::now();
        let scanned = self.scanner().scan()?;
        let (registry, mut stats) = collect_files(scanned)?;
        stats.time_ms = start.elapsed().as_millis() as u64;
        Ok((registry, stats))
    }

    /// Collect every file then write (or remove) the index file.
    pub fn run(&self) -> Result<IndexReport> {
        let (registry, mut stats) = self.collect()?;

        let emitter = IndexEmitter::new(
            &self.root,
            &self.config.output_name,
            self.config.producer.clone(),
        );
        log::debug!("Emitting {}", emitter.path().display());
        let start = Instant::now();
        let outcome = emitter.emit(registry)?;
        stats.time_ms += start.elapsed().as_millis() as u64;

        log::info!(
            "Indexed {} of {} files into {}: {} sections, {} entries ({} errors)",
            stats.files_parsed,
            stats.files_found,
            outcome.path().display(),
            stats.sections,
            stats.entries,
            stats.errors.len()
        );

        Ok(IndexReport {
            root: self.root.clone(),
            stats,
            outcome,
        })
    }
}

/// Parse scanned files in order, skipping the ones that fail.
fn collect_files(scanned: ScannedFiles) -> Result<(SectionRegistry, IndexStats)> {
    let mut registry = SectionRegistry::new();
    let mut stats = IndexStats::new();
    stats.files_found = scanned.files.len();
    for skipped in scanned.skipped {
        stats.add_error(skipped);
    }

    for file in &scanned.files {
        match parse_file(file, &mut registry) {
            Ok(summary) => {
                log::debug!(
                    "Parsed {}: {} sections, {} entries",
                    file.path.display(),
                    summary.section_markers,
                    summary.entries
                );
                stats.add_file(&summary, file.encoding.is_compressed());
            }
            Err((err, partial)) if err.is_per_file() => {
                log::warn!("{err}");
                stats.entries += partial.entries;
                stats.dropped_entries += partial.dropped_entries;
                stats.add_error(err.to_string());
            }
            Err((err, _)) => return Err(err),
        }
    }

    stats.sections = registry.len();
    Ok((registry, stats))
}

/// Parse one file. The handle is closed on every path out of here.
fn parse_file(
    file: &InfoFile,
    registry: &mut SectionRegistry,
) -> std::result::Result<ParseSummary, (IndexerError, ParseSummary)> {
    let mut source = open_line_source(&file.path, file.encoding).map_err(|source| {
        (
            IndexerError::OpenFile {
                path: file.path.clone(),
                source,
            },
            ParseSummary::default(),
        )
    })?;

    let mut parser = StanzaParser::new();
    match parser.consume(source.as_mut(), registry) {
        Ok(()) => Ok(parser.finish()),
        Err(source) => Err((
            IndexerError::ReadFile {
                path: file.path.clone(),
                source,
            },
            parser.finish(),
        )),
    }
}
