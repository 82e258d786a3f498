use crate::registry::SectionRegistry;
use crate::stanza::SENTINEL;
use crate::{IndexerError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const TOP_NODE: &[u8] = b"File: dir,\tNode: Top\tThis is the top of the INFO tree\n";

const HELP: &[u8] = b"  This (the Directory node) gives a menu of major topics.\n\
\x20 Typing \"q\" exits, \"?\" lists all Info commands, \"d\" returns here,\n\
\x20 \"h\" gives a primer for first-timers,\n\
\x20 \"mXXX<Return>\" visits the XXX manual, etc.\n";

const MENU: &[u8] = b"* Menu:\n";

/// Tool named on the `Produced by:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
}

impl Default for Producer {
    fn default() -> Self {
        Self {
            name: "indexinfo".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// What happened to the index file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmitOutcome {
    Written {
        path: PathBuf,
        sections: usize,
        entries: usize,
        bytes: u64,
    },
    /// No sections were found and a stale index was deleted.
    Removed { path: PathBuf },
    /// No sections were found and there was no index to delete.
    Absent { path: PathBuf },
}

impl EmitOutcome {
    pub fn path(&self) -> &Path {
        match self {
            EmitOutcome::Written { path, .. }
            | EmitOutcome::Removed { path }
            | EmitOutcome::Absent { path } => path,
        }
    }
}

/// Serialise `registry` in `dir` format, consuming it section by section.
///
/// Returns the number of bytes written.
pub fn write_index<W: Write>(
    registry: SectionRegistry,
    producer: &Producer,
    out: &mut W,
) -> io::Result<u64> {
    let mut out = CountingWriter::new(out);

    writeln!(out, "Produced by: {} {}.", producer.name, producer.version)?;
    out.write_all(&[SENTINEL, b'\n'])?;
    out.write_all(TOP_NODE)?;
    out.write_all(b"\n")?;
    out.write_all(HELP)?;
    out.write_all(b"\n")?;
    out.write_all(MENU)?;

    for section in registry.into_sections() {
        log::debug!(
            "Writing section {:?} ({} entries)",
            section.display_name(),
            section.entries().len()
        );
        let (name, entries) = section.into_parts();
        out.write_all(b"\n")?;
        out.write_all(&name)?;
        out.write_all(b"\n")?;
        for entry in entries {
            out.write_all(&entry)?;
            out.write_all(b"\n")?;
        }
    }

    out.flush()?;
    Ok(out.written)
}

/// Writes (or removes) the index file inside the scanned directory.
#[derive(Debug, Clone)]
pub struct IndexEmitter {
    path: PathBuf,
    producer: Producer,
}

impl IndexEmitter {
    pub fn new(dir: impl AsRef<Path>, output_name: &str, producer: Producer) -> Self {
        Self {
            path: dir.as_ref().join(output_name),
            producer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn emit(&self, registry: SectionRegistry) -> Result<EmitOutcome> {
        if registry.is_empty() {
            return self.remove_stale();
        }

        let sections = registry.len();
        let entries = registry.entry_count();
        let write_err = |source| IndexerError::WriteIndex {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        let bytes = write_index(registry, &self.producer, &mut writer).map_err(write_err)?;
        writer
            .into_inner()
            .map_err(|e| write_err(e.into_error()))?
            .sync_all()
            .map_err(write_err)?;

        log::info!(
            "Wrote {} ({sections} sections, {entries} entries)",
            self.path.display()
        );
        Ok(EmitOutcome::Written {
            path: self.path.clone(),
            sections,
            entries,
            bytes,
        })
    }

    fn remove_stale(&self) -> Result<EmitOutcome> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("No sections found, removed {}", self.path.display());
                Ok(EmitOutcome::Removed {
                    path: self.path.clone(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No sections found and no {} to remove", self.path.display());
                Ok(EmitOutcome::Absent {
                    path: self.path.clone(),
                })
            }
            Err(source) => Err(IndexerError::RemoveIndex {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
