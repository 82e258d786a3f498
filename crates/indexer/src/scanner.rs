use crate::line_source::Encoding;
use crate::{IndexerError, Result};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const PLAIN_SUFFIX: &str = ".info";
const GZIP_SUFFIX: &str = ".info.gz";
const MIN_NAME_LEN: usize = 5;

/// An info manual selected for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoFile {
    pub path: PathBuf,
    pub encoding: Encoding,
}

/// Result of one directory scan.
#[derive(Debug, Default)]
pub struct ScannedFiles {
    pub files: Vec<InfoFile>,
    /// Diagnostics for directory entries that could not be read.
    pub skipped: Vec<String>,
}

/// Scanner for info manuals directly inside one directory
pub struct InfoScanner {
    root: PathBuf,
    output_name: String,
    include_compressed: bool,
    sort_by_name: bool,
}

impl InfoScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            output_name: "dir".to_string(),
            include_compressed: true,
            sort_by_name: false,
        }
    }

    /// Never select the index file itself.
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    pub fn include_compressed(mut self, yes: bool) -> Self {
        self.include_compressed = yes;
        self
    }

    pub fn sort_by_name(mut self, yes: bool) -> Self {
        self.sort_by_name = yes;
        self
    }

    /// List matching files in traversal order (or by name when sorting).
    ///
    /// Only an unreadable root is fatal; unreadable children are skipped and
    /// reported in [`ScannedFiles::skipped`].
    pub fn scan(&self) -> Result<ScannedFiles> {
        let mut walker = WalkDir::new(&self.root)
            .min_depth(0)
            .max_depth(1)
            .follow_links(true);
        if self.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut scanned = ScannedFiles::default();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk failed"));
                    return Err(self.open_dir_error(source));
                }
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    scanned.skipped.push(e.to_string());
                    continue;
                }
            };

            if entry.depth() == 0 {
                if !entry.file_type().is_dir() {
                    return Err(self.open_dir_error(io::Error::new(
                        io::ErrorKind::Other,
                        "not a directory",
                    )));
                }
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(encoding) = self.classify(entry.file_name()) else {
                continue;
            };

            scanned.files.push(InfoFile {
                path: entry.into_path(),
                encoding,
            });
        }

        log::debug!(
            "Found {} info files in {} ({} unreadable entries)",
            scanned.files.len(),
            self.root.display(),
            scanned.skipped.len()
        );
        Ok(scanned)
    }

    fn classify(&self, name: &OsStr) -> Option<Encoding> {
        let name = name.to_string_lossy();
        if name.len() < MIN_NAME_LEN || name == self.output_name.as_str() {
            return None;
        }
        if name.ends_with(PLAIN_SUFFIX) {
            return Some(Encoding::Plain);
        }
        if self.include_compressed && name.ends_with(GZIP_SUFFIX) {
            return Some(Encoding::Gzip);
        }
        None
    }

    fn open_dir_error(&self, source: io::Error) -> IndexerError {
        IndexerError::OpenDirectory {
            path: self.root.clone(),
            source,
        }
    }
}
