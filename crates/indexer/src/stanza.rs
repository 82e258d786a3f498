use crate::line_source::LineSource;
use crate::registry::{SectionId, SectionRegistry};
use serde::Serialize;
use std::io;

/// Unit separator; a line starting with it ends the metadata block.
pub const SENTINEL: u8 = 0x1F;

pub const SECTION_PREFIX: &[u8] = b"INFO-DIR-SECTION ";
pub const ENTRY_START: &[u8] = b"START-INFO-DIR-ENTRY";
pub const ENTRY_END: &[u8] = b"END-INFO-DIR-ENTRY";

/// Whether the parser wants more lines from the current file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// What a single file contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines: usize,
    pub section_markers: usize,
    pub entries: usize,
    /// Entry lines seen inside a block before any section was declared.
    pub dropped_entries: usize,
    pub hit_sentinel: bool,
}

/// Per-file state machine over `INFO-DIR-SECTION` / `START-INFO-DIR-ENTRY` /
/// `END-INFO-DIR-ENTRY` stanzas.
///
/// A new parser is used for every file: section context never leaks from one
/// file into the next.
#[derive(Debug, Default)]
pub struct StanzaParser {
    current: Option<SectionId>,
    in_entry: bool,
    summary: ParseSummary,
}

impl StanzaParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, registry: &mut SectionRegistry, line: &[u8]) -> Flow {
        self.summary.lines += 1;

        if line.first() == Some(&SENTINEL) {
            self.summary.hit_sentinel = true;
            return Flow::Stop;
        }

        if let Some(rest) = line.strip_prefix(SECTION_PREFIX) {
            let name = skip_leading_space(rest);
            self.current = Some(registry.open_section(name));
            self.summary.section_markers += 1;
            return Flow::Continue;
        }

        if line == ENTRY_START {
            self.in_entry = true;
        } else if line == ENTRY_END {
            self.in_entry = false;
        } else if self.in_entry && line.first() == Some(&b'*') {
            match self.current {
                Some(id) => {
                    registry.push_entry(id, line);
                    self.summary.entries += 1;
                }
                None => self.summary.dropped_entries += 1,
            }
        }

        Flow::Continue
    }

    /// Feed every line of `source` until it ends or the terminator is hit.
    ///
    /// On a read error the entries already taken from `source` stay in the
    /// registry and in [`summary`](Self::summary).
    pub fn consume(
        &mut self,
        source: &mut dyn LineSource,
        registry: &mut SectionRegistry,
    ) -> io::Result<()> {
        while let Some(line) = source.next_line()? {
            if self.feed(registry, line) == Flow::Stop {
                break;
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    pub fn finish(self) -> ParseSummary {
        self.summary
    }
}

/// Run a fresh parser over `source`.
pub fn parse_source(
    source: &mut dyn LineSource,
    registry: &mut SectionRegistry,
) -> io::Result<ParseSummary> {
    let mut parser = StanzaParser::new();
    parser.consume(source, registry)?;
    Ok(parser.finish())
}

// Space, tab, newline, vertical tab, form feed, carriage return.
fn skip_leading_space(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r'))
        .unwrap_or(bytes.len());
    &bytes[start..]
}
