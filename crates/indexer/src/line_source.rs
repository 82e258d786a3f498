use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// How the bytes of an info file are stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Plain,
    Gzip,
}

impl Encoding {
    pub const fn is_compressed(self) -> bool {
        matches!(self, Encoding::Gzip)
    }
}

/// A stream of lines with the trailing `\n` removed.
///
/// Lines are raw bytes: info manuals are not guaranteed to be UTF-8 and
/// entries are copied to the index verbatim.
pub trait LineSource {
    /// Returns the next line, `Ok(None)` at end of stream.
    ///
    /// The returned slice is only valid until the next call.
    fn next_line(&mut self) -> io::Result<Option<&[u8]>>;
}

/// Line reader over any buffered byte stream.
pub struct PlainLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> PlainLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> LineSource for PlainLines<R> {
    fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        Ok(Some(&self.buf))
    }
}

/// Line reader that inflates a gzip stream on the fly.
pub struct GzipLines<R: Read> {
    inner: PlainLines<BufReader<MultiGzDecoder<R>>>,
}

impl<R: Read> GzipLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: PlainLines::new(BufReader::new(MultiGzDecoder::new(reader))),
        }
    }
}

impl<R: Read> LineSource for GzipLines<R> {
    fn next_line(&mut self) -> io::Result<Option<&[u8]>> {
        self.inner.next_line()
    }
}

/// Open `path` with the line reader matching its encoding.
pub fn open_line_source(path: &Path, encoding: Encoding) -> io::Result<Box<dyn LineSource>> {
    let file = File::open(path)?;
    Ok(match encoding {
        Encoding::Plain => Box::new(PlainLines::new(BufReader::new(file))),
        Encoding::Gzip => Box::new(GzipLines::new(file)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    fn drain(source: &mut dyn LineSource) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line.to_vec());
        }
        lines
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn strips_newline_and_keeps_unterminated_tail() {
        let mut source = PlainLines::new(Cursor::new(b"one\ntwo\r\n\nthree".to_vec()));
        assert_eq!(
            drain(&mut source),
            vec![
                b"one".to_vec(),
                b"two\r".to_vec(),
                Vec::new(),
                b"three".to_vec()
            ]
        );
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let mut source = PlainLines::new(Cursor::new(Vec::new()));
        assert!(source.next_line().unwrap().is_none());
        assert!(source.next_line().unwrap().is_none());
    }

    #[test]
    fn reads_lines_longer_than_the_reader_buffer() {
        let long = vec![b'x'; 64 * 1024];
        let mut input = long.clone();
        input.extend_from_slice(b"\nshort\n");
        let mut source = PlainLines::new(BufReader::with_capacity(16, Cursor::new(input)));
        assert_eq!(drain(&mut source), vec![long, b"short".to_vec()]);
    }

    #[test]
    fn gzip_yields_the_same_lines_as_plain() {
        let text = b"INFO-DIR-SECTION Editors\nSTART-INFO-DIR-ENTRY\n* Ed: (ed).\nEND-INFO-DIR-ENTRY";
        let plain = drain(&mut PlainLines::new(Cursor::new(text.to_vec())));
        let inflated = drain(&mut GzipLines::new(Cursor::new(gzip(text))));
        assert_eq!(plain, inflated);
    }

    #[test]
    fn corrupt_gzip_is_a_read_error() {
        let mut source = GzipLines::new(Cursor::new(b"definitely not gzip".to_vec()));
        assert!(source.next_line().is_err());
    }
}
