//! Streaming writer for Hypermesh bulk-data set documents.

use std::io::Write;

use crate::error::Error;
use crate::ranges::{BisectingCompressor, Compressor};
use crate::sets::{IdentifierSet, SetCollection, SetKind};

use super::token::{tokens, Token};

/// First line of every document.
pub const HEADER: &str = "CEND";

/// Marker opening the (empty) bulk-data section.
pub const BEGIN_BULK: &str = "BEGIN BULK";

/// Last line of every document.
pub const END_DATA: &str = "ENDDATA";

/// Number of set entries written per physical line.
pub const ENTRIES_PER_LINE: usize = 8;

/// Writes set records to an underlying sink.
///
/// A complete document is `write_header`, any number of `write_set` calls
/// with ids counting up from 1, then `write_trailer`. [`write_document`]
/// does all of that for a [`SetCollection`].
pub struct BdfWriter<W> {
    inner: W,
    kind: SetKind,
}

impl<W: Write> BdfWriter<W> {
    /// Creates a writer tagging every set with `kind`.
    pub fn new(inner: W, kind: SetKind) -> Self {
        Self { inner, kind }
    }

    /// Writes the document header.
    pub fn write_header(&mut self) -> Result<(), Error> {
        writeln!(self.inner, "{HEADER}").map_err(Error::WriteDocument)
    }

    /// Compresses the set and writes its `SET` card followed by the `$HMSET`
    /// metadata line.
    pub fn write_set(&mut self, id: usize, set: &IdentifierSet<'_>) -> Result<(), Error> {
        tracing::info!(set = %set.name, members = set.len(), "{} {}", set.name, set.len());

        if set.name.contains('"') {
            tracing::warn!(set = %set.name, "set name contains a double quote and is written unescaped");
        }

        let runs = BisectingCompressor.compress(&set.to_vec());
        let entries = tokens(&runs);

        self.write_entries(id, &entries)
            .and_then(|_| {
                writeln!(
                    self.inner,
                    "$HMSET {id:8} {kind:8} \"{name}\"",
                    kind = self.kind.code(),
                    name = set.name,
                )
            })
            .map_err(Error::WriteDocument)
    }

    /// Writes the bulk-data trailer.
    pub fn write_trailer(&mut self) -> Result<(), Error> {
        writeln!(self.inner, "{BEGIN_BULK}")
            .and_then(|_| writeln!(self.inner, "{END_DATA}"))
            .map_err(Error::WriteDocument)
    }

    /// Flushes the sink and hands it back.
    pub fn finish(mut self) -> Result<W, Error> {
        self.inner.flush().map_err(Error::WriteDocument)?;
        Ok(self.inner)
    }

    /// Writes `SET <id> = ` and the entries, wrapped at
    /// [`ENTRIES_PER_LINE`]. Every line but the last ends in a comma.
    fn write_entries(&mut self, id: usize, entries: &[Token]) -> std::io::Result<()> {
        write!(self.inner, "SET{id:5} = ")?;

        if entries.is_empty() {
            return writeln!(self.inner);
        }

        let mut lines = entries.chunks(ENTRIES_PER_LINE).peekable();
        while let Some(line) = lines.next() {
            for (i, entry) in line.iter().enumerate() {
                if i > 0 {
                    write!(self.inner, ",")?;
                }
                write!(self.inner, "{entry}")?;
            }

            if lines.peek().is_some() {
                writeln!(self.inner, ",")?;
            } else {
                writeln!(self.inner)?;
            }
        }

        Ok(())
    }
}

/// Writes a complete document for `sets` to `out`, numbering sets from 1 in
/// name order. Returns the flushed sink.
///
/// Nothing is cleaned up on failure; the caller decides what to do with a
/// partially written sink.
#[tracing::instrument(skip_all, fields(sets = sets.len(), %kind))]
pub fn write_document<W: Write>(out: W, sets: &SetCollection, kind: SetKind) -> Result<W, Error> {
    let mut writer = BdfWriter::new(out, kind);

    writer.write_header()?;
    for (id, set) in (1..).zip(sets.iter()) {
        writer.write_set(id, &set)?;
    }
    writer.write_trailer()?;

    writer.finish()
}

/// Renders the document for `sets` into a string.
pub fn render(sets: &SetCollection, kind: SetKind) -> Result<String, Error> {
    let bytes = write_document(Vec::new(), sets, kind)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
