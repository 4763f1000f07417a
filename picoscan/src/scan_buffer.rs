// SPDX-License-Identifier: Apache-2.0

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::chunk_reader::Reader;
use crate::cursor::{Cursor, Position};
use crate::encoding::CodeUnit;
use crate::options::ScanOptions;

/// Default number of code units requested from a [`Reader`] per chunk.
pub const DEFAULT_CHUNK_CAPACITY: usize = 64;

/// Object-safe view of a [`Reader`] that folds read errors into exhaustion.
trait ChunkSource<C: CodeUnit> {
    /// Fill `buf` with the next chunk. `None` signals exhaustion.
    fn pull(&mut self, buf: &mut [C]) -> Option<usize>;
}

impl<C: CodeUnit, R: Reader<C>> ChunkSource<C> for R {
    fn pull(&mut self, buf: &mut [C]) -> Option<usize> {
        match self.read(buf) {
            Ok(0) => None,
            Ok(n) => Some(n.min(buf.len())),
            Err(e) => {
                log::warn!("source read failed, treating as end of input: {e:?}");
                None
            }
        }
    }
}

/// Chunks materialized so far from a pull source.
///
/// Chunks are only ever appended and never empty, so a `(chunk, offset)`
/// pair stays valid for the life of the buffer.
struct Segments<'s, C: CodeUnit> {
    chunks: Vec<Box<[C]>>,
    /// Logical offset of the first unit of each chunk.
    starts: Vec<usize>,
    source: Box<dyn ChunkSource<C> + 's>,
    exhausted: bool,
    chunk_capacity: usize,
    materialized: usize,
}

impl<C: CodeUnit> Segments<'_, C> {
    /// Pull one more chunk from the source. Returns false once exhausted.
    fn materialize_next(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let mut chunk = vec![C::default(); self.chunk_capacity];
        match self.source.pull(&mut chunk) {
            Some(n) => {
                chunk.truncate(n);
                self.materialized = self.materialized.saturating_add(n);
                log::trace!(
                    "materialized chunk {} ({} units, {} total)",
                    self.chunks.len(),
                    n,
                    self.materialized
                );
                self.starts.push(self.materialized.saturating_sub(n));
                self.chunks.push(chunk.into_boxed_slice());
                true
            }
            None => {
                log::debug!("source exhausted after {} units", self.materialized);
                self.exhausted = true;
                false
            }
        }
    }
}

enum Storage<'s, C: CodeUnit> {
    Contiguous(Cow<'s, [C]>),
    Segmented(RefCell<Segments<'s, C>>),
}

/// Input storage for a scan.
///
/// A buffer is either *contiguous*, backed by one unbroken slice that is
/// borrowed from the caller or owned, or *segmented*, backed by a [`Reader`]
/// whose chunks are pulled on demand as cursors move past the materialized
/// frontier. Cursors borrow the buffer, so the buffer always outlives them.
///
/// A segmented buffer uses interior mutability to materialize chunks through
/// shared cursors and is therefore not `Sync`.
pub struct ScanBuffer<'s, C: CodeUnit = u8> {
    storage: Storage<'s, C>,
}

impl<'s, C: CodeUnit> ScanBuffer<'s, C> {
    /// Contiguous buffer borrowing the caller's code units.
    pub fn new(units: &'s [C]) -> Self {
        Self {
            storage: Storage::Contiguous(Cow::Borrowed(units)),
        }
    }

    /// Contiguous buffer owning its code units.
    pub fn from_vec(units: Vec<C>) -> Self {
        Self {
            storage: Storage::Contiguous(Cow::Owned(units)),
        }
    }

    /// Segmented buffer pulling [`DEFAULT_CHUNK_CAPACITY`] units at a time.
    ///
    /// Materialized chunks are kept until the buffer is dropped, so memory
    /// grows with the amount of input consumed. For long-running sources,
    /// scan a bounded amount of input per buffer and start a fresh buffer
    /// over the same reader (a `&mut R` is itself a [`Reader`]).
    pub fn from_reader<R: Reader<C> + 's>(reader: R) -> Self {
        Self::from_reader_with_capacity(reader, DEFAULT_CHUNK_CAPACITY)
    }

    /// Segmented buffer pulling at most `chunk_capacity` units per read.
    pub fn from_reader_with_capacity<R: Reader<C> + 's>(
        reader: R,
        chunk_capacity: usize,
    ) -> Self {
        Self {
            storage: Storage::Segmented(RefCell::new(Segments {
                chunks: Vec::new(),
                starts: Vec::new(),
                source: Box::new(reader),
                exhausted: false,
                chunk_capacity: chunk_capacity.max(1),
                materialized: 0,
            })),
        }
    }

    /// Segmented buffer using the chunk capacity from `options`.
    pub fn from_reader_with_options<R: Reader<C> + 's>(
        reader: R,
        options: &ScanOptions,
    ) -> Self {
        Self::from_reader_with_capacity(reader, options.chunk_capacity())
    }

    /// Whether every cursor into this buffer addresses one unbroken slice.
    pub fn is_contiguous(&self) -> bool {
        matches!(self.storage, Storage::Contiguous(_))
    }

    /// Cursor at the logical start of the input. The end of the range is the
    /// unbounded [`End`](crate::End) sentinel.
    pub fn get_forward_range(&self) -> Cursor<'_, 's, C> {
        let pos = match self.storage {
            Storage::Contiguous(_) => Position::Contiguous(0),
            Storage::Segmented(_) => Position::Segmented {
                chunk: 0,
                offset: 0,
                logical: 0,
            },
        };
        Cursor::new(self, pos)
    }

    /// Cursor at logical `offset`, materializing chunks as needed.
    ///
    /// Returns `None` if the input ends before `offset`. Locating a chunk
    /// that is already materialized does not walk the input.
    pub fn cursor_at(&self, offset: usize) -> Option<Cursor<'_, 's, C>> {
        let cell = match &self.storage {
            Storage::Contiguous(units) => {
                return (offset <= units.len())
                    .then(|| Cursor::new(self, Position::Contiguous(offset)));
            }
            Storage::Segmented(cell) => cell,
        };
        while cell.borrow().materialized <= offset {
            if !cell.borrow_mut().materialize_next() {
                break;
            }
        }

        let segments = cell.borrow();
        let pos = if offset == segments.materialized {
            // Canonical position past the last materialized unit
            Position::Segmented {
                chunk: segments.chunks.len(),
                offset: 0,
                logical: offset,
            }
        } else {
            let chunk = segments
                .starts
                .partition_point(|&start| start <= offset)
                .checked_sub(1)?;
            let start = segments.starts.get(chunk)?;
            Position::Segmented {
                chunk,
                offset: offset.checked_sub(*start)?,
                logical: offset,
            }
        };
        drop(segments);
        Some(Cursor::new(self, pos))
    }

    /// The whole input, if the buffer is contiguous.
    pub fn contiguous_units(&self) -> Option<&[C]> {
        match &self.storage {
            Storage::Contiguous(units) => Some(units),
            Storage::Segmented(_) => None,
        }
    }

    /// Number of chunks materialized so far. A contiguous buffer is one chunk.
    pub fn chunk_count(&self) -> usize {
        match &self.storage {
            Storage::Contiguous(_) => 1,
            Storage::Segmented(cell) => cell.borrow().chunks.len(),
        }
    }

    /// Number of code units materialized so far.
    pub fn materialized_len(&self) -> usize {
        match &self.storage {
            Storage::Contiguous(units) => units.len(),
            Storage::Segmented(cell) => cell.borrow().materialized,
        }
    }

    /// Code unit at a contiguous offset.
    pub(crate) fn contiguous_unit(&self, offset: usize) -> Option<C> {
        self.contiguous_units()?.get(offset).copied()
    }

    /// Code unit at `(chunk, offset)`, pulling chunks from the source until
    /// `chunk` exists or the source is exhausted.
    pub(crate) fn segment_unit(&self, chunk: usize, offset: usize) -> Option<C> {
        let Storage::Segmented(cell) = &self.storage else {
            return None;
        };
        loop {
            {
                let segments = cell.borrow();
                if let Some(data) = segments.chunks.get(chunk) {
                    return data.get(offset).copied();
                }
                if segments.exhausted || chunk > segments.chunks.len() {
                    return None;
                }
            }
            if !cell.borrow_mut().materialize_next() {
                return None;
            }
        }
    }

    /// Length of an already materialized chunk.
    pub(crate) fn chunk_len(&self, chunk: usize) -> Option<usize> {
        match &self.storage {
            Storage::Contiguous(units) => (chunk == 0).then_some(units.len()),
            Storage::Segmented(cell) => cell.borrow().chunks.get(chunk).map(|data| data.len()),
        }
    }
}

impl<'s> From<&'s str> for ScanBuffer<'s, u8> {
    fn from(input: &'s str) -> Self {
        Self::new(input.as_bytes())
    }
}

impl<'s, C: CodeUnit> From<&'s [C]> for ScanBuffer<'s, C> {
    fn from(units: &'s [C]) -> Self {
        Self::new(units)
    }
}

impl<C: CodeUnit> core::fmt::Debug for ScanBuffer<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.storage {
            Storage::Contiguous(units) => f
                .debug_struct("ScanBuffer")
                .field("contiguous", &true)
                .field("len", &units.len())
                .finish(),
            Storage::Segmented(cell) => {
                let segments = cell.borrow();
                f.debug_struct("ScanBuffer")
                    .field("contiguous", &false)
                    .field("chunks", &segments.chunks.len())
                    .field("materialized", &segments.materialized)
                    .field("exhausted", &segments.exhausted)
                    .finish()
            }
        }
    }
}
