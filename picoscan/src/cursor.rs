// SPDX-License-Identifier: Apache-2.0

use crate::encoding::CodeUnit;
use crate::scan_buffer::ScanBuffer;

/// Where a cursor points inside its buffer.
///
/// Segmented positions are canonical: the position after the last unit of
/// chunk `k` is `(k + 1, 0)`, whether or not chunk `k + 1` has been pulled
/// yet. Two cursors at the same logical offset therefore always carry the
/// same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Offset into a contiguous buffer.
    Contiguous(usize),
    /// Chunk index, offset within that chunk, and logical offset from the start.
    Segmented {
        chunk: usize,
        offset: usize,
        logical: usize,
    },
}

impl Position {
    /// Offset from the start of the input, in code units.
    pub fn logical(&self) -> usize {
        match *self {
            Position::Contiguous(offset) => offset,
            Position::Segmented { logical, .. } => logical,
        }
    }
}

/// The unbounded end of a scan range.
///
/// A cursor compares equal to `End` only once no more code units can be
/// obtained, which for segmented buffers means the source has signalled
/// exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct End;

/// A forward-only position in a [`ScanBuffer`].
///
/// A cursor together with the [`End`] sentinel forms the range a reader
/// consumes from. Readers take a cursor by value and hand back the cursor
/// positioned after what they consumed.
#[derive(Clone)]
pub struct Cursor<'b, 's, C: CodeUnit> {
    buffer: &'b ScanBuffer<'s, C>,
    pos: Position,
}

impl<'b, 's, C: CodeUnit> Cursor<'b, 's, C> {
    pub(crate) fn new(buffer: &'b ScanBuffer<'s, C>, pos: Position) -> Self {
        Self { buffer, pos }
    }

    /// The buffer this cursor points into.
    pub fn buffer(&self) -> &'b ScanBuffer<'s, C> {
        self.buffer
    }

    /// Logical offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos.logical()
    }

    pub fn raw_position(&self) -> Position {
        self.pos
    }

    /// The code unit under the cursor, materializing a chunk if needed.
    pub fn peek(&self) -> Option<C> {
        match self.pos {
            Position::Contiguous(offset) => self.buffer.contiguous_unit(offset),
            Position::Segmented { chunk, offset, .. } => self.buffer.segment_unit(chunk, offset),
        }
    }

    /// Whether no more code units can be obtained.
    pub fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    /// Whether this cursor is provably in contiguous storage, so bulk
    /// fast-forwarding is allowed.
    pub fn is_contiguous(&self) -> bool {
        matches!(self.pos, Position::Contiguous(_))
    }

    /// The rest of the input as one slice, if the storage is contiguous.
    pub fn contiguous_segment(&self) -> Option<&'b [C]> {
        match self.pos {
            Position::Contiguous(offset) => self.buffer.contiguous_units()?.get(offset..),
            Position::Segmented { .. } => None,
        }
    }

    /// Advance by `n` units without checking each one.
    ///
    /// Only meaningful for contiguous cursors, where `n` must not exceed the
    /// length of [`contiguous_segment`](Self::contiguous_segment). Segmented
    /// cursors fall back to checked advancement.
    pub fn fast_forward(&mut self, n: usize) {
        if let Position::Contiguous(offset) = self.pos {
            let len = self.buffer.contiguous_units().map_or(0, <[C]>::len);
            debug_assert!(offset.saturating_add(n) <= len, "fast_forward past the end");
            self.pos = Position::Contiguous(offset.saturating_add(n).min(len));
        } else {
            self.advance_by(n);
        }
    }

    /// Advance by up to `n` units, returning how many were skipped.
    pub fn advance_by(&mut self, n: usize) -> usize {
        let mut advanced = 0;
        while advanced < n && self.next().is_some() {
            advanced += 1;
        }
        advanced
    }

    /// Number of units between `earlier` and this cursor.
    pub fn distance_from(&self, earlier: &Self) -> usize {
        self.position().saturating_sub(earlier.position())
    }

    /// Move past the unit under the cursor. The caller has already seen
    /// that unit through `peek`.
    fn step(&mut self) {
        self.pos = match self.pos {
            Position::Contiguous(offset) => Position::Contiguous(offset.saturating_add(1)),
            Position::Segmented {
                chunk,
                offset,
                logical,
            } => {
                let len = self.buffer.chunk_len(chunk).unwrap_or(0);
                let (chunk, offset) = if offset.saturating_add(1) >= len {
                    (chunk.saturating_add(1), 0)
                } else {
                    (chunk, offset + 1)
                };
                Position::Segmented {
                    chunk,
                    offset,
                    logical: logical.saturating_add(1),
                }
            }
        };
    }
}

impl<C: CodeUnit> Iterator for Cursor<'_, '_, C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        let unit = self.peek()?;
        self.step();
        Some(unit)
    }
}

impl<C: CodeUnit> PartialEq for Cursor<'_, '_, C> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.buffer, other.buffer) && self.pos == other.pos
    }
}

impl<C: CodeUnit> Eq for Cursor<'_, '_, C> {}

impl<C: CodeUnit> PartialEq<End> for Cursor<'_, '_, C> {
    fn eq(&self, _: &End) -> bool {
        self.is_at_end()
    }
}

impl<C: CodeUnit> PartialEq<Cursor<'_, '_, C>> for End {
    fn eq(&self, other: &Cursor<'_, '_, C>) -> bool {
        other.is_at_end()
    }
}

impl<C: CodeUnit> core::fmt::Debug for Cursor<'_, '_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).finish()
    }
}
