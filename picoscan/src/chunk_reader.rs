// SPDX-License-Identifier: Apache-2.0

//! Pull sources feeding segmented scan buffers.
//!
//! A segmented [`ScanBuffer`](crate::ScanBuffer) materializes its input one
//! chunk at a time by calling [`Reader::read`]. This module provides the
//! trait and [`ChunkReader`], a reader over an in-memory slice that can hand
//! out its data in fixed-size chunks to simulate streaming.
//!
//! For real I/O you implement [`Reader`] for your own source (a socket, a
//! UART, a ring buffer), or use [`IoReader`](crate::IoReader) with the `std`
//! feature.
//!
//! # Examples
//!
//! ```rust
//! use picoscan::{scan_args, vscan, ChunkReader, ScanBuffer};
//!
//! // Hand the scanner two bytes at a time
//! let buffer = ScanBuffer::from_reader(ChunkReader::new(b"123 456", 2));
//! let (mut a, mut b) = (0i32, 0i32);
//! let result = vscan(&buffer, "{} {}", scan_args![&mut a, &mut b]);
//! assert!(result.is_ok());
//! assert_eq!((a, b), (123, 456));
//! ```

use crate::encoding::CodeUnit;

/// A pull source of code units.
///
/// The scan buffer calls [`read`](Reader::read) whenever a cursor walks past
/// the data materialized so far. Returning `Ok(0)` ends the input for good;
/// an `Err` is logged and handled the same way.
pub trait Reader<C: CodeUnit = u8> {
    type Error: core::fmt::Debug;

    /// Fill a prefix of `buf` and return its length.
    fn read(&mut self, buf: &mut [C]) -> Result<usize, Self::Error>;
}

impl<C: CodeUnit, R: Reader<C> + ?Sized> Reader<C> for &mut R {
    type Error = R::Error;

    fn read(&mut self, buf: &mut [C]) -> Result<usize, Self::Error> {
        R::read(self, buf)
    }
}

/// Serves an in-memory slice through the [`Reader`] interface.
///
/// [`ChunkReader::new`] caps every read at `chunk_size` units so values end
/// up split across segments. [`ChunkReader::full_slice`] only stops at the
/// size of the destination.
#[derive(Debug)]
pub struct ChunkReader<'a, C: CodeUnit = u8> {
    rest: &'a [C],
    chunk_size: usize,
}

impl<'a, C: CodeUnit> ChunkReader<'a, C> {
    /// Hand out `data` at most `chunk_size` units per read. A zero
    /// `chunk_size` is raised to 1.
    pub fn new(data: &'a [C], chunk_size: usize) -> Self {
        Self {
            rest: data,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn full_slice(data: &'a [C]) -> Self {
        Self::new(data, usize::MAX)
    }

    /// Units not handed out yet.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }
}

impl<C: CodeUnit> Reader<C> for ChunkReader<'_, C> {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [C]) -> Result<usize, Self::Error> {
        let n = self.rest.len().min(buf.len()).min(self.chunk_size);
        let (head, tail) = self.rest.split_at(n);
        if let Some(dest) = buf.get_mut(..n) {
            dest.copy_from_slice(head);
        }
        self.rest = tail;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_slice_limited_by_destination() {
        let mut reader = ChunkReader::full_slice(b"hello world");

        let mut buf = [0u8; 5];
        assert_eq!(reader.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");

        let mut buf = [0u8; 10];
        assert_eq!(reader.read(&mut buf).unwrap(), 6);
        assert_eq!(&buf[..6], b" world");

        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_empty_source() {
        let mut reader = ChunkReader::<u8>::full_slice(b"");
        let mut buf = [0u8; 10];
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_chunks_of_three() {
        let mut reader = ChunkReader::new(b"hello world", 3);

        let mut buf = [0u8; 10];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"hel");
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"lo ");
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"wor");

        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ld");

        assert_eq!(reader.read(&mut buf).unwrap(), 0);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_destination_smaller_than_chunk() {
        let mut reader = ChunkReader::new(b"hello", 10);
        let mut buf = [0u8; 3];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"hel");
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"lo");
    }

    #[test]
    fn test_zero_chunk_size_reads_one_unit() {
        let mut reader = ChunkReader::new(b"hello", 0);

        let mut buf = [0u8; 10];
        assert_eq!(reader.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], b'h');
    }

    #[test]
    fn test_chunk_reader_wide_units() {
        let data: Vec<u16> = "wide".encode_utf16().collect();
        let mut reader = ChunkReader::new(&data, 3);

        let mut buf = [0u16; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], &data[..3]);
        assert_eq!(reader.read(&mut buf).unwrap(), 1);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }
}
