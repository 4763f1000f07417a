// SPDX-License-Identifier: Apache-2.0

use crate::chunk_reader::Reader;

/// A [`Reader`] over any [`std::io::Read`], feeding UTF-8 input to a
/// segmented [`ScanBuffer`](crate::ScanBuffer).
///
/// Interrupted reads are retried. Any other I/O error ends the input.
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
}

impl<R: std::io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: std::io::Read> Reader<u8> for IoReader<R> {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}
