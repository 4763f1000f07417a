// SPDX-License-Identifier: Apache-2.0

use crate::scan_buffer::DEFAULT_CHUNK_CAPACITY;

/// Strategy used by the integer reader to turn a digit run into a value.
///
/// All strategies accept the same inputs and produce the same values and
/// errors; they differ only in how the digits are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntMethod {
    /// Collect the digit run and hand it to `from_str_radix`.
    FromStrRadix,
    /// Accumulate digit by digit with checked arithmetic.
    Custom,
    /// Convert straight out of the contiguous input slice. Falls back to
    /// [`IntMethod::Custom`] on segmented buffers.
    #[default]
    FromChars,
}

/// Runtime knobs for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    int_method: IntMethod,
    chunk_capacity: usize,
}

impl ScanOptions {
    pub const fn new() -> Self {
        Self {
            int_method: IntMethod::FromChars,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
        }
    }

    pub fn with_int_method(mut self, int_method: IntMethod) -> Self {
        self.int_method = int_method;
        self
    }

    /// Units requested per chunk by buffers built with
    /// [`ScanBuffer::from_reader_with_options`](crate::ScanBuffer::from_reader_with_options).
    pub fn with_chunk_capacity(mut self, chunk_capacity: usize) -> Self {
        self.chunk_capacity = chunk_capacity.max(1);
        self
    }

    pub fn int_method(&self) -> IntMethod {
        self.int_method
    }

    pub fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}
