// SPDX-License-Identifier: Apache-2.0

use crate::args::{ScanArg, ScanArgs};
use crate::cursor::{Cursor, End};
use crate::encoding::CodeUnit;
use crate::locale::LocaleRef;
use crate::options::ScanOptions;
use crate::scan_buffer::ScanBuffer;

/// State of one scan call: the buffer, the current position, the argument
/// store and the locale.
///
/// The scan loop moves the current position forward after every field and
/// literal. It never moves backwards.
pub struct ScanContext<'b, 's, 'v, C: CodeUnit> {
    buffer: &'b ScanBuffer<'s, C>,
    current: Cursor<'b, 's, C>,
    args: ScanArgs<'v, C>,
    locale: LocaleRef<'b>,
    options: ScanOptions,
}

impl<'b, 's, 'v, C: CodeUnit> ScanContext<'b, 's, 'v, C> {
    /// Context positioned at the start of `buffer`.
    pub fn new(
        buffer: &'b ScanBuffer<'s, C>,
        args: ScanArgs<'v, C>,
        locale: LocaleRef<'b>,
    ) -> Self {
        Self::from_cursor(buffer.get_forward_range(), args, locale)
    }

    /// Context resuming at `cursor`.
    pub fn from_cursor(
        cursor: Cursor<'b, 's, C>,
        args: ScanArgs<'v, C>,
        locale: LocaleRef<'b>,
    ) -> Self {
        Self {
            buffer: cursor.buffer(),
            current: cursor,
            args,
            locale,
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// The current position.
    pub fn begin(&self) -> Cursor<'b, 's, C> {
        self.current.clone()
    }

    pub fn end(&self) -> End {
        End
    }

    /// The remaining input as a `(begin, end)` pair.
    pub fn range(&self) -> (Cursor<'b, 's, C>, End) {
        (self.begin(), End)
    }

    /// Move the current position to `cursor`.
    ///
    /// Advancing to the current position is a no-op.
    pub fn advance_to(&mut self, cursor: Cursor<'b, 's, C>) {
        debug_assert!(
            core::ptr::eq(cursor.buffer(), self.buffer),
            "cursor belongs to a different buffer"
        );
        debug_assert!(
            cursor.position() >= self.current.position(),
            "scan context cannot move backwards"
        );
        self.current = cursor;
    }

    /// Move the current position so that `rest` is what remains.
    ///
    /// `rest` must be a suffix of the current contiguous segment.
    pub fn advance_to_contiguous(&mut self, rest: &[C]) {
        let Some(current) = self.current.contiguous_segment() else {
            debug_assert!(false, "advance_to_contiguous on segmented storage");
            return;
        };
        let Some(consumed) = current.len().checked_sub(rest.len()) else {
            debug_assert!(false, "advance_to_contiguous would move backwards");
            return;
        };
        self.current.fast_forward(consumed);
    }

    /// The `id`-th argument.
    ///
    /// The scan loop validates ids before asking, so an out-of-range id is a
    /// programming error.
    pub fn arg(&mut self, id: usize) -> Option<&mut ScanArg<'v, C>> {
        debug_assert!(id < self.args.len(), "argument id {id} out of range");
        self.args.get_mut(id)
    }

    pub fn args(&self) -> &ScanArgs<'v, C> {
        &self.args
    }

    pub fn locale(&self) -> LocaleRef<'b> {
        self.locale
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// The buffer being scanned.
    pub fn internal_buffer(&self) -> &'b ScanBuffer<'s, C> {
        self.buffer
    }
}
