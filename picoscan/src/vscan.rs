// SPDX-License-Identifier: Apache-2.0

//! The scan loop.
//!
//! Walks the format string, matching literals and whitespace against the
//! input and dispatching every replacement field to the reader of its
//! argument. Scanning stops at the first failure; arguments read before it
//! keep their new values.

use alloc::vec;

use crate::args::ScanArgs;
use crate::context::ScanContext;
use crate::cursor::Cursor;
use crate::encoding::CodeUnit;
use crate::format_string::{FormatItem, FormatParser};
use crate::locale::LocaleRef;
use crate::options::ScanOptions;
use crate::scan_buffer::ScanBuffer;
use crate::scan_error::{ScanError, ScanExpected};
use crate::value_reader::{read_literal, skip_whitespace, ReadArg};

/// Outcome of a scan call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    position: usize,
    fields_scanned: usize,
    error: Option<ScanError>,
}

impl ScanResult {
    /// Whether the whole format string was matched.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The first failure, if any.
    pub fn error(&self) -> Option<ScanError> {
        self.error
    }

    /// Logical offset, in code units, where scanning stopped.
    ///
    /// On failure this is the start of the item that failed. Pass it to
    /// [`ScanBuffer::cursor_at`] to resume.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of replacement fields successfully read.
    pub fn fields_scanned(&self) -> usize {
        self.fields_scanned
    }

    /// The final position, or the error.
    pub fn into_result(self) -> ScanExpected<usize> {
        match self.error {
            None => Ok(self.position),
            Some(err) => Err(err),
        }
    }
}

/// Scan `buffer` from its start according to `format`.
pub fn vscan<'s, C: CodeUnit>(
    buffer: &ScanBuffer<'s, C>,
    format: &str,
    args: ScanArgs<'_, C>,
) -> ScanResult {
    vscan_at(
        buffer.get_forward_range(),
        format,
        args,
        &ScanOptions::default(),
        LocaleRef::classic(),
    )
}

/// [`vscan`] with explicit options and locale.
pub fn vscan_with<'b, 's, C: CodeUnit>(
    buffer: &'b ScanBuffer<'s, C>,
    format: &str,
    args: ScanArgs<'_, C>,
    options: &ScanOptions,
    locale: LocaleRef<'b>,
) -> ScanResult {
    vscan_at(buffer.get_forward_range(), format, args, options, locale)
}

/// Scan a string slice.
pub fn scan(input: &str, format: &str, args: ScanArgs<'_, u8>) -> ScanResult {
    let buffer = ScanBuffer::from(input);
    vscan(&buffer, format, args)
}

/// Scan starting at `cursor`, for instance to resume after an earlier call.
pub fn vscan_at<'b, 's, C: CodeUnit>(
    cursor: Cursor<'b, 's, C>,
    format: &str,
    args: ScanArgs<'_, C>,
    options: &ScanOptions,
    locale: LocaleRef<'b>,
) -> ScanResult {
    let mut ctx = ScanContext::from_cursor(cursor, args, locale).with_options(*options);
    let mut used = vec![false; ctx.args().len()];
    let mut fields_scanned = 0;

    for item in FormatParser::new(format) {
        let step = item.and_then(|item| scan_item(&mut ctx, &mut used, item));
        match step {
            Ok(fields) => fields_scanned += fields,
            Err(error) => {
                log::debug!(
                    "scan stopped at {} after {} fields: {}",
                    ctx.begin().position(),
                    fields_scanned,
                    error
                );
                return ScanResult {
                    position: ctx.begin().position(),
                    fields_scanned,
                    error: Some(error),
                };
            }
        }
    }

    ScanResult {
        position: ctx.begin().position(),
        fields_scanned,
        error: None,
    }
}

/// Scan one format item, returning the number of fields it read.
fn scan_item<C: CodeUnit>(
    ctx: &mut ScanContext<'_, '_, '_, C>,
    used: &mut [bool],
    item: FormatItem,
) -> ScanExpected<usize> {
    match item {
        FormatItem::Whitespace => {
            let rest = skip_whitespace(ctx.begin());
            ctx.advance_to(rest);
            Ok(0)
        }
        FormatItem::Literal(ch) => {
            let mut buf = [0u8; 4];
            let rest = read_literal(ctx.begin(), ch.encode_utf8(&mut buf))?;
            ctx.advance_to(rest);
            Ok(0)
        }
        FormatItem::Field { arg_id, specs } => {
            let Some(slot) = used.get_mut(arg_id) else {
                return Err(ScanError::invalid_format_string(
                    "argument index out of range",
                ));
            };
            if core::mem::replace(slot, true) {
                return Err(ScanError::invalid_format_string(
                    "argument referenced more than once",
                ));
            }

            let options = *ctx.options();
            let visitor = ReadArg {
                range: ctx.begin(),
                specs: &specs,
                options: &options,
                locale: ctx.locale(),
            };
            let Some(arg) = ctx.arg(arg_id) else {
                return Err(ScanError::invalid_format_string(
                    "argument index out of range",
                ));
            };
            log::trace!("field {arg_id}: {:?} with {specs:?}", arg.arg_type());
            let rest = arg.visit(visitor)?;
            ctx.advance_to(rest);
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_args;
    use crate::scan_error::ScanErrorCode;

    #[test]
    fn test_scan_two_ints() {
        let (mut a, mut b) = (0i32, 0u64);
        let result = scan("12 34", "{} {}", scan_args![&mut a, &mut b]);
        assert!(result.is_ok());
        assert_eq!((a, b), (12, 34));
        assert_eq!(result.fields_scanned(), 2);
        assert_eq!(result.position(), 5);
    }

    #[test]
    fn test_literal_matching() {
        let (mut w, mut h) = (0u32, 0u32);
        let result = scan("640x480", "{}x{}", scan_args![&mut w, &mut h]);
        assert_eq!(result.into_result(), Ok(7));
        assert_eq!((w, h), (640, 480));

        let result = scan("640*480", "{}x{}", scan_args![&mut w, &mut h]);
        assert_eq!(
            result.error().map(|e| e.code()),
            Some(ScanErrorCode::InvalidScannedValue)
        );
        assert_eq!(result.position(), 3);
    }

    #[test]
    fn test_partial_success_keeps_earlier_fields() {
        let (mut a, mut b) = (0i32, 99u32);
        let result = scan("7 -1", "{} {}", scan_args![&mut a, &mut b]);
        assert_eq!(result.fields_scanned(), 1);
        assert_eq!(
            result.error().map(|e| e.code()),
            Some(ScanErrorCode::ValueOutOfRange)
        );
        assert_eq!(a, 7);
        assert_eq!(b, 99);
    }

    #[test]
    fn test_fields_skip_leading_whitespace() {
        let mut word = alloc::string::String::new();
        let mut n = 0i8;
        let result = scan("   hello\n\t 5", "{}{}", scan_args![&mut word, &mut n]);
        assert!(result.is_ok());
        assert_eq!(word, "hello");
        assert_eq!(n, 5);
    }

    #[test]
    fn test_argument_errors() {
        let mut a = 0i32;
        let result = scan("1 2", "{} {}", scan_args![&mut a]);
        assert_eq!(
            result.error().map(|e| e.code()),
            Some(ScanErrorCode::InvalidFormatString)
        );
        assert_eq!(result.fields_scanned(), 1);

        let result = scan("1 2", "{0} {0}", scan_args![&mut a]);
        assert_eq!(
            result.error().map(|e| e.code()),
            Some(ScanErrorCode::InvalidFormatString)
        );
    }

    #[test]
    fn test_end_of_input_on_literal() {
        let mut a = 0i32;
        let result = scan("5", "{},", scan_args![&mut a]);
        assert_eq!(
            result.error().map(|e| e.code()),
            Some(ScanErrorCode::EndOfInput)
        );
        assert_eq!(a, 5);
    }

    #[test]
    fn test_resume_from_position() {
        let buffer = ScanBuffer::from("1 2 3");
        let mut first = 0u8;
        let result = vscan(&buffer, "{}", scan_args![&mut first]);
        let cursor = buffer.cursor_at(result.position()).unwrap();
        let (mut second, mut third) = (0u8, 0u8);
        let result = vscan_at(
            cursor,
            "{}{}",
            scan_args![&mut second, &mut third],
            &ScanOptions::default(),
            LocaleRef::classic(),
        );
        assert!(result.is_ok());
        assert_eq!((first, second, third), (1, 2, 3));
    }
}
