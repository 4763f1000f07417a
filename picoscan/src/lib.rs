// SPDX-License-Identifier: Apache-2.0

//! Typed, format-string driven scanning.
//!
//! `picoscan` reads values out of text the way `format!` writes them in.
//! A format string such as `"{} x {}"` is matched against the input, and
//! every `{}` replacement field is read into the corresponding caller-owned
//! argument:
//!
//! ```rust
//! use picoscan::{scan, scan_args};
//!
//! let (mut width, mut height) = (0u32, 0u32);
//! let result = scan("640 x 480", "{} x {}", scan_args![&mut width, &mut height]);
//! assert!(result.is_ok());
//! assert_eq!((width, height), (640, 480));
//! ```
//!
//! Input lives in a [`ScanBuffer`], either one contiguous slice of code
//! units or a segmented buffer that pulls chunks from a [`Reader`] on
//! demand. UTF-8, UTF-16 and UTF-32 input are supported through the
//! [`CodeUnit`] types `u8`, `u16` and `u32`.
//!
//! Replacement fields accept a spec: `{:x}` reads hexadecimal, `{b2}`
//! binary, `{:8s}` at most eight code points, `{:Lf}` a fixed-point number
//! using the locale's decimal point. See [`FormatParser`] for the grammar.
//!
//! The crate is `no_std` with `alloc`. Enable the `std` feature for
//! [`IoReader`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod args;
mod bool_reader;
mod char_reader;
mod char_types;
mod chunk_reader;
mod context;
mod cursor;
mod encoding;
#[cfg(feature = "float")]
mod float_reader;
mod format_specs;
mod format_string;
mod int_parser;
mod int_reader;
#[cfg(feature = "std")]
mod io_reader;
mod locale;
mod options;
mod scan_buffer;
mod scan_error;
mod string_reader;
mod value_reader;
mod vscan;

pub use args::{ArgType, ArgTypes, ScanArg, ScanArgs, Scannable};
pub use bool_reader::BoolReader;
pub use char_reader::{read_code_point, read_code_unit, CharReader};
pub use char_types::{NarrowChar, WideChar};
pub use chunk_reader::{ChunkReader, Reader};
pub use context::ScanContext;
pub use cursor::{Cursor, End, Position};
pub use encoding::{encode_code_point_as_narrow, encode_code_point_as_wide, CodeUnit, Encoding};
#[cfg(feature = "float")]
pub use float_reader::{read_float, FloatReader, ScanFloat};
pub use format_specs::{FormatSpecs, PresentationType};
pub use format_string::{FormatItem, FormatParser};
pub use int_parser::ScanInt;
pub use int_reader::{read_int, IntReader};
#[cfg(feature = "std")]
pub use io_reader::IoReader;
pub use locale::{Locale, LocaleRef};
pub use options::{IntMethod, ScanOptions};
pub use scan_buffer::{ScanBuffer, DEFAULT_CHUNK_CAPACITY};
pub use scan_error::{ScanError, ScanErrorCode, ScanExpected};
pub use string_reader::StringReader;
pub use value_reader::{
    read_literal, read_value, read_value_with, skip_whitespace, ArgVisitor, ScanBuiltin,
    ScanCustom, ValueReader,
};
pub use vscan::{scan, vscan, vscan_at, vscan_with, ScanResult};

#[doc(hidden)]
pub mod __private {
    pub use alloc::vec;
}

/// Build a [`ScanArgs`] from `&mut` references to the output values.
///
/// ```rust
/// use picoscan::{scan, scan_args};
///
/// let mut name = String::new();
/// let mut age = 0u8;
/// let result = scan("ada 36", "{} {}", scan_args![&mut name, &mut age]);
/// assert!(result.is_ok());
/// assert_eq!(name, "ada");
/// assert_eq!(age, 36);
/// ```
#[macro_export]
macro_rules! scan_args {
    () => {
        $crate::ScanArgs::new()
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::ScanArgs::from($crate::__private::vec![
            $($crate::Scannable::as_scan_arg($arg)),+
        ])
    };
}
