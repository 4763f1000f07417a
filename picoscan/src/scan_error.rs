// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Kind of failure reported by a reader or by the scan loop.
///
/// The set is closed: every failure that can be produced by untrusted input
/// maps onto exactly one of these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ScanErrorCode {
    /// The input ran out before a complete value could be read.
    #[error("end of input")]
    EndOfInput,
    /// The input does not form a valid literal for the requested type.
    #[error("invalid scanned value")]
    InvalidScannedValue,
    /// The literal is well formed but does not fit in the target type.
    #[error("value out of range")]
    ValueOutOfRange,
    /// A format spec modifier is incompatible with the bound argument, or the
    /// format string itself is malformed.
    #[error("invalid format string")]
    InvalidFormatString,
    /// A malformed or unrepresentable code unit sequence.
    #[error("invalid encoding")]
    InvalidEncoding,
}

/// Error returned by every reader operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{code}: {msg}")]
pub struct ScanError {
    code: ScanErrorCode,
    msg: &'static str,
}

impl ScanError {
    pub const fn new(code: ScanErrorCode, msg: &'static str) -> Self {
        Self { code, msg }
    }

    pub const fn end_of_input() -> Self {
        Self::new(ScanErrorCode::EndOfInput, "end of input")
    }

    pub const fn invalid_scanned_value(msg: &'static str) -> Self {
        Self::new(ScanErrorCode::InvalidScannedValue, msg)
    }

    pub const fn value_out_of_range(msg: &'static str) -> Self {
        Self::new(ScanErrorCode::ValueOutOfRange, msg)
    }

    pub const fn invalid_format_string(msg: &'static str) -> Self {
        Self::new(ScanErrorCode::InvalidFormatString, msg)
    }

    pub const fn invalid_encoding(msg: &'static str) -> Self {
        Self::new(ScanErrorCode::InvalidEncoding, msg)
    }

    /// The error kind.
    pub fn code(&self) -> ScanErrorCode {
        self.code
    }

    /// Human readable description of what went wrong.
    pub fn msg(&self) -> &'static str {
        self.msg
    }
}

impl From<ScanErrorCode> for ScanError {
    fn from(code: ScanErrorCode) -> Self {
        let msg = match code {
            ScanErrorCode::EndOfInput => "end of input",
            ScanErrorCode::InvalidScannedValue => "invalid scanned value",
            ScanErrorCode::ValueOutOfRange => "value out of range",
            ScanErrorCode::InvalidFormatString => "invalid format string",
            ScanErrorCode::InvalidEncoding => "invalid encoding",
        };
        Self::new(code, msg)
    }
}

/// Result type used throughout the reader layer.
pub type ScanExpected<T> = Result<T, ScanError>;
