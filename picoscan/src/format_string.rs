// SPDX-License-Identifier: Apache-2.0

//! Format string parsing.
//!
//! A format string is a sequence of literal characters, whitespace runs and
//! replacement fields:
//!
//! ```text
//! field := '{' [index] [':' spec | spec] '}'
//! spec  := [width] ['L'] [type]
//! type  := 'b' [base] | 'B' | 'o' | 'd' | 'i' | 'x' | 'X' | 'c' | 's'
//!        | 'f' | 'F' | 'e' | 'E' | 'g' | 'G'
//! ```
//!
//! A spec without the colon must start with a letter, as in `{x}` or
//! `{b2}`. `{{` and `}}` stand for literal braces.

use core::iter::Peekable;
use core::str::Chars;

use crate::format_specs::{FormatSpecs, PresentationType};
use crate::scan_error::{ScanError, ScanExpected};

/// One element of a parsed format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatItem {
    /// A character that must appear verbatim in the input.
    Literal(char),
    /// A run of whitespace, matching zero or more input whitespace.
    Whitespace,
    /// A replacement field bound to argument `arg_id`.
    Field { arg_id: usize, specs: FormatSpecs },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indexing {
    Automatic,
    Manual,
}

/// Iterator over the items of a format string.
///
/// Yields `Err` once for the first malformed construct and then stops.
#[derive(Debug, Clone)]
pub struct FormatParser<'f> {
    chars: Peekable<Chars<'f>>,
    next_auto_id: usize,
    indexing: Option<Indexing>,
    failed: bool,
}

impl<'f> FormatParser<'f> {
    pub fn new(format: &'f str) -> Self {
        Self {
            chars: format.chars().peekable(),
            next_auto_id: 0,
            indexing: None,
            failed: false,
        }
    }

    fn parse_number(&mut self) -> ScanExpected<Option<usize>> {
        let mut value: Option<usize> = None;
        while let Some(digit) = self.chars.peek().and_then(|c| c.to_digit(10)) {
            self.chars.next();
            let digit = usize::try_from(digit).unwrap_or(0);
            value = Some(
                value
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or(ScanError::invalid_format_string("number too large"))?,
            );
        }
        Ok(value)
    }

    fn resolve_id(&mut self, explicit: Option<usize>) -> ScanExpected<usize> {
        let mode = if explicit.is_some() {
            Indexing::Manual
        } else {
            Indexing::Automatic
        };
        match self.indexing {
            Some(current) if current != mode => {
                return Err(ScanError::invalid_format_string(
                    "cannot mix automatic and manual argument indexing",
                ))
            }
            _ => self.indexing = Some(mode),
        }
        match explicit {
            Some(id) => Ok(id),
            None => {
                let id = self.next_auto_id;
                self.next_auto_id = id.saturating_add(1);
                Ok(id)
            }
        }
    }

    fn parse_type(&mut self, specs: &mut FormatSpecs) -> ScanExpected<()> {
        let Some(&ch) = self.chars.peek() else {
            return Ok(());
        };
        let ty = match ch {
            'b' => {
                self.chars.next();
                match self.parse_number()? {
                    None => {
                        *specs = FormatSpecs {
                            ty: PresentationType::IntBinary,
                            arbitrary_base: 2,
                            ..*specs
                        };
                        return Ok(());
                    }
                    Some(base) => {
                        let base = u8::try_from(base)
                            .ok()
                            .filter(|base| (2..=36).contains(base))
                            .ok_or(ScanError::invalid_format_string(
                                "integer base must be between 2 and 36",
                            ))?;
                        let based = FormatSpecs::with_base(base);
                        specs.ty = based.ty;
                        specs.arbitrary_base = based.arbitrary_base;
                        return Ok(());
                    }
                }
            }
            'B' => PresentationType::IntBinary,
            'o' => PresentationType::IntOctal,
            'd' => PresentationType::IntDecimal,
            'i' => PresentationType::IntGeneric,
            'x' | 'X' => PresentationType::IntHex,
            'c' => PresentationType::Character,
            's' => PresentationType::String,
            'f' | 'F' => PresentationType::FloatFixed,
            'e' | 'E' => PresentationType::FloatScientific,
            'g' | 'G' => PresentationType::FloatGeneral,
            '}' => return Ok(()),
            _ => {
                return Err(ScanError::invalid_format_string(
                    "unknown presentation type",
                ))
            }
        };
        self.chars.next();
        specs.ty = ty;
        if ty == PresentationType::IntBinary {
            specs.arbitrary_base = 2;
        }
        Ok(())
    }

    fn parse_specs(&mut self) -> ScanExpected<FormatSpecs> {
        let mut specs = FormatSpecs::default();
        if let Some(width) = self.parse_number()? {
            if width == 0 {
                return Err(ScanError::invalid_format_string("width must be positive"));
            }
            specs.width = Some(width);
        }
        if self.chars.peek() == Some(&'L') {
            self.chars.next();
            specs.localized = true;
        }
        self.parse_type(&mut specs)?;
        Ok(specs)
    }

    /// Parse a field after its opening brace.
    fn parse_field(&mut self) -> ScanExpected<FormatItem> {
        let explicit = self.parse_number()?;
        let specs = match self.chars.peek() {
            Some(':') => {
                self.chars.next();
                self.parse_specs()?
            }
            Some(c) if c.is_ascii_alphabetic() => self.parse_specs()?,
            _ => FormatSpecs::default(),
        };
        match self.chars.next() {
            Some('}') => {}
            Some(_) => {
                return Err(ScanError::invalid_format_string(
                    "expected '}' to close the replacement field",
                ))
            }
            None => {
                return Err(ScanError::invalid_format_string(
                    "unterminated replacement field",
                ))
            }
        }
        let arg_id = self.resolve_id(explicit)?;
        Ok(FormatItem::Field { arg_id, specs })
    }

    fn parse_item(&mut self, ch: char) -> ScanExpected<FormatItem> {
        match ch {
            '{' if self.chars.peek() == Some(&'{') => {
                self.chars.next();
                Ok(FormatItem::Literal('{'))
            }
            '{' => self.parse_field(),
            '}' if self.chars.peek() == Some(&'}') => {
                self.chars.next();
                Ok(FormatItem::Literal('}'))
            }
            '}' => Err(ScanError::invalid_format_string("unmatched '}'")),
            c if c.is_whitespace() => {
                while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
                    self.chars.next();
                }
                Ok(FormatItem::Whitespace)
            }
            c => Ok(FormatItem::Literal(c)),
        }
    }
}

impl Iterator for FormatParser<'_> {
    type Item = ScanExpected<FormatItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let ch = self.chars.next()?;
        let item = self.parse_item(ch);
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }
}
