// SPDX-License-Identifier: Apache-2.0

use crate::cursor::Cursor;
use crate::encoding::CodeUnit;
use crate::format_specs::{FormatSpecs, PresentationType};
use crate::locale::LocaleRef;
use crate::options::ScanOptions;
use crate::scan_error::{ScanError, ScanExpected};
use crate::value_reader::{match_literal, ScanBuiltin, ValueReader};

/// Reader for `bool`.
///
/// Accepts `true`/`false` and `1`/`0`. `{s}` restricts it to the names,
/// `{d}` and `{i}` to the digits, and `L` swaps in the locale's names.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolReader;

fn check_bool_specs(specs: &FormatSpecs) -> ScanExpected<()> {
    if specs.width.is_some() {
        return Err(ScanError::invalid_format_string(
            "width is not supported for booleans",
        ));
    }
    match specs.ty {
        PresentationType::None
        | PresentationType::String
        | PresentationType::IntDecimal
        | PresentationType::IntGeneric => Ok(()),
        _ => Err(ScanError::invalid_format_string(
            "invalid presentation type for a boolean",
        )),
    }
}

fn read_bool<'b, 's, C: CodeUnit>(
    mut range: Cursor<'b, 's, C>,
    specs: &FormatSpecs,
    loc: LocaleRef<'_>,
) -> ScanExpected<(Cursor<'b, 's, C>, bool)> {
    if range.is_at_end() {
        return Err(ScanError::end_of_input());
    }

    let numeric = specs.ty != PresentationType::String;
    let textual = !matches!(
        specs.ty,
        PresentationType::IntDecimal | PresentationType::IntGeneric
    );

    if numeric {
        match range.peek().and_then(CodeUnit::as_ascii) {
            Some(b'1') => {
                range.next();
                return Ok((range, true));
            }
            Some(b'0') => {
                range.next();
                return Ok((range, false));
            }
            _ => {}
        }
    }

    if textual {
        let locale = loc.get();
        let (truename, falsename) = if specs.localized {
            (locale.truename(), locale.falsename())
        } else {
            ("true", "false")
        };
        if let Some(rest) = match_literal(&range, truename) {
            return Ok((rest, true));
        }
        if let Some(rest) = match_literal(&range, falsename) {
            return Ok((rest, false));
        }
    }

    Err(ScanError::invalid_scanned_value("expected a boolean"))
}

impl<C: CodeUnit> ValueReader<C, bool> for BoolReader {
    fn check_specs(&self, specs: &FormatSpecs) -> ScanExpected<()> {
        check_bool_specs(specs)
    }

    fn read_default<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        value: &mut bool,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        let (rest, parsed) = read_bool(range, &FormatSpecs::default(), loc)?;
        *value = parsed;
        Ok(rest)
    }

    fn read_specs<'b, 's>(
        &mut self,
        range: Cursor<'b, 's, C>,
        specs: &FormatSpecs,
        value: &mut bool,
        loc: LocaleRef<'_>,
    ) -> ScanExpected<Cursor<'b, 's, C>> {
        let (rest, parsed) = read_bool(range, specs, loc)?;
        *value = parsed;
        Ok(rest)
    }
}

impl<C: CodeUnit> ScanBuiltin<C> for bool {
    type Reader = BoolReader;

    fn make_reader(_options: &ScanOptions) -> BoolReader {
        BoolReader
    }
}
