// SPDX-License-Identifier: Apache-2.0

// Digit accumulation, mostly borrowed from core::num::parse::radix

use crate::encoding::CodeUnit;

/// Why a digit run could not be converted.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DigitsError {
    /// The run had no digits at all.
    Empty,
    /// The number overflowed or underflowed the target integer type.
    Overflow,
}

mod private {
    pub trait Sealed {}
}

/// Integer types the scanner can read into.
pub trait ScanInt: Copy + Default + core::fmt::Debug + private::Sealed {
    const SIGNED: bool;

    fn from_str_radix(src: &str, radix: u32) -> Result<Self, core::num::ParseIntError>;

    /// `self * radix ± digit`, or `None` on overflow.
    ///
    /// Negative values are built by subtraction so that `MIN` is reachable.
    fn push_digit(self, digit: u32, radix: u32, negative: bool) -> Option<Self>;
}

/// Implements [`ScanInt`] with a panic-free checked multiply-add.
macro_rules! impl_scan_int {
    ($($int_ty:ty => $signed:expr),* $(,)?) => {$(
        impl private::Sealed for $int_ty {}

        impl ScanInt for $int_ty {
            const SIGNED: bool = $signed;

            fn from_str_radix(src: &str, radix: u32) -> Result<Self, core::num::ParseIntError> {
                <$int_ty>::from_str_radix(src, radix)
            }

            fn push_digit(self, digit: u32, radix: u32, negative: bool) -> Option<Self> {
                let digit = <$int_ty>::try_from(digit).ok()?;
                let radix = <$int_ty>::try_from(radix).ok()?;
                let shifted = self.checked_mul(radix)?;
                if negative {
                    shifted.checked_sub(digit)
                } else {
                    shifted.checked_add(digit)
                }
            }
        }
    )*};
}

impl_scan_int! {
    i8 => true,
    i16 => true,
    i32 => true,
    i64 => true,
    i128 => true,
    isize => true,
    u8 => false,
    u16 => false,
    u32 => false,
    u64 => false,
    u128 => false,
    usize => false,
}

/// Value of `unit` as a digit in `radix`, which must be in `2..=36`.
pub fn digit_value<C: CodeUnit>(unit: C, radix: u32) -> Option<u32> {
    if !(2..=36).contains(&radix) {
        return None;
    }
    char::from(unit.as_ascii()?).to_digit(radix)
}

/// Convert the leading digit run of `src`.
///
/// Stops at the first unit that is not a digit in `radix` and returns the
/// value together with the number of units consumed.
pub fn parse_digit_slice<C: CodeUnit, T: ScanInt>(
    src: &[C],
    radix: u32,
    negative: bool,
) -> Result<(T, usize), DigitsError> {
    let mut digits = src;
    let mut result = T::default();
    let mut consumed = 0usize;

    // `while let` with `split_first` for safe, panic-free iteration.
    while let Some((&unit, rest)) = digits.split_first() {
        let Some(digit) = digit_value(unit, radix) else {
            break;
        };
        result = result
            .push_digit(digit, radix, negative)
            .ok_or(DigitsError::Overflow)?;
        consumed += 1;
        digits = rest;
    }

    if consumed == 0 {
        return Err(DigitsError::Empty);
    }
    Ok((result, consumed))
}
