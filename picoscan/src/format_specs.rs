// SPDX-License-Identifier: Apache-2.0

/// Presentation type of a replacement field, the last part of its spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationType {
    /// No type given: each reader applies its default behavior.
    #[default]
    None,
    /// `b`/`B`: binary, or an arbitrary base when digits follow (`b16`).
    IntBinary,
    /// `b` followed by a base other than 2, 8, 10 or 16.
    IntArbitraryBase,
    /// `o`: octal.
    IntOctal,
    /// `d`: decimal.
    IntDecimal,
    /// `i`: base detected from the prefix.
    IntGeneric,
    /// `x`/`X`: hexadecimal.
    IntHex,
    /// `c`: characters, including whitespace.
    Character,
    /// `s`: string.
    String,
    /// `f`/`F`: fixed notation.
    FloatFixed,
    /// `e`/`E`: scientific notation.
    FloatScientific,
    /// `g`/`G`: fixed or scientific.
    FloatGeneral,
}

/// Parsed modifiers of a replacement field.
///
/// Produced by the format string parser and consumed by exactly one reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatSpecs {
    /// Maximum field width, in code points.
    pub width: Option<usize>,
    pub ty: PresentationType,
    /// Base for [`PresentationType::IntArbitraryBase`].
    pub arbitrary_base: u8,
    /// `L`: use the locale passed to the scan.
    pub localized: bool,
}

impl FormatSpecs {
    pub fn with_type(ty: PresentationType) -> Self {
        Self {
            ty,
            ..Self::default()
        }
    }

    /// Spec selecting base `base` for integers.
    pub fn with_base(base: u8) -> Self {
        let ty = match base {
            2 => PresentationType::IntBinary,
            8 => PresentationType::IntOctal,
            10 => PresentationType::IntDecimal,
            16 => PresentationType::IntHex,
            _ => PresentationType::IntArbitraryBase,
        };
        Self {
            ty,
            arbitrary_base: base,
            ..Self::default()
        }
    }

    /// Explicit integer base requested by this spec, if any.
    pub fn integer_base(&self) -> Option<u32> {
        match self.ty {
            PresentationType::IntBinary => Some(2),
            PresentationType::IntOctal => Some(8),
            PresentationType::IntDecimal => Some(10),
            PresentationType::IntHex => Some(16),
            PresentationType::IntArbitraryBase => Some(u32::from(self.arbitrary_base)),
            _ => None,
        }
    }

    /// Whether the presentation type is one of the integer types.
    pub fn is_integer_type(&self) -> bool {
        matches!(
            self.ty,
            PresentationType::IntBinary
                | PresentationType::IntArbitraryBase
                | PresentationType::IntOctal
                | PresentationType::IntDecimal
                | PresentationType::IntGeneric
                | PresentationType::IntHex
        )
    }

    pub fn is_float_type(&self) -> bool {
        matches!(
            self.ty,
            PresentationType::FloatFixed
                | PresentationType::FloatScientific
                | PresentationType::FloatGeneral
        )
    }
}
