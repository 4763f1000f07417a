// SPDX-License-Identifier: Apache-2.0

//! Type-erased output arguments.
//!
//! A scan writes into caller-owned values. Each value is captured as a
//! [`ScanArg`], a tagged `&mut` reference, and the list of them forms the
//! [`ScanArgs`] store that replacement fields index into. The
//! [`scan_args!`](crate::scan_args) macro builds a store from `&mut`
//! expressions.

use alloc::string::String;
use alloc::vec::Vec;

use crate::char_types::{NarrowChar, WideChar};
use crate::encoding::CodeUnit;
use crate::value_reader::{ArgVisitor, ScanCustom};

/// Conversion of a caller-owned value into a [`ScanArg`].
///
/// Implemented for every built-in scannable type. User types implement
/// [`ScanCustom`] and then opt in with a one-line impl:
///
/// ```rust
/// use picoscan::{Cursor, LocaleRef, ScanArg, ScanCustom, ScanExpected, Scannable};
///
/// struct Ignored;
///
/// impl ScanCustom for Ignored {
///     fn read_default<'b, 's>(
///         &mut self,
///         range: Cursor<'b, 's, u8>,
///         _loc: LocaleRef<'_>,
///     ) -> ScanExpected<Cursor<'b, 's, u8>> {
///         Ok(range)
///     }
/// }
///
/// impl Scannable for Ignored {
///     fn as_scan_arg(&mut self) -> ScanArg<'_> {
///         ScanArg::Custom(self)
///     }
/// }
/// ```
pub trait Scannable<C: CodeUnit = u8> {
    fn as_scan_arg(&mut self) -> ScanArg<'_, C>;
}

macro_rules! define_scan_args {
    ($( $(#[$meta:meta])* $variant:ident($ty:ty) ),* $(,)?) => {
        /// A type-tagged `&mut` to one caller-owned output.
        pub enum ScanArg<'v, C: CodeUnit = u8> {
            $( $(#[$meta])* $variant(&'v mut $ty), )*
            /// A user-defined type scanned through [`ScanCustom`].
            Custom(&'v mut dyn ScanCustom<C>),
        }

        /// The type tag of a [`ScanArg`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ArgType {
            $( $(#[$meta])* $variant, )*
            Custom,
        }

        impl<'v, C: CodeUnit> ScanArg<'v, C> {
            pub fn arg_type(&self) -> ArgType {
                match self {
                    $( $(#[$meta])* ScanArg::$variant(_) => ArgType::$variant, )*
                    ScanArg::Custom(_) => ArgType::Custom,
                }
            }

            /// Hand the referenced value to `visitor` with its concrete type.
            pub fn visit<V: ArgVisitor<C>>(&mut self, visitor: V) -> V::Output {
                match self {
                    $( $(#[$meta])* ScanArg::$variant(value) => visitor.visit(&mut **value), )*
                    ScanArg::Custom(value) => visitor.visit_custom(&mut **value),
                }
            }
        }

        $(
            $(#[$meta])*
            impl<C: CodeUnit> Scannable<C> for $ty {
                fn as_scan_arg(&mut self) -> ScanArg<'_, C> {
                    ScanArg::$variant(self)
                }
            }
        )*
    };
}

define_scan_args! {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    #[cfg(feature = "float")]
    F32(f32),
    #[cfg(feature = "float")]
    F64(f64),
    Char(char),
    Narrow(NarrowChar),
    Wide(WideChar),
    String(String),
}

impl<C: CodeUnit> core::fmt::Debug for ScanArg<'_, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ScanArg").field(&self.arg_type()).finish()
    }
}

/// The argument list of one scan call.
///
/// Replacement fields refer to arguments by index. Each argument may be
/// referenced by at most one field.
#[derive(Debug, Default)]
pub struct ScanArgs<'v, C: CodeUnit = u8> {
    args: Vec<ScanArg<'v, C>>,
}

impl<'v, C: CodeUnit> ScanArgs<'v, C> {
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    pub fn push(&mut self, arg: ScanArg<'v, C>) {
        self.args.push(arg);
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The `id`-th argument.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut ScanArg<'v, C>> {
        self.args.get_mut(id)
    }

    /// Type tags of all arguments, in order.
    pub fn types(&self) -> ArgTypes<'_, 'v, C> {
        self.args
            .iter()
            .map(ScanArg::arg_type as fn(&ScanArg<'v, C>) -> ArgType)
    }
}

/// Iterator over the type tags of a [`ScanArgs`].
pub type ArgTypes<'a, 'v, C> =
    core::iter::Map<core::slice::Iter<'a, ScanArg<'v, C>>, fn(&ScanArg<'v, C>) -> ArgType>;

impl<'v, C: CodeUnit> From<Vec<ScanArg<'v, C>>> for ScanArgs<'v, C> {
    fn from(args: Vec<ScanArg<'v, C>>) -> Self {
        Self { args }
    }
}

impl<'v, C: CodeUnit> FromIterator<ScanArg<'v, C>> for ScanArgs<'v, C> {
    fn from_iter<I: IntoIterator<Item = ScanArg<'v, C>>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().collect(),
        }
    }
}

impl<'v, C: CodeUnit> Extend<ScanArg<'v, C>> for ScanArgs<'v, C> {
    fn extend<I: IntoIterator<Item = ScanArg<'v, C>>>(&mut self, iter: I) {
        self.args.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_args;

    #[test]
    fn test_arg_types() {
        let mut a = 0i32;
        let mut b = 0u64;
        let mut s = String::new();
        let mut c = WideChar::default();
        let args: ScanArgs<'_> = scan_args![&mut a, &mut b, &mut s, &mut c];
        assert_eq!(args.len(), 4);
        let types: Vec<ArgType> = args.types().collect();
        assert_eq!(
            types,
            [ArgType::I32, ArgType::U64, ArgType::String, ArgType::Wide]
        );
    }

    #[test]
    fn test_get_mut_out_of_range() {
        let mut flag = false;
        let mut args: ScanArgs<'_, u16> = scan_args![&mut flag];
        assert!(args.get_mut(0).is_some());
        assert!(args.get_mut(1).is_none());
    }

    #[test]
    fn test_empty_store() {
        let args: ScanArgs<'_> = scan_args![];
        assert!(args.is_empty());
    }
}
