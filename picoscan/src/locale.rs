// SPDX-License-Identifier: Apache-2.0

use alloc::borrow::Cow;

/// Locale facets consulted by readers scanning with the `L` flag.
///
/// The scanner never mutates a locale. Without the `L` flag readers use the
/// classic conventions regardless of the locale passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    decimal_point: char,
    thousands_sep: Option<char>,
    truename: Cow<'static, str>,
    falsename: Cow<'static, str>,
}

static CLASSIC: Locale = Locale::classic();

impl Locale {
    /// The "C" locale: `.` decimal point, no grouping, `true`/`false`.
    pub const fn classic() -> Self {
        Self {
            decimal_point: '.',
            thousands_sep: None,
            truename: Cow::Borrowed("true"),
            falsename: Cow::Borrowed("false"),
        }
    }

    pub fn with_decimal_point(mut self, decimal_point: char) -> Self {
        self.decimal_point = decimal_point;
        self
    }

    pub fn with_thousands_sep(mut self, thousands_sep: char) -> Self {
        self.thousands_sep = Some(thousands_sep);
        self
    }

    pub fn with_bool_names(
        mut self,
        truename: impl Into<Cow<'static, str>>,
        falsename: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.truename = truename.into();
        self.falsename = falsename.into();
        self
    }

    pub fn decimal_point(&self) -> char {
        self.decimal_point
    }

    pub fn thousands_sep(&self) -> Option<char> {
        self.thousands_sep
    }

    pub fn truename(&self) -> &str {
        &self.truename
    }

    pub fn falsename(&self) -> &str {
        &self.falsename
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::classic()
    }
}

/// Opaque handle to a caller-owned [`Locale`], passed through to readers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleRef<'l> {
    locale: Option<&'l Locale>,
}

impl<'l> LocaleRef<'l> {
    pub fn new(locale: &'l Locale) -> Self {
        Self {
            locale: Some(locale),
        }
    }

    /// Handle to the classic locale.
    pub fn classic() -> Self {
        Self { locale: None }
    }

    /// The referenced locale, or the classic one.
    pub fn get(&self) -> &'l Locale {
        self.locale.unwrap_or(&CLASSIC)
    }
}

impl<'l> From<&'l Locale> for LocaleRef<'l> {
    fn from(locale: &'l Locale) -> Self {
        Self::new(locale)
    }
}
