// SPDX-License-Identifier: Apache-2.0

use picoscan::{
    scan_args, vscan_with, IntMethod, LocaleRef, ScanBuffer, ScanErrorCode, ScanExpected,
    ScanOptions, Scannable,
};

const METHODS: [IntMethod; 3] = [
    IntMethod::FromStrRadix,
    IntMethod::Custom,
    IntMethod::FromChars,
];

fn scan_one<T>(input: &str, format: &str, method: IntMethod) -> ScanExpected<T>
where
    T: Default + Scannable<u8>,
{
    let buffer = ScanBuffer::from(input);
    let options = ScanOptions::default().with_int_method(method);
    let mut value = T::default();
    let result = vscan_with(
        &buffer,
        format,
        scan_args![&mut value],
        &options,
        LocaleRef::classic(),
    );
    result.into_result().map(|_| value)
}

/// Expect `expected` if it fits in `T`, otherwise `value_out_of_range`.
fn check_fit<T, E>(result: ScanExpected<T>, expected: Result<T, E>, input: &str, method: IntMethod)
where
    T: PartialEq + core::fmt::Debug,
{
    match expected {
        Ok(expected) => assert_eq!(result, Ok(expected), "{input:?} with {method:?}"),
        Err(_) => assert_eq!(
            result.map_err(|e| e.code()),
            Err(ScanErrorCode::ValueOutOfRange),
            "{input:?} with {method:?}"
        ),
    }
}

macro_rules! integer_tests {
    ($($ty:ident),* $(,)?) => {$(
        paste::paste! {
            #[test_log::test]
            fn [<test_ $ty _simple>]() {
                for method in METHODS {
                    assert_eq!(scan_one::<$ty>("0", "{}", method), Ok(0));
                    assert_eq!(scan_one::<$ty>("1", "{}", method), Ok(1));
                    assert_eq!(scan_one::<$ty>("+1", "{}", method), Ok(1));
                }
            }

            #[test]
            fn [<test_ $ty _negative>]() {
                for method in METHODS {
                    let result = scan_one::<$ty>("-1", "{}", method);
                    check_fit(result, <$ty>::try_from(-1i32), "-1", method);
                }
            }

            #[test]
            fn [<test_ $ty _past_i32>]() {
                for method in METHODS {
                    let result = scan_one::<$ty>("2147483648", "{}", method);
                    check_fit(result, <$ty>::try_from(2_147_483_648i64), "2147483648", method);
                }
            }

            #[test]
            fn [<test_ $ty _binary>]() {
                for method in METHODS {
                    assert_eq!(scan_one::<$ty>("1011", "{b2}", method), Ok(11));
                    assert_eq!(scan_one::<$ty>("0b1011", "{:b}", method), Ok(11));
                }
            }

            #[test]
            fn [<test_ $ty _octal>]() {
                for method in METHODS {
                    let expected = <$ty>::try_from(0o400i32);
                    check_fit(scan_one::<$ty>("400", "{o}", method), expected, "{o} 400", method);
                    let expected = <$ty>::try_from(0o400i32);
                    check_fit(scan_one::<$ty>("0400", "{}", method), expected, "{} 0400", method);
                    let expected = <$ty>::try_from(0o400i32);
                    check_fit(scan_one::<$ty>("0400", "{o}", method), expected, "{o} 0400", method);
                }
            }

            #[test]
            fn [<test_ $ty _hex>]() {
                for method in METHODS {
                    let expected = <$ty>::try_from(0xbad1dea_i64);
                    let scanned = scan_one::<$ty>("bad1dea", "{x}", method);
                    check_fit(scanned, expected, "{x} bad1dea", method);
                    let expected = <$ty>::try_from(0xbad1dea_i64);
                    let scanned = scan_one::<$ty>("0xbad1dea", "{}", method);
                    check_fit(scanned, expected, "{} 0xbad1dea", method);
                }
            }

            #[test]
            fn [<test_ $ty _limits>]() {
                for method in METHODS {
                    let max = <$ty>::MAX.to_string();
                    assert_eq!(scan_one::<$ty>(&max, "{}", method), Ok(<$ty>::MAX));
                    let min = <$ty>::MIN.to_string();
                    assert_eq!(scan_one::<$ty>(&min, "{}", method), Ok(<$ty>::MIN));

                    let too_big = format!("{max}0");
                    let err = scan_one::<$ty>(&too_big, "{}", method).unwrap_err();
                    assert_eq!(err.code(), ScanErrorCode::ValueOutOfRange);
                }
            }

            #[test]
            fn [<test_ $ty _target_unmodified_on_error>]() {
                for method in METHODS {
                    let buffer = ScanBuffer::from("zzz");
                    let options = ScanOptions::default().with_int_method(method);
                    let mut value: $ty = 42;
                    let result = vscan_with(
                        &buffer,
                        "{}",
                        scan_args![&mut value],
                        &options,
                        LocaleRef::classic(),
                    );
                    assert_eq!(
                        result.error().map(|e| e.code()),
                        Some(ScanErrorCode::InvalidScannedValue)
                    );
                    assert_eq!(value, 42);
                }
            }
        }
    )*};
}

integer_tests!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[test]
fn test_hex_into_narrow_type_is_out_of_range() {
    for method in METHODS {
        assert_eq!(scan_one::<i32>("0xbad1dea", "{}", method), Ok(0xBAD1DEA));
        let err = scan_one::<i16>("0xbad1dea", "{}", method).unwrap_err();
        assert_eq!(err.code(), ScanErrorCode::ValueOutOfRange);
    }
}

#[test]
fn test_arbitrary_bases() {
    for method in METHODS {
        assert_eq!(scan_one::<u32>("zz", "{b36}", method), Ok(36 * 36 - 1));
        assert_eq!(scan_one::<i32>("-121", "{:b3}", method), Ok(-16));
        assert_eq!(scan_one::<u64>("FF", "{X}", method), Ok(255));
        assert_eq!(scan_one::<u8>("0o17", "{i}", method), Ok(15));
    }
}

#[test]
fn test_decimal_spec_ignores_prefixes() {
    for method in METHODS {
        assert_eq!(scan_one::<u32>("0400", "{d}", method), Ok(400));
        let buffer = ScanBuffer::from("0x12");
        let options = ScanOptions::default().with_int_method(method);
        let mut value = 0u32;
        let result = vscan_with(
            &buffer,
            "{d}",
            scan_args![&mut value],
            &options,
            LocaleRef::classic(),
        );
        assert!(result.is_ok());
        assert_eq!(value, 0);
        assert_eq!(result.position(), 1);
    }
}

#[test]
fn test_width_is_rejected_for_integers() {
    for method in METHODS {
        let err = scan_one::<i32>("123", "{:2}", method).unwrap_err();
        assert_eq!(err.code(), ScanErrorCode::InvalidFormatString);
    }
}
