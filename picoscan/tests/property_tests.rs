// SPDX-License-Identifier: Apache-2.0

use picoscan::{
    read_code_point, scan_args, vscan_with, ChunkReader, IntMethod, LocaleRef, ScanBuffer,
    ScanContext, ScanErrorCode, ScanOptions,
};
use proptest::prelude::*;

fn int_method() -> impl Strategy<Value = IntMethod> {
    prop_oneof![
        Just(IntMethod::FromStrRadix),
        Just(IntMethod::Custom),
        Just(IntMethod::FromChars),
    ]
}

fn scan_with<T: picoscan::Scannable + Default>(
    buffer: &ScanBuffer<'_>,
    format: &str,
    method: IntMethod,
) -> Result<T, ScanErrorCode> {
    let mut value = T::default();
    let options = ScanOptions::default().with_int_method(method);
    let result = vscan_with(
        buffer,
        format,
        scan_args![&mut value],
        &options,
        LocaleRef::classic(),
    );
    match result.error() {
        None => Ok(value),
        Some(err) => Err(err.code()),
    }
}

proptest! {
    #[test]
    fn prop_i64_decimal_roundtrip(v in any::<i64>(), method in int_method()) {
        let text = v.to_string();
        let buffer = ScanBuffer::from(text.as_str());
        prop_assert_eq!(scan_with::<i64>(&buffer, "{d}", method), Ok(v));
    }

    #[test]
    fn prop_i128_roundtrip_segmented(
        v in any::<i128>(),
        chunk in 1usize..8,
        method in int_method(),
    ) {
        let text = v.to_string();
        let buffer = ScanBuffer::from_reader(ChunkReader::new(text.as_bytes(), chunk));
        prop_assert_eq!(scan_with::<i128>(&buffer, "{d}", method), Ok(v));
    }

    #[test]
    fn prop_u16_roundtrip(v in any::<u16>(), method in int_method()) {
        let text = v.to_string();
        let buffer = ScanBuffer::from(text.as_str());
        prop_assert_eq!(scan_with::<u16>(&buffer, "{d}", method), Ok(v));
    }

    #[test]
    fn prop_unsigned_rejects_minus(digits in "[0-9]{1,12}", method in int_method()) {
        let text = format!("-{digits}");
        let buffer = ScanBuffer::from(text.as_str());
        prop_assert_eq!(
            scan_with::<u64>(&buffer, "{}", method),
            Err(ScanErrorCode::ValueOutOfRange)
        );
    }

    #[test]
    fn prop_explicit_base_matches_manual_value(
        base in prop::sample::select(vec![2u32, 8, 10, 16]),
        raw in prop::collection::vec(0u32..36, 1..12),
        method in int_method(),
    ) {
        let digits: Vec<u32> = raw.into_iter().map(|d| d % base).collect();
        let text: String = digits
            .iter()
            .filter_map(|&d| char::from_digit(d, base))
            .collect();
        let expected = digits
            .iter()
            .fold(0u64, |acc, &d| acc * u64::from(base) + u64::from(d));
        let format = match base {
            2 => "{b2}",
            8 => "{o}",
            10 => "{d}",
            _ => "{x}",
        };
        let buffer = ScanBuffer::from(text.as_str());
        prop_assert_eq!(scan_with::<u64>(&buffer, format, method), Ok(expected));
    }

    #[test]
    fn prop_code_point_roundtrip(ch in any::<char>()) {
        let mut utf8 = [0u8; 4];
        let buffer = ScanBuffer::new(ch.encode_utf8(&mut utf8).as_bytes());
        let (rest, decoded) = read_code_point(buffer.get_forward_range()).unwrap();
        prop_assert_eq!(decoded, ch);
        prop_assert!(rest.is_at_end());

        let mut utf16 = [0u16; 2];
        let units = ch.encode_utf16(&mut utf16);
        let buffer = ScanBuffer::new(&units[..]);
        let (_, decoded) = read_code_point(buffer.get_forward_range()).unwrap();
        prop_assert_eq!(decoded, ch);
    }

    #[test]
    fn prop_truncated_utf8_is_end_of_input(
        ch in any::<char>().prop_filter("multi-byte", |c| c.len_utf8() > 1),
    ) {
        let mut utf8 = [0u8; 4];
        let encoded = ch.encode_utf8(&mut utf8).as_bytes();
        let buffer = ScanBuffer::new(&encoded[..encoded.len() - 1]);
        let err = read_code_point(buffer.get_forward_range()).unwrap_err();
        prop_assert_eq!(err.code(), ScanErrorCode::EndOfInput);
    }

    #[test]
    fn prop_advance_to_current_is_noop(text in "[a-z ]{0,16}", skip in 0usize..16) {
        let buffer = ScanBuffer::from(text.as_str());
        let mut ctx = ScanContext::new(&buffer, scan_args![], LocaleRef::classic());
        let mut cursor = ctx.begin();
        cursor.advance_by(skip);
        ctx.advance_to(cursor.clone());
        let before = ctx.begin();
        ctx.advance_to(ctx.begin());
        prop_assert_eq!(ctx.begin(), before);
        prop_assert_eq!(ctx.begin(), cursor);
    }
}
