//! Integer width promotion and float decoding.
//!
//! The lexer only classifies a token as `INTEGER` or `FLOAT` and hands back
//! its raw text; this module does the actual digit-to-value conversion the
//! spec assigns to the parser.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::value::{FloatValue, Number};

/// Decodes an `INTEGER` token's raw text (underscores, optional sign,
/// optional `0x`/`0o`/`0b` prefix all intact) into the narrowest `Number`
/// variant that represents it.
pub fn decode_integer(raw: &str) -> Result<Number, String> {
    if let Some(digits) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return decode_based(digits, 16);
    }
    if let Some(digits) = raw.strip_prefix("0o").or_else(|| raw.strip_prefix("0O")) {
        return decode_based(digits, 8);
    }
    if let Some(digits) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
        return decode_based(digits, 2);
    }
    decode_decimal(raw)
}

fn decode_based(digits: &str, base: u32) -> Result<Number, String> {
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return Err(format!("no digits after base-{base} prefix"));
    }
    let effective_len = cleaned.len();
    let value = BigInt::parse_bytes(cleaned.as_bytes(), base)
        .ok_or_else(|| format!("invalid number representation: '{cleaned}'"))?;

    let (width32, width64) = match base {
        16 => (7, 15),
        8 => (10, 21),
        2 => (31, 63),
        _ => unreachable!("only bases 16, 8, 2 carry a prefix"),
    };

    if effective_len <= width32 {
        value
            .to_i32()
            .map(Number::I32)
            .ok_or_else(|| "invalid number representation".to_string())
    } else if effective_len <= width64 {
        value
            .to_i64()
            .map(Number::I64)
            .ok_or_else(|| "invalid number representation".to_string())
    } else {
        Ok(Number::BigInt(value))
    }
}

fn decode_decimal(raw: &str) -> Result<Number, String> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let cleaned: String = unsigned.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return Err("expected a digit".to_string());
    }
    let effective_len = cleaned.len();
    let magnitude = BigInt::parse_bytes(cleaned.as_bytes(), 10)
        .ok_or_else(|| format!("invalid number representation: '{cleaned}'"))?;
    let value = if negative { -magnitude } else { magnitude };

    if effective_len <= 9 {
        value
            .to_i32()
            .map(Number::I32)
            .ok_or_else(|| "invalid number representation".to_string())
    } else if effective_len <= 18 {
        let as_i64 = value
            .to_i64()
            .ok_or_else(|| "invalid number representation".to_string())?;
        Ok(match i32::try_from(as_i64) {
            Ok(as_i32) => Number::I32(as_i32),
            Err(_) => Number::I64(as_i64),
        })
    } else {
        Ok(Number::BigInt(value))
    }
}

/// Decodes a `FLOAT` token's raw text into a special value or an
/// arbitrary-precision decimal.
pub fn decode_float(raw: &str) -> Result<FloatValue, String> {
    match raw {
        "nan" | "+nan" | "-nan" => Ok(FloatValue::NaN),
        "inf" | "+inf" => Ok(FloatValue::PositiveInfinity),
        "-inf" => Ok(FloatValue::NegativeInfinity),
        _ => {
            let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
            BigDecimal::from_str(&cleaned)
                .map(FloatValue::Finite)
                .map_err(|e| format!("invalid number representation: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_is_32_bit() {
        assert_eq!(decode_integer("0xFF_FF").unwrap(), Number::I32(65535));
    }

    #[test]
    fn long_hex_is_arbitrary_precision() {
        match decode_integer("0xFFFFFFFFFFFFFFFF_F").unwrap() {
            Number::BigInt(_) => {}
            other => panic!("expected BigInt, got {other:?}"),
        }
    }

    #[test]
    fn exact_boundary_hex_is_still_64_bit() {
        // 15 hex digits: stays 64-bit per the ladder.
        match decode_integer("0x7FFFFFFFFFFFFF1").unwrap() {
            Number::I64(_) => {}
            other => panic!("expected I64, got {other:?}"),
        }
    }

    #[test]
    fn decimal_downgrades_to_32_bit_when_it_fits() {
        assert_eq!(decode_integer("5").unwrap(), Number::I32(5));
        assert_eq!(decode_integer("100000000000000001").unwrap(), Number::I64(100000000000000001));
        assert_eq!(decode_integer("000000001").unwrap(), Number::I32(1));
    }

    #[test]
    fn negative_decimal() {
        assert_eq!(decode_integer("-42").unwrap(), Number::I32(-42));
    }

    #[test]
    fn octal_and_binary_prefixes() {
        assert_eq!(decode_integer("0o17").unwrap(), Number::I32(15));
        assert_eq!(decode_integer("0b1010").unwrap(), Number::I32(10));
    }

    #[test]
    fn special_floats() {
        assert_eq!(decode_float("inf").unwrap(), FloatValue::PositiveInfinity);
        assert_eq!(decode_float("-inf").unwrap(), FloatValue::NegativeInfinity);
        assert_eq!(decode_float("nan").unwrap(), FloatValue::NaN);
    }

    #[test]
    fn finite_float_is_arbitrary_precision_decimal() {
        match decode_float("1.5e3").unwrap() {
            FloatValue::Finite(d) => assert_eq!(d, BigDecimal::from_str("1500").unwrap()),
            other => panic!("expected Finite, got {other:?}"),
        }
    }
}
