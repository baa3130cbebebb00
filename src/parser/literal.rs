//! Range checked conversion of literal tokens into scalars.

use super::{Span, error::ParseError};
use crate::ir::{FloatTy, IntTy, Scalar, Type, UintTy};

/// Parses an integer literal.
///
/// The suffix decides the kind. Without one the literal is `i64`, or `u64`
/// when it is positive and does not fit.
pub(crate) fn parse_integer(literal: &str, span: Span) -> Result<Scalar, ParseError> {
    let invalid = || ParseError::InvalidLiteral {
        literal: literal.to_string(),
        span,
    };

    let (negative, unsigned_text) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let (digits, suffix) = match unsigned_text.find(['u', 'i']) {
        Some(at) => unsigned_text.split_at(at),
        None => (unsigned_text, ""),
    };
    let (radix, digits) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        _ => (10, digits),
    };
    let digits = digits.replace('_', "");
    if digits.is_empty() {
        return Err(invalid());
    }

    let kind = if suffix.is_empty() {
        None
    } else {
        Some(suffix.parse::<Type>().map_err(|_| invalid())?)
    };

    let out_of_range = |kind: Type| ParseError::LiteralOutOfRange {
        literal: literal.to_string(),
        kind,
        span,
    };

    let magnitude = match u64::from_str_radix(&digits, radix) {
        Ok(magnitude) => magnitude,
        Err(_) => {
            return Err(out_of_range(kind.unwrap_or(if negative {
                Type::Int(IntTy::I64)
            } else {
                Type::Uint(UintTy::U64)
            })));
        }
    };
    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };

    let kind = kind.unwrap_or(if negative || value <= i128::from(i64::MAX) {
        Type::Int(IntTy::I64)
    } else {
        Type::Uint(UintTy::U64)
    });

    let scalar = match &kind {
        Type::Int(IntTy::I8) => i8::try_from(value).map(Scalar::from),
        Type::Int(IntTy::I16) => i16::try_from(value).map(Scalar::from),
        Type::Int(IntTy::I32) => i32::try_from(value).map(Scalar::from),
        Type::Int(IntTy::I64) => i64::try_from(value).map(Scalar::from),
        Type::Uint(UintTy::U8) => u8::try_from(value).map(Scalar::from),
        Type::Uint(UintTy::U16) => u16::try_from(value).map(Scalar::from),
        Type::Uint(UintTy::U32) => u32::try_from(value).map(Scalar::from),
        Type::Uint(UintTy::U64) => u64::try_from(value).map(Scalar::from),
        _ => return Err(invalid()),
    };
    scalar.map_err(|_| out_of_range(kind))
}

/// Parses a float literal, `f64` unless suffixed `f32`.
///
/// Literals that overflow to infinity or underflow to zero are out of range.
pub(crate) fn parse_float(literal: &str, span: Span) -> Result<Scalar, ParseError> {
    let (text, kind) = if let Some(text) = literal.strip_suffix("f32") {
        (text, FloatTy::F32)
    } else if let Some(text) = literal.strip_suffix("f64") {
        (text, FloatTy::F64)
    } else {
        (literal, FloatTy::F64)
    };
    let text = text.replace('_', "");

    let invalid = || ParseError::InvalidLiteral {
        literal: literal.to_string(),
        span,
    };
    let scalar = match kind {
        FloatTy::F32 => Scalar::F32(text.parse::<f32>().map_err(|_| invalid())?),
        FloatTy::F64 => Scalar::F64(text.parse::<f64>().map_err(|_| invalid())?),
    };

    // digits before the exponent, a nonzero one means the value is not zero
    let mantissa = text.split(['e', 'E']).next().unwrap_or_default();
    let nonzero = mantissa.bytes().any(|digit| matches!(digit, b'1'..=b'9'));

    let representable = match scalar {
        Scalar::F32(value) => value.is_finite() && (value != 0.0 || !nonzero),
        Scalar::F64(value) => value.is_finite() && (value != 0.0 || !nonzero),
        _ => true,
    };
    if !representable {
        return Err(ParseError::LiteralOutOfRange {
            literal: literal.to_string(),
            kind: Type::Float(kind),
            span,
        });
    }
    Ok(scalar)
}
