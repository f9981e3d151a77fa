use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Checks whether `s` is a complete JSON5 numeric literal.
///
/// Accepts everything JSON does plus a leading `+`, hexadecimal
/// integers (`0xDEADBeef`), a bare leading or trailing dot (`.5`,
/// `5.`), and the keywords `NaN` and `Infinity`. `Infinity` may carry
/// a sign; `NaN` may not.
pub fn is_valid_number(s: &str) -> bool {
    validate(s, false)
}

/// Strict RFC 8259 variant: no sign prefix other than `-`, no hex, no
/// bare dots, no keywords.
pub(crate) fn is_valid_strict_number(s: &str) -> bool {
    validate(s, true)
}

fn validate(s: &str, strict: bool) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    let signed = matches!(b.first(), Some(b'+' | b'-'));
    if signed {
        if strict && b[0] == b'+' {
            return false;
        }
        i = 1;
    }

    let rest = &s[i..];
    if rest.eq_ignore_ascii_case("NaN") {
        return !strict && !signed;
    }
    if rest.eq_ignore_ascii_case("Infinity") {
        return !strict;
    }

    // hexadecimal integer
    if b.len() >= i + 2 && b[i] == b'0' && (b[i + 1] == b'x' || b[i + 1] == b'X') {
        if strict {
            return false;
        }
        let digits = &b[i + 2..];
        return !digits.is_empty() && digits.iter().all(u8::is_ascii_hexdigit);
    }

    let len = b.len();
    let mut saw_int = false;
    let mut saw_frac = false;

    if i < len && b[i].is_ascii_digit() {
        saw_int = true;
        if b[i] == b'0' {
            i += 1;
            // a leading zero may not be followed by another digit
            if i < len && b[i].is_ascii_digit() {
                return false;
            }
        } else {
            while i < len && b[i].is_ascii_digit() {
                i += 1;
            }
        }
    }

    if i < len && b[i] == b'.' {
        if strict && !saw_int {
            return false;
        }
        i += 1;
        while i < len && b[i].is_ascii_digit() {
            saw_frac = true;
            i += 1;
        }
        if strict && !saw_frac {
            return false;
        }
    }

    if !saw_int && !saw_frac {
        return false;
    }

    if i < len && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < len && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let mut saw_exp = false;
        while i < len && b[i].is_ascii_digit() {
            saw_exp = true;
            i += 1;
        }
        if !saw_exp {
            return false;
        }
    }

    i == len
}

/// An arbitrary JSON5 number, kept as its validated literal text so no
/// precision is lost until the caller picks a target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number {
    text: Box<str>,
}

impl Number {
    /// Wraps an already-validated literal. Callers go through
    /// [`Number::from_str`] otherwise.
    pub(crate) fn from_literal(text: &str) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn split_sign(&self) -> (bool, &str) {
        match self.text.as_bytes().first() {
            Some(b'-') => (true, &self.text[1..]),
            Some(b'+') => (false, &self.text[1..]),
            _ => (false, &self.text),
        }
    }

    fn hex_digits(&self) -> Option<&str> {
        let (_, rest) = self.split_sign();
        let b = rest.as_bytes();
        if b.len() >= 2 && b[0] == b'0' && (b[1] == b'x' || b[1] == b'X') {
            Some(&rest[2..])
        } else {
            None
        }
    }

    /// The literal's `f64` value. `NaN` maps to a quiet NaN and the
    /// sign of a zero literal is preserved, so `-0x0` yields `-0.0`.
    pub fn as_f64(&self) -> f64 {
        let (negative, rest) = self.split_sign();
        if rest.eq_ignore_ascii_case("NaN") {
            return f64::NAN;
        }
        if rest.eq_ignore_ascii_case("Infinity") {
            return if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        if let Some(digits) = self.hex_digits() {
            let mut magnitude = 0.0f64;
            for d in digits.bytes() {
                let v = (d as char).to_digit(16).unwrap_or(0);
                magnitude = magnitude * 16.0 + f64::from(v);
            }
            return if negative { -magnitude } else { magnitude };
        }
        // validated at construction; the float grammar is a superset
        self.text.parse().unwrap_or(f64::NAN)
    }

    /// The literal's exact `i64` value, failing on fractions,
    /// exponents, keywords, and out-of-range magnitudes.
    pub fn as_i64(&self) -> Result<i64, Error> {
        let (negative, rest) = self.split_sign();
        if let Some(digits) = self.hex_digits() {
            let mut acc = 0i64;
            for d in digits.bytes() {
                let v = (d as char).to_digit(16).unwrap_or(0) as i64;
                acc = acc
                    .checked_mul(16)
                    .and_then(|a| {
                        if negative {
                            a.checked_sub(v)
                        } else {
                            a.checked_add(v)
                        }
                    })
                    .ok_or_else(|| self.out_of_range("i64"))?;
            }
            return Ok(acc);
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.not_integer());
        }
        self.text
            .parse::<i64>()
            .map_err(|_| self.out_of_range("i64"))
    }

    /// The literal's exact `u64` value. Any `-` prefix is rejected,
    /// `-0` included.
    pub fn as_u64(&self) -> Result<u64, Error> {
        let (negative, rest) = self.split_sign();
        if negative {
            return Err(self.out_of_range("u64"));
        }
        if let Some(digits) = self.hex_digits() {
            let mut acc = 0u64;
            for d in digits.bytes() {
                let v = (d as char).to_digit(16).unwrap_or(0) as u64;
                acc = acc
                    .checked_mul(16)
                    .and_then(|a| a.checked_add(v))
                    .ok_or_else(|| self.out_of_range("u64"))?;
            }
            return Ok(acc);
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.not_integer());
        }
        rest.parse::<u64>().map_err(|_| self.out_of_range("u64"))
    }

    /// The literal's exact `i128` value, under the same rules as
    /// [`Number::as_i64`] with the wider range.
    pub fn as_i128(&self) -> Result<i128, Error> {
        let (negative, rest) = self.split_sign();
        if let Some(digits) = self.hex_digits() {
            let mut acc = 0i128;
            for d in digits.bytes() {
                let v = (d as char).to_digit(16).unwrap_or(0) as i128;
                acc = acc
                    .checked_mul(16)
                    .and_then(|a| {
                        if negative {
                            a.checked_sub(v)
                        } else {
                            a.checked_add(v)
                        }
                    })
                    .ok_or_else(|| self.out_of_range("i128"))?;
            }
            return Ok(acc);
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.not_integer());
        }
        self.text
            .parse::<i128>()
            .map_err(|_| self.out_of_range("i128"))
    }

    /// The literal's exact `u128` value, rejecting any `-` prefix.
    pub fn as_u128(&self) -> Result<u128, Error> {
        let (negative, rest) = self.split_sign();
        if negative {
            return Err(self.out_of_range("u128"));
        }
        if let Some(digits) = self.hex_digits() {
            let mut acc = 0u128;
            for d in digits.bytes() {
                let v = (d as char).to_digit(16).unwrap_or(0) as u128;
                acc = acc
                    .checked_mul(16)
                    .and_then(|a| a.checked_add(v))
                    .ok_or_else(|| self.out_of_range("u128"))?;
            }
            return Ok(acc);
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.not_integer());
        }
        rest.parse::<u128>().map_err(|_| self.out_of_range("u128"))
    }

    fn not_integer(&self) -> Error {
        Error::conversion(format!("number {} is not an integer", self.text))
    }

    fn out_of_range(&self, target: &str) -> Error {
        Error::conversion(format!("number {} out of range of {target}", self.text))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_valid_number(s) {
            Ok(Self { text: s.into() })
        } else {
            Err(Error::conversion(format!("invalid numeric literal {s:?}")))
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        let mut buffer = itoa::Buffer::new();
        Self {
            text: buffer.format(v).into(),
        }
    }
}

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        let mut buffer = itoa::Buffer::new();
        Self {
            text: buffer.format(v).into(),
        }
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        let text: Box<str> = if v.is_nan() {
            "NaN".into()
        } else if v == f64::INFINITY {
            "Infinity".into()
        } else if v == f64::NEG_INFINITY {
            "-Infinity".into()
        } else {
            let mut buffer = ryu::Buffer::new();
            buffer.format(v).into()
        };
        Self { text }
    }
}
