//! Serde-compatible JSON5 decoder with precise error positions.
//!
//! Accepts the full JSON5 grammar on top of JSON: comments, trailing
//! commas, unquoted identifier keys, single-quoted strings, hex
//! numbers, `NaN` and `Infinity`. Every syntax error carries the byte
//! offset plus the 1-based line and column where it occurred.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! let config = r#"{
//!     // comments survive decoding
//!     host: 'example.com',
//!     port: 8080,
//!     tags: ['primary', 'eu-west',],
//! }"#;
//!
//! let server: Server = serde_json5::from_str(config)?;
//! assert_eq!(server.port, 8080);
//! # Ok::<(), serde_json5::Error>(())
//! ```
//!
//! Use [`decode_to_value`] when no destination type is known up front,
//! and [`DecodeOptions::strict`] to decode plain RFC 8259 JSON with
//! the same error reporting.

mod decode;
mod error;
mod num;
mod options;
mod value;

use std::io::Read;

pub use crate::error::{Error, ErrorKind, Location};
pub use crate::num::{is_valid_number, Number};
pub use crate::options::{DecodeOptions, MAX_DEPTH};
pub use crate::value::Value;

/// Decodes a JSON5 document into any type implementing
/// [`serde::Deserialize`].
pub fn from_str<'de, T>(input: &'de str) -> Result<T, Error>
where
    T: serde::de::Deserialize<'de>,
{
    decode::from_str(input, DecodeOptions::default())
}

/// [`from_str`] with explicit [`DecodeOptions`].
pub fn from_str_with_options<'de, T>(
    input: &'de str,
    options: DecodeOptions,
) -> Result<T, Error>
where
    T: serde::de::Deserialize<'de>,
{
    decode::from_str(input, options)
}

/// Decodes a JSON5 document from raw bytes, which must be UTF-8.
pub fn from_slice<'de, T>(input: &'de [u8]) -> Result<T, Error>
where
    T: serde::de::Deserialize<'de>,
{
    from_slice_with_options(input, DecodeOptions::default())
}

/// [`from_slice`] with explicit [`DecodeOptions`].
pub fn from_slice_with_options<'de, T>(
    input: &'de [u8],
    options: DecodeOptions,
) -> Result<T, Error>
where
    T: serde::de::Deserialize<'de>,
{
    decode::from_str(as_utf8(input)?, options)
}

/// Reads a JSON5 document to the end of `reader` and decodes it.
pub fn from_reader<T, R>(mut reader: R) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
    R: Read,
{
    from_reader_with_options(&mut reader, DecodeOptions::default())
}

/// [`from_reader`] with explicit [`DecodeOptions`].
pub fn from_reader_with_options<T, R>(
    mut reader: R,
    options: DecodeOptions,
) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
    R: Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::deserialize(format!("failed to read input: {e}")))?;
    from_slice_with_options(&bytes, options)
}

/// Decodes a JSON5 document into a dynamically typed [`Value`].
pub fn decode_to_value(input: &str) -> Result<Value, Error> {
    decode::to_value(input, DecodeOptions::default())
}

/// [`decode_to_value`] with explicit [`DecodeOptions`].
pub fn decode_to_value_with_options(
    input: &str,
    options: DecodeOptions,
) -> Result<Value, Error> {
    decode::to_value(input, options)
}

/// Checks syntax without building anything, returning the first error.
pub fn validate_str(input: &str) -> Result<(), Error> {
    decode::validate(input, DecodeOptions::default())
}

/// [`validate_str`] with explicit [`DecodeOptions`].
pub fn validate_str_with_options(input: &str, options: DecodeOptions) -> Result<(), Error> {
    decode::validate(input, options)
}

fn as_utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(|e| {
        let prefix = std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or("");
        Error::syntax("invalid UTF-8 in input", prefix, e.valid_up_to())
    })
}
