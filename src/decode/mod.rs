mod de;
mod scanner;

use indexmap::IndexMap;

use crate::error::Error;
use crate::options::DecodeOptions;
use crate::value::Value;

use self::de::Deserializer;
use self::scanner::{Event, EventKind, Scanner};

pub(crate) fn from_str<'de, T>(input: &'de str, options: DecodeOptions) -> Result<T, Error>
where
    T: serde::de::Deserialize<'de>,
{
    let mut de = Deserializer::new(Scanner::new(input, options));
    let value = T::deserialize(&mut de)?;
    de.finish()?;
    Ok(value)
}

pub(crate) fn to_value(input: &str, options: DecodeOptions) -> Result<Value, Error> {
    let mut scanner = Scanner::new(input, options);
    let event = scanner.next_event()?;
    let value = build_value(&mut scanner, event)?;
    let event = scanner.next_event()?;
    debug_assert_eq!(event.kind, EventKind::Eof);
    Ok(value)
}

pub(crate) fn validate(input: &str, options: DecodeOptions) -> Result<(), Error> {
    let mut scanner = Scanner::new(input, options);
    loop {
        if scanner.next_event()?.kind == EventKind::Eof {
            return Ok(());
        }
    }
}

/// Recursive tree builder for dynamic decoding. Duplicate object keys
/// keep the first occurrence's position and the last one's value.
fn build_value(scanner: &mut Scanner<'_>, event: Event) -> Result<Value, Error> {
    match event.kind {
        EventKind::Null => Ok(Value::Null),
        EventKind::Bool(b) => Ok(Value::Bool(b)),
        EventKind::Number(n) => Ok(Value::Number(n)),
        EventKind::String(s) => Ok(Value::String(s)),
        EventKind::ArrayBegin => {
            let mut items = Vec::new();
            loop {
                let event = scanner.next_event()?;
                if event.kind == EventKind::ArrayEnd {
                    return Ok(Value::Array(items));
                }
                items.push(build_value(scanner, event)?);
            }
        }
        EventKind::ObjectBegin => {
            let mut map = IndexMap::new();
            loop {
                let event = scanner.next_event()?;
                match event.kind {
                    EventKind::ObjectEnd => return Ok(Value::Object(map)),
                    EventKind::Key(key) => {
                        let event = scanner.next_event()?;
                        let value = build_value(scanner, event)?;
                        map.insert(key, value);
                    }
                    _ => return Err(Error::deserialize("unbalanced event stream")),
                }
            }
        }
        _ => Err(Error::deserialize("unbalanced event stream")),
    }
}
