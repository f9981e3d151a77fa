use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

use crate::decode::scanner::{Event, EventKind, Scanner};
use crate::error::Error;

/// Streaming serde deserializer over the scanner's event stream.
///
/// Runs in a single pass; type mismatches are reported at the byte
/// offset of the offending token.
pub(crate) struct Deserializer<'de> {
    scanner: Scanner<'de>,
}

impl<'de> Deserializer<'de> {
    pub fn new(scanner: Scanner<'de>) -> Self {
        Self { scanner }
    }

    /// Consumes the trailing end-of-input event after a complete
    /// value, surfacing "after top-level value" errors.
    pub fn finish(&mut self) -> Result<(), Error> {
        let event = self.scanner.next_event()?;
        debug_assert_eq!(event.kind, EventKind::Eof);
        Ok(())
    }

    fn next(&mut self) -> Result<Event, Error> {
        self.scanner.next_event()
    }

    fn mismatch(&self, expected: &str, event: &Event) -> Error {
        Error::type_mismatch(
            expected,
            token_name(&event.kind),
            self.scanner.input(),
            event.offset,
        )
    }

    fn relocate(&self, err: Error, offset: usize) -> Error {
        err.with_location(self.scanner.input(), offset)
    }

    fn number(&mut self, expected: &str) -> Result<(crate::num::Number, usize), Error> {
        let event = self.next()?;
        match event.kind {
            EventKind::Number(n) => Ok((n, event.offset)),
            _ => Err(self.mismatch(expected, &event)),
        }
    }

    fn signed<T>(&mut self, expected: &str) -> Result<T, Error>
    where
        T: TryFrom<i64>,
    {
        let (n, offset) = self.number(expected)?;
        let wide = n.as_i64().map_err(|e| self.relocate(e, offset))?;
        T::try_from(wide).map_err(|_| {
            self.relocate(
                Error::conversion(format!("number {n} out of range of {expected}")),
                offset,
            )
        })
    }

    fn unsigned<T>(&mut self, expected: &str) -> Result<T, Error>
    where
        T: TryFrom<u64>,
    {
        let (n, offset) = self.number(expected)?;
        let wide = n.as_u64().map_err(|e| self.relocate(e, offset))?;
        T::try_from(wide).map_err(|_| {
            self.relocate(
                Error::conversion(format!("number {n} out of range of {expected}")),
                offset,
            )
        })
    }

    fn object<V>(
        &mut self,
        visitor: V,
        fields: Option<&'static [&'static str]>,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let value = visitor.visit_map(MapAccess {
            de: &mut *self,
            fields,
        })?;
        let event = self.next()?;
        match event.kind {
            EventKind::ObjectEnd => Ok(value),
            _ => Err(Error::type_error(
                "object has more members than expected",
                self.scanner.input(),
                event.offset,
            )),
        }
    }

    fn array<V>(&mut self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let value = visitor.visit_seq(SeqAccess { de: &mut *self })?;
        let event = self.next()?;
        match event.kind {
            EventKind::ArrayEnd => Ok(value),
            _ => Err(Error::type_error(
                "array has more elements than expected",
                self.scanner.input(),
                event.offset,
            )),
        }
    }

    /// Consumes and discards one complete value.
    fn skip_value(&mut self) -> Result<(), Error> {
        let mut depth = match self.next()?.kind {
            EventKind::ObjectBegin | EventKind::ArrayBegin => 1usize,
            _ => return Ok(()),
        };
        while depth > 0 {
            match self.next()?.kind {
                EventKind::ObjectBegin | EventKind::ArrayBegin => depth += 1,
                EventKind::ObjectEnd | EventKind::ArrayEnd => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }
}

fn token_name(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::ObjectBegin | EventKind::ObjectEnd => "object",
        EventKind::ArrayBegin | EventKind::ArrayEnd => "array",
        EventKind::Key(_) => "object key",
        EventKind::String(_) => "string",
        EventKind::Number(_) => "number",
        EventKind::Bool(_) => "boolean",
        EventKind::Null => "null",
        EventKind::Eof => "end of input",
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::Null => visitor.visit_unit(),
            EventKind::Bool(b) => visitor.visit_bool(b),
            EventKind::String(s) => visitor.visit_string(s),
            EventKind::Number(n) => {
                // -0 and -0x0 only keep their sign as floats
                let negative_zero =
                    n.as_i64().map(|v| v == 0).unwrap_or(false) && n.as_str().starts_with('-');
                if !negative_zero {
                    if let Ok(v) = n.as_i64() {
                        return visitor.visit_i64(v);
                    }
                    if let Ok(v) = n.as_u64() {
                        return visitor.visit_u64(v);
                    }
                }
                visitor.visit_f64(n.as_f64())
            }
            EventKind::ObjectBegin => self.object(visitor, None),
            EventKind::ArrayBegin => self.array(visitor),
            _ => Err(self.mismatch("value", &event)),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::Bool(b) => visitor.visit_bool(b),
            _ => Err(self.mismatch("bool", &event)),
        }
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i8(self.signed("i8")?)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i16(self.signed("i16")?)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i32(self.signed("i32")?)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_i64(self.signed("i64")?)
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let (n, offset) = self.number("i128")?;
        let wide = n.as_i128().map_err(|e| self.relocate(e, offset))?;
        visitor.visit_i128(wide)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u8(self.unsigned("u8")?)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u16(self.unsigned("u16")?)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u32(self.unsigned("u32")?)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_u64(self.unsigned("u64")?)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let (n, offset) = self.number("u128")?;
        let wide = n.as_u128().map_err(|e| self.relocate(e, offset))?;
        visitor.visit_u128(wide)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let (n, _) = self.number("f32")?;
        visitor.visit_f32(n.as_f64() as f32)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let (n, _) = self.number("f64")?;
        visitor.visit_f64(n.as_f64())
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => visitor.visit_char(c),
                    _ => Err(self.relocate(
                        Error::conversion(format!(
                            "string {s:?} is not a single character"
                        )),
                        event.offset,
                    )),
                }
            }
            _ => Err(self.mismatch("char", &event)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::String(s) => visitor.visit_string(s),
            _ => Err(self.mismatch("string", &event)),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        if self.scanner.peek()?.kind == EventKind::Null {
            self.next()?;
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::Null => visitor.visit_unit(),
            _ => Err(self.mismatch("null", &event)),
        }
    }

    fn deserialize_unit_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::ArrayBegin => self.array(visitor),
            _ => Err(self.mismatch("array", &event)),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::ObjectBegin => self.object(visitor, None),
            _ => Err(self.mismatch("map", &event)),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::ObjectBegin => self.object(visitor, Some(fields)),
            _ => Err(self.mismatch("struct", &event)),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        let event = self.next()?;
        match event.kind {
            EventKind::String(s) => visitor.visit_enum(s.into_deserializer()),
            EventKind::ObjectBegin => {
                let value = visitor.visit_enum(EnumAccess { de: &mut *self })?;
                let event = self.next()?;
                match event.kind {
                    EventKind::ObjectEnd => Ok(value),
                    _ => Err(Error::type_error(
                        "object has more members than expected",
                        self.scanner.input(),
                        event.offset,
                    )),
                }
            }
            _ => Err(self.mismatch("enum", &event)),
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        self.skip_value()?;
        visitor.visit_unit()
    }
}

struct SeqAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de, 'a> de::SeqAccess<'de> for SeqAccess<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.de.scanner.peek()?.kind == EventKind::ArrayEnd {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}

struct MapAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
    fields: Option<&'static [&'static str]>,
}

impl<'a, 'de> MapAccess<'a, 'de> {
    /// Struct destinations match member names case-insensitively when
    /// no exact match exists, the way reflection-based decoders do.
    fn resolve_key(&self, key: String) -> String {
        let Some(fields) = self.fields else {
            return key;
        };
        if fields.contains(&key.as_str()) {
            return key;
        }
        for field in fields {
            if field.eq_ignore_ascii_case(&key) {
                return (*field).to_string();
            }
        }
        key
    }
}

impl<'de, 'a> de::MapAccess<'de> for MapAccess<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Error>
    where
        K: de::DeserializeSeed<'de>,
    {
        if self.de.scanner.peek()?.kind == EventKind::ObjectEnd {
            return Ok(None);
        }
        let event = self.de.next()?;
        match event.kind {
            EventKind::Key(key) => {
                let key = self.resolve_key(key);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            }
            _ => Err(self.de.mismatch("object key", &event)),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut *self.de)
    }
}

struct KeyDeserializer {
    key: String,
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct EnumAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de, 'a> de::EnumAccess<'de> for EnumAccess<'a, 'de> {
    type Error = Error;
    type Variant = VariantAccess<'a, 'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant), Error>
    where
        V: de::DeserializeSeed<'de>,
    {
        let event = self.de.next()?;
        match event.kind {
            EventKind::Key(key) => {
                let variant = seed.deserialize(KeyDeserializer { key })?;
                Ok((variant, VariantAccess { de: self.de }))
            }
            _ => Err(self.de.mismatch("enum variant name", &event)),
        }
    }
}

struct VariantAccess<'a, 'de> {
    de: &'a mut Deserializer<'de>,
}

impl<'de, 'a> de::VariantAccess<'de> for VariantAccess<'a, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        de::Deserialize::deserialize(&mut *self.de)
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value, Error>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut *self.de)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(&mut *self.de, visitor)
    }

    fn struct_variant<V>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(&mut *self.de, "", fields, visitor)
    }
}
