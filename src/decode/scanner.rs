use memchr::{memchr, memchr3};
use smallvec::SmallVec;

use crate::error::Error;
use crate::num::{is_valid_number, is_valid_strict_number, Number};
use crate::options::DecodeOptions;

/// One positioned lexical event. `offset` is the byte offset of the
/// token's first character in the input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Event {
    pub kind: EventKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EventKind {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    Key(String),
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

/// What the scanner expects next. Separators are consumed internally;
/// callers only ever see value, key, and bracket events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Value,
    KeyFirst,
    KeyAfterComma,
    Colon,
    CommaOrEndObject,
    ValueFirst,
    ValueAfterComma,
    CommaOrEndArray,
    AfterTop,
    End,
}

/// Byte-level JSON5 tokenizer and structural validator in one pass.
///
/// Emits a well-formed event stream or a positioned syntax error; it
/// never emits events for colons and commas, and it guarantees that
/// begin/end events balance.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    state: State,
    scopes: SmallVec<[Scope; 16]>,
    options: DecodeOptions,
    last_comma: usize,
    peeked: Option<Event>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, options: DecodeOptions) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            state: State::Value,
            scopes: SmallVec::new(),
            options,
            last_comma: 0,
            peeked: None,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn peek(&mut self) -> Result<&Event, Error> {
        if self.peeked.is_none() {
            let event = self.next_event()?;
            self.peeked = Some(event);
        }
        match &self.peeked {
            Some(event) => Ok(event),
            None => Err(self.err("unexpected end of input".to_string(), self.bytes.len())),
        }
    }

    pub fn next_event(&mut self) -> Result<Event, Error> {
        if let Some(event) = self.peeked.take() {
            return Ok(event);
        }
        loop {
            self.skip_trivia()?;
            let offset = self.pos;
            if self.pos >= self.bytes.len() {
                return match self.state {
                    State::AfterTop | State::End => {
                        self.state = State::End;
                        Ok(Event {
                            kind: EventKind::Eof,
                            offset,
                        })
                    }
                    _ => Err(self.err("unexpected end of input".to_string(), offset)),
                };
            }
            let b = self.bytes[self.pos];
            match self.state {
                State::Value | State::ValueFirst | State::ValueAfterComma => {
                    if b == b']' && self.state != State::Value {
                        if self.state == State::ValueAfterComma && self.options.strict {
                            return Err(self.err(
                                "trailing comma not allowed here".to_string(),
                                self.last_comma,
                            ));
                        }
                        return self.end_scope(Scope::Array, EventKind::ArrayEnd);
                    }
                    return self.scan_value();
                }
                State::KeyFirst | State::KeyAfterComma => {
                    if b == b'}' {
                        if self.state == State::KeyAfterComma && self.options.strict {
                            return Err(self.err(
                                "trailing comma not allowed here".to_string(),
                                self.last_comma,
                            ));
                        }
                        return self.end_scope(Scope::Object, EventKind::ObjectEnd);
                    }
                    return self.scan_key();
                }
                State::Colon => {
                    if b == b':' {
                        self.pos += 1;
                        self.state = State::Value;
                        continue;
                    }
                    return Err(self.invalid_char(offset, "after object key"));
                }
                State::CommaOrEndObject => {
                    if b == b',' {
                        self.last_comma = self.pos;
                        self.pos += 1;
                        self.state = State::KeyAfterComma;
                        continue;
                    }
                    if b == b'}' {
                        return self.end_scope(Scope::Object, EventKind::ObjectEnd);
                    }
                    return Err(self.invalid_char(offset, "after object key:value pair"));
                }
                State::CommaOrEndArray => {
                    if b == b',' {
                        self.last_comma = self.pos;
                        self.pos += 1;
                        self.state = State::ValueAfterComma;
                        continue;
                    }
                    if b == b']' {
                        return self.end_scope(Scope::Array, EventKind::ArrayEnd);
                    }
                    return Err(self.invalid_char(offset, "after array element"));
                }
                State::AfterTop | State::End => {
                    return Err(self.invalid_char(offset, "after top-level value"));
                }
            }
        }
    }

    fn scan_value(&mut self) -> Result<Event, Error> {
        let offset = self.pos;
        let b = self.bytes[self.pos];
        match b {
            b'{' => {
                self.push_scope(Scope::Object)?;
                self.pos += 1;
                self.state = State::KeyFirst;
                Ok(Event {
                    kind: EventKind::ObjectBegin,
                    offset,
                })
            }
            b'[' => {
                self.push_scope(Scope::Array)?;
                self.pos += 1;
                self.state = State::ValueFirst;
                Ok(Event {
                    kind: EventKind::ArrayBegin,
                    offset,
                })
            }
            b'"' => {
                let text = self.scan_string(b'"')?;
                self.after_value();
                Ok(Event {
                    kind: EventKind::String(text),
                    offset,
                })
            }
            b'\'' if !self.options.strict => {
                let text = self.scan_string(b'\'')?;
                self.after_value();
                Ok(Event {
                    kind: EventKind::String(text),
                    offset,
                })
            }
            b'-' | b'0'..=b'9' => self.scan_number(),
            b'+' | b'.' if !self.options.strict => self.scan_number(),
            _ if is_ident_start(self.char_at(self.pos)) => {
                let ident = self.scan_ident();
                let kind = match ident {
                    "true" => EventKind::Bool(true),
                    "false" => EventKind::Bool(false),
                    "null" => EventKind::Null,
                    _ if !self.options.strict
                        && (ident.eq_ignore_ascii_case("NaN")
                            || ident.eq_ignore_ascii_case("Infinity")) =>
                    {
                        EventKind::Number(Number::from_literal(ident))
                    }
                    _ => {
                        return Err(
                            self.err(format!("unexpected token '{ident}'"), offset)
                        )
                    }
                };
                self.after_value();
                Ok(Event { kind, offset })
            }
            _ => Err(self.invalid_char(offset, "looking for beginning of value")),
        }
    }

    fn scan_key(&mut self) -> Result<Event, Error> {
        let offset = self.pos;
        let b = self.bytes[self.pos];
        let key = match b {
            b'"' => self.scan_string(b'"')?,
            b'\'' if !self.options.strict => self.scan_string(b'\'')?,
            _ if !self.options.strict && is_ident_start(self.char_at(self.pos)) => {
                self.scan_ident().to_string()
            }
            _ => {
                return Err(self.invalid_char(offset, "looking for beginning of object key"))
            }
        };
        self.state = State::Colon;
        Ok(Event {
            kind: EventKind::Key(key),
            offset,
        })
    }

    fn push_scope(&mut self, scope: Scope) -> Result<(), Error> {
        if self.scopes.len() >= self.options.max_depth {
            return Err(self.err("exceeded maximum nesting depth".to_string(), self.pos));
        }
        self.scopes.push(scope);
        Ok(())
    }

    fn end_scope(&mut self, expected: Scope, kind: EventKind) -> Result<Event, Error> {
        let offset = self.pos;
        debug_assert_eq!(self.scopes.last(), Some(&expected));
        self.scopes.pop();
        self.pos += 1;
        self.after_value();
        Ok(Event { kind, offset })
    }

    fn after_value(&mut self) {
        self.state = match self.scopes.last() {
            Some(Scope::Object) => State::CommaOrEndObject,
            Some(Scope::Array) => State::CommaOrEndArray,
            None => State::AfterTop,
        };
    }

    fn scan_number(&mut self) -> Result<Event, Error> {
        let start = self.pos;
        if matches!(self.bytes[self.pos], b'+' | b'-') {
            self.pos += 1;
        }
        // consume the widest plausible span, then validate as a whole
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            let extends = b.is_ascii_alphanumeric()
                || b == b'.'
                || (matches!(b, b'+' | b'-')
                    && matches!(self.bytes[self.pos - 1], b'e' | b'E'));
            if !extends {
                break;
            }
            self.pos += 1;
        }
        let text = &self.input[start..self.pos];
        let valid = if self.options.strict {
            is_valid_strict_number(text)
        } else {
            is_valid_number(text)
        };
        if !valid {
            return Err(self.err(format!("invalid numeric literal {text:?}"), start));
        }
        self.after_value();
        Ok(Event {
            kind: EventKind::Number(Number::from_literal(text)),
            offset: start,
        })
    }

    fn scan_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let c = self.char_at(self.pos);
            if !is_ident_continue(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    /// Scans a quoted string starting at the opening quote; leaves the
    /// position after the closing quote.
    fn scan_string(&mut self, quote: u8) -> Result<String, Error> {
        self.pos += 1;
        let mut buf = String::new();
        let mut seg = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b == quote {
                buf.push_str(&self.input[seg..self.pos]);
                self.pos += 1;
                return Ok(buf);
            }
            if b == b'\\' {
                buf.push_str(&self.input[seg..self.pos]);
                self.pos += 1;
                self.scan_escape(&mut buf)?;
                seg = self.pos;
            } else if b < 0x20 {
                return Err(self.invalid_char(self.pos, "in string literal"));
            } else {
                self.pos += 1;
            }
        }
        Err(self.err("unexpected end of input".to_string(), self.bytes.len()))
    }

    fn scan_escape(&mut self, buf: &mut String) -> Result<(), Error> {
        if self.pos >= self.bytes.len() {
            return Err(self.err("unexpected end of input".to_string(), self.bytes.len()));
        }
        let b = self.bytes[self.pos];
        if self.options.strict {
            match b {
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' | b'u' => {}
                _ => return Err(self.invalid_char(self.pos, "in string escape code")),
            }
        }
        match b {
            b'"' | b'\'' | b'\\' | b'/' => {
                buf.push(b as char);
                self.pos += 1;
            }
            b'b' => {
                buf.push('\u{0008}');
                self.pos += 1;
            }
            b'f' => {
                buf.push('\u{000C}');
                self.pos += 1;
            }
            b'n' => {
                buf.push('\n');
                self.pos += 1;
            }
            b'r' => {
                buf.push('\r');
                self.pos += 1;
            }
            b't' => {
                buf.push('\t');
                self.pos += 1;
            }
            b'v' => {
                buf.push('\u{000B}');
                self.pos += 1;
            }
            b'0' => {
                self.pos += 1;
                if self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
                    return Err(self.invalid_char(self.pos, "in string escape code"));
                }
                buf.push('\u{0000}');
            }
            b'1'..=b'9' => {
                return Err(self.invalid_char(self.pos, "in string escape code"));
            }
            b'x' => {
                self.pos += 1;
                let byte = self.scan_hex(2)? as u8;
                buf.push(char::from(byte));
            }
            b'u' => {
                self.pos += 1;
                let unit = self.scan_hex(4)? as u16;
                buf.push(self.combine_surrogates(unit)?);
            }
            b'\n' => {
                self.pos += 1;
            }
            b'\r' => {
                self.pos += 1;
                if self.pos < self.bytes.len() && self.bytes[self.pos] == b'\n' {
                    self.pos += 1;
                }
            }
            _ => {
                let c = self.char_at(self.pos);
                self.pos += c.len_utf8();
                // U+2028 and U+2029 continue the line like \n does
                if c != '\u{2028}' && c != '\u{2029}' {
                    buf.push(c);
                }
            }
        }
        Ok(())
    }

    fn scan_hex(&mut self, digits: usize) -> Result<u32, Error> {
        let mut value = 0u32;
        for _ in 0..digits {
            if self.pos >= self.bytes.len() {
                return Err(
                    self.err("unexpected end of input".to_string(), self.bytes.len())
                );
            }
            let c = self.char_at(self.pos);
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.invalid_char(self.pos, "in string escape code"))?;
            value = value * 16 + digit;
            self.pos += 1;
        }
        Ok(value)
    }

    /// Pairs a high surrogate with a following `\uXXXX` low surrogate;
    /// any unpairable unit decodes to U+FFFD.
    fn combine_surrogates(&mut self, unit: u16) -> Result<char, Error> {
        if !(0xD800..=0xDFFF).contains(&unit) {
            return Ok(char::from_u32(u32::from(unit)).unwrap_or('\u{FFFD}'));
        }
        if (0xDC00..=0xDFFF).contains(&unit) {
            return Ok('\u{FFFD}');
        }
        let rest = &self.bytes[self.pos..];
        if rest.len() >= 6 && rest[0] == b'\\' && rest[1] == b'u' {
            let mark = self.pos;
            self.pos += 2;
            let low = self.scan_hex(4)? as u16;
            if (0xDC00..=0xDFFF).contains(&low) {
                let combined = 0x10000
                    + ((u32::from(unit) - 0xD800) << 10)
                    + (u32::from(low) - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or('\u{FFFD}'));
            }
            // not a low surrogate; rewind so it decodes on its own
            self.pos = mark;
        }
        Ok('\u{FFFD}')
    }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            while self.pos < self.bytes.len() {
                match self.bytes[self.pos] {
                    b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                    0x0B | 0x0C if !self.options.strict => self.pos += 1,
                    _ => break,
                }
            }
            if self.pos >= self.bytes.len() {
                return Ok(());
            }
            let b = self.bytes[self.pos];
            if b == b'/' && !self.options.strict {
                match self.bytes.get(self.pos + 1) {
                    Some(b'/') => self.skip_line_comment(),
                    Some(b'*') => self.skip_block_comment()?,
                    _ => return Ok(()),
                }
                continue;
            }
            if b >= 0xC2 && !self.options.strict {
                let c = self.char_at(self.pos);
                if is_json5_space(c) {
                    self.pos += c.len_utf8();
                    continue;
                }
            }
            return Ok(());
        }
    }

    fn skip_line_comment(&mut self) {
        let mut search = self.pos + 2;
        loop {
            match memchr3(b'\n', b'\r', 0xE2, &self.bytes[search..]) {
                Some(i) => {
                    let at = search + i;
                    if self.bytes[at] != 0xE2 {
                        self.pos = at;
                        return;
                    }
                    // only U+2028/U+2029 sequences end the comment
                    if self.bytes[at..].starts_with(b"\xE2\x80\xA8")
                        || self.bytes[at..].starts_with(b"\xE2\x80\xA9")
                    {
                        self.pos = at;
                        return;
                    }
                    search = at + 1;
                }
                None => {
                    self.pos = self.bytes.len();
                    return;
                }
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), Error> {
        let start = self.pos;
        let mut search = self.pos + 2;
        while let Some(i) = memchr(b'*', &self.bytes[search..]) {
            let at = search + i;
            if self.bytes.get(at + 1) == Some(&b'/') {
                self.pos = at + 2;
                return Ok(());
            }
            search = at + 1;
        }
        Err(self.err("unterminated comment".to_string(), start))
    }

    fn char_at(&self, offset: usize) -> char {
        self.input[offset..].chars().next().unwrap_or('\u{FFFD}')
    }

    fn err(&self, message: String, offset: usize) -> Error {
        Error::syntax(message, self.input, offset)
    }

    fn invalid_char(&self, offset: usize, context: &str) -> Error {
        let c = self.char_at(offset);
        self.err(
            format!("invalid character '{}' {context}", c.escape_default()),
            offset,
        )
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c == '\u{200C}' || c == '\u{200D}' || c.is_alphanumeric()
}

fn is_json5_space(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}'
            | '\u{FEFF}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Vec<EventKind> {
        let mut scanner = Scanner::new(input, DecodeOptions::default());
        let mut out = Vec::new();
        loop {
            let event = scanner.next_event().unwrap();
            let done = event.kind == EventKind::Eof;
            out.push(event.kind);
            if done {
                return out;
            }
        }
    }

    fn scan_error(input: &str) -> Error {
        scan_error_with(input, DecodeOptions::default())
    }

    fn scan_error_with(input: &str, options: DecodeOptions) -> Error {
        let mut scanner = Scanner::new(input, options);
        loop {
            match scanner.next_event() {
                Ok(event) if event.kind == EventKind::Eof => {
                    panic!("expected an error for {input:?}")
                }
                Ok(_) => {}
                Err(err) => return err,
            }
        }
    }

    #[rstest::rstest]
    fn test_flat_object_events() {
        assert_eq!(
            events("{a: 1, 'b': true, \"c\": null}"),
            [
                EventKind::ObjectBegin,
                EventKind::Key("a".to_string()),
                EventKind::Number("1".parse().unwrap()),
                EventKind::Key("b".to_string()),
                EventKind::Bool(true),
                EventKind::Key("c".to_string()),
                EventKind::Null,
                EventKind::ObjectEnd,
                EventKind::Eof,
            ]
        );
    }

    #[rstest::rstest]
    fn test_nested_array_events() {
        assert_eq!(
            events("[[], [1,]]"),
            [
                EventKind::ArrayBegin,
                EventKind::ArrayBegin,
                EventKind::ArrayEnd,
                EventKind::ArrayBegin,
                EventKind::Number("1".parse().unwrap()),
                EventKind::ArrayEnd,
                EventKind::ArrayEnd,
                EventKind::Eof,
            ]
        );
    }

    #[rstest::rstest]
    #[case("// line\n1", 1)]
    #[case("/* block */ 1", 1)]
    #[case("1 // trailing", 1)]
    #[case("/**//**/1/**/", 1)]
    #[case("\u{FEFF}\u{00A0}\u{2028}1", 1)]
    #[case("\x0b\x0c 1", 1)]
    fn test_trivia_is_skipped(#[case] input: &str, #[case] expected: i64) {
        let kinds = events(input);
        assert_eq!(kinds[0], EventKind::Number(expected.into()));
    }

    #[rstest::rstest]
    #[case("'a\\nb'", "a\nb")]
    #[case("'\\x41'", "A")]
    #[case("'\\u0041'", "A")]
    #[case("'\\uD83D\\uDE00'", "😀")]
    #[case("'\\uD800'", "\u{FFFD}")]
    #[case("'\\uDC00x'", "\u{FFFD}x")]
    #[case("'\\uD800\\u0041'", "\u{FFFD}A")]
    #[case("'a\\\nb'", "ab")]
    #[case("'a\\\r\nb'", "ab")]
    #[case("'a\\\u{2028}b'", "ab")]
    #[case("'\\q'", "q")]
    #[case("'\\0'", "\0")]
    #[case("'\\v\\b\\f'", "\u{000B}\u{0008}\u{000C}")]
    #[case("\"it's\"", "it's")]
    #[case("'say \\'hi\\''", "say 'hi'")]
    fn test_string_decoding(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(events(input)[0], EventKind::String(expected.to_string()));
    }

    #[rstest::rstest]
    fn test_raw_newline_in_string() {
        let err = scan_error("{a:'x\n'}");
        assert_eq!(err.to_string(), "invalid character '\\n' in string literal");
        let loc = err.location.unwrap();
        assert_eq!((loc.offset, loc.line, loc.column), (5, 1, 6));
    }

    #[rstest::rstest]
    fn test_unterminated_comment_points_at_start() {
        let err = scan_error("{} /* never closed");
        assert_eq!(err.to_string(), "unterminated comment");
        assert_eq!(err.location.unwrap().offset, 3);
    }

    #[rstest::rstest]
    fn test_value_after_top_level() {
        let err = scan_error("null []");
        assert_eq!(
            err.to_string(),
            "invalid character '[' after top-level value"
        );
        assert_eq!(err.location.unwrap().offset, 5);
    }

    #[rstest::rstest]
    fn test_bad_numeric_literal() {
        let err = scan_error("[01]");
        assert_eq!(err.to_string(), "invalid numeric literal \"01\"");
        assert_eq!(err.location.unwrap().offset, 1);
    }

    #[rstest::rstest]
    fn test_truncated_object() {
        let err = scan_error("{a:");
        assert_eq!(err.to_string(), "unexpected end of input");
        let loc = err.location.unwrap();
        assert_eq!((loc.offset, loc.column), (3, 4));
    }

    #[rstest::rstest]
    #[case("{a 1}", "invalid character '1' after object key")]
    #[case("{a:1 b:2}", "invalid character 'b' after object key:value pair")]
    #[case("[1 2]", "invalid character '2' after array element")]
    #[case("{!}", "invalid character '!' looking for beginning of object key")]
    #[case("!", "invalid character '!' looking for beginning of value")]
    #[case("[,]", "invalid character ',' looking for beginning of value")]
    #[case("{a:}", "invalid character '}' looking for beginning of value")]
    fn test_structural_errors(#[case] input: &str, #[case] message: &str) {
        assert_eq!(scan_error(input).to_string(), message);
    }

    #[rstest::rstest]
    fn test_unknown_keyword() {
        let err = scan_error("[truthy]");
        assert_eq!(err.to_string(), "unexpected token 'truthy'");
        assert_eq!(err.location.unwrap().offset, 1);
    }

    #[rstest::rstest]
    fn test_depth_limit() {
        let input = "[".repeat(10);
        let err = scan_error_with(&input, DecodeOptions::new().max_depth(4));
        assert_eq!(err.to_string(), "exceeded maximum nesting depth");
        assert_eq!(err.location.unwrap().offset, 4);
    }

    #[rstest::rstest]
    #[case("[1,]", "trailing comma not allowed here")]
    #[case("{\"a\":1,}", "trailing comma not allowed here")]
    #[case("// c\n1", "invalid character '/' looking for beginning of value")]
    #[case("'a'", "invalid character '\\'' looking for beginning of value")]
    #[case("{a:1}", "invalid character 'a' looking for beginning of object key")]
    #[case("+1", "invalid character '+' looking for beginning of value")]
    #[case(".5", "invalid character '.' looking for beginning of value")]
    #[case("NaN", "unexpected token 'NaN'")]
    #[case("0x1", "invalid numeric literal \"0x1\"")]
    #[case("\"a\\v\"", "invalid character 'v' in string escape code")]
    fn test_strict_mode_rejections(#[case] input: &str, #[case] message: &str) {
        let err = scan_error_with(input, DecodeOptions::new().strict(true));
        assert_eq!(err.to_string(), message);
    }

    #[rstest::rstest]
    fn test_strict_trailing_comma_offset_is_the_comma() {
        let err = scan_error_with("[1 ,  ]", DecodeOptions::new().strict(true));
        assert_eq!(err.location.unwrap().offset, 3);
    }

    #[rstest::rstest]
    fn test_strict_accepts_plain_json() {
        let mut scanner =
            Scanner::new("{\"a\": [1, 2.5e1], \"b\": null}", DecodeOptions::new().strict(true));
        loop {
            let event = scanner.next_event().unwrap();
            if event.kind == EventKind::Eof {
                break;
            }
        }
    }

    #[rstest::rstest]
    fn test_line_comment_ends_at_paragraph_separator() {
        assert_eq!(
            events("[1, // c\u{2029}2]"),
            [
                EventKind::ArrayBegin,
                EventKind::Number("1".parse().unwrap()),
                EventKind::Number("2".parse().unwrap()),
                EventKind::ArrayEnd,
                EventKind::Eof,
            ]
        );
    }

    #[rstest::rstest]
    fn test_signed_specials_scan_as_numbers() {
        assert_eq!(
            events("[-Infinity, NaN, +0xA]"),
            [
                EventKind::ArrayBegin,
                EventKind::Number("-Infinity".parse().unwrap()),
                EventKind::Number("NaN".parse().unwrap()),
                EventKind::Number("+0xA".parse().unwrap()),
                EventKind::ArrayEnd,
                EventKind::Eof,
            ]
        );
    }

    #[rstest::rstest]
    fn test_signed_nan_is_rejected() {
        let err = scan_error("[+NaN]");
        assert_eq!(err.to_string(), "invalid numeric literal \"+NaN\"");
    }

    #[rstest::rstest]
    fn test_peek_does_not_consume() {
        let mut scanner = Scanner::new("[]", DecodeOptions::default());
        assert_eq!(scanner.peek().unwrap().kind, EventKind::ArrayBegin);
        assert_eq!(scanner.next_event().unwrap().kind, EventKind::ArrayBegin);
        assert_eq!(scanner.peek().unwrap().kind, EventKind::ArrayEnd);
        assert_eq!(scanner.next_event().unwrap().kind, EventKind::ArrayEnd);
    }
}
