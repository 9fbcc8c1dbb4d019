//! Minimal XML scanner for the catalog dialect.
//!
//! This scanner is a small, deterministic tokenizer covering exactly the
//! subset the `.ts` format uses:
//!
//! - declaration (`<?xml ...?>`), DOCTYPE, and comments, all skipped
//! - start/end/empty tags with double- or single-quoted attributes
//! - character data with the five predefined entities plus decimal and
//!   hexadecimal character references
//!
//! It is not a general XML parser: namespaces, CDATA, and internal DTD
//! subsets are out of scope for the dialect.

use std::fmt;

/// A structural error in the markup, with the line it was detected on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    /// 1-based line number.
    pub line: u32,
    /// Human-readable description.
    pub message: String,
}

impl XmlError {
    pub(crate) fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for XmlError {}

/// One markup token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    /// A start tag, possibly self-closing (`<location .../>`)
    Open {
        /// Element name.
        name: String,
        /// Attributes in document order, values entity-decoded.
        attrs: Vec<(String, String)>,
        /// `true` for `<name/>` forms.
        self_closing: bool,
    },
    /// An end tag.
    Close(String),
    /// A run of character data between tags, entity-decoded. Whitespace is
    /// preserved; callers decide what is significant.
    Text(String),
}

/// Tokenizer state over a complete document held in memory.
#[derive(Debug)]
pub struct XmlScanner<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    token_line: u32,
}

impl<'a> XmlScanner<'a> {
    /// Create a scanner at the start of `input`. A leading UTF-8 BOM is
    /// tolerated and skipped.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            input,
            pos: 0,
            line: 1,
            token_line: 1,
        }
    }

    /// Line on which the most recently returned token started.
    #[must_use]
    pub fn token_line(&self) -> u32 {
        self.token_line
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<XmlToken>, XmlError> {
        loop {
            if self.pos >= self.input.len() {
                return Ok(None);
            }
            self.token_line = self.line;
            if self.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if self.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else if self.starts_with("<!") {
                self.skip_past(">", "doctype declaration")?;
            } else if self.starts_with("</") {
                return self.read_close_tag().map(Some);
            } else if self.starts_with("<") {
                return self.read_open_tag().map(Some);
            } else {
                return self.read_text().map(Some);
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    // Advance by `n` bytes, keeping the line counter in step.
    fn bump(&mut self, n: usize) {
        let consumed = &self.input[self.pos..self.pos + n];
        self.line += consumed.bytes().filter(|&b| b == b'\n').count() as u32;
        self.pos += n;
    }

    fn skip_past(&mut self, terminator: &str, what: &str) -> Result<(), XmlError> {
        match self.rest().find(terminator) {
            Some(at) => {
                self.bump(at + terminator.len());
                Ok(())
            }
            None => Err(XmlError::new(
                self.token_line,
                format!("unterminated {what}"),
            )),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.bump(1);
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), XmlError> {
        if self.peek() == Some(byte) {
            self.bump(1);
            Ok(())
        } else {
            Err(XmlError::new(
                self.line,
                format!("expected '{}'", byte as char),
            ))
        }
    }

    fn read_name(&mut self) -> Result<String, XmlError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b':')
        ) {
            self.bump(1);
        }
        if self.pos == start {
            return Err(XmlError::new(self.line, "expected a name"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn read_close_tag(&mut self) -> Result<XmlToken, XmlError> {
        self.bump(2);
        let name = self.read_name()?;
        self.skip_whitespace();
        self.expect(b'>')?;
        Ok(XmlToken::Close(name))
    }

    fn read_open_tag(&mut self) -> Result<XmlToken, XmlError> {
        self.bump(1);
        let name = self.read_name()?;
        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'>') => {
                    self.bump(1);
                    return Ok(XmlToken::Open {
                        name,
                        attrs,
                        self_closing: false,
                    });
                }
                Some(b'/') => {
                    self.bump(1);
                    self.expect(b'>')?;
                    return Ok(XmlToken::Open {
                        name,
                        attrs,
                        self_closing: true,
                    });
                }
                Some(_) => {
                    let key = self.read_name()?;
                    self.skip_whitespace();
                    self.expect(b'=')?;
                    self.skip_whitespace();
                    let value = self.read_quoted_value()?;
                    attrs.push((key, value));
                }
                None => {
                    return Err(XmlError::new(
                        self.token_line,
                        format!("unterminated <{name}> tag"),
                    ));
                }
            }
        }
    }

    fn read_quoted_value(&mut self) -> Result<String, XmlError> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(XmlError::new(self.line, "expected a quoted value")),
        };
        self.bump(1);
        let value_line = self.line;
        match self.rest().find(quote as char) {
            Some(at) => {
                let raw = &self.rest()[..at];
                let decoded = decode_entities(raw, value_line)?;
                self.bump(at + 1);
                Ok(decoded)
            }
            None => Err(XmlError::new(value_line, "unterminated attribute value")),
        }
    }

    fn read_text(&mut self) -> Result<XmlToken, XmlError> {
        let end = self.rest().find('<').unwrap_or(self.rest().len());
        let raw = &self.rest()[..end];
        let decoded = decode_entities(raw, self.token_line)?;
        self.bump(end);
        Ok(XmlToken::Text(decoded))
    }
}

/// Decode the predefined entities and numeric character references in `raw`.
///
/// `base_line` is the line on which `raw` starts; errors are reported
/// relative to it.
pub fn decode_entities(raw: &str, base_line: u32) -> Result<String, XmlError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut line = base_line;
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        let before = &rest[..amp];
        line += before.bytes().filter(|&b| b == b'\n').count() as u32;
        out.push_str(before);
        rest = &rest[amp..];
        let semi = rest
            .find(';')
            .ok_or_else(|| XmlError::new(line, "unterminated entity reference"))?;
        let entity = &rest[1..semi];
        match entity {
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "amp" => out.push('&'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                let code = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(str::parse))
                    .ok_or_else(|| XmlError::new(line, format!("unknown entity &{entity};")))?;
                let ch = code
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        XmlError::new(line, format!("invalid character reference &{entity};"))
                    })?;
                out.push(ch);
            }
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
