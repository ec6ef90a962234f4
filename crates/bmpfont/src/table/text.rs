//! Canonical text table
//!
//! ```text
//! lineHeight: 16
//! glyphs: [
//!   [0xff, 0x81, ...],
//!   [],
//! ]
//! widths: [
//!   8, 0, ...
//! ]
//! advances: [
//!   10, 4, ...
//! ]
//! ```
//!
//! Width and advance lists break every 32 entries. Line breaks, trailing
//! commas and `//` comments carry no meaning to the parser.

use std::fmt::Write;

use super::PackedFont;
use crate::{BmpFontError, Result};

/// Entries per line in the width and advance sections
const WRAP: usize = 32;

pub(super) fn write(font: &PackedFont) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "lineHeight: {}", font.line_height);

    out.push_str("glyphs: [\n");
    for bytes in &font.glyphs {
        out.push_str("  [");
        for (i, b) in bytes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "0x{b:x}");
        }
        out.push_str("],\n");
    }
    out.push_str("]\n");

    write_list(&mut out, "widths", &font.widths);
    write_list(&mut out, "advances", &font.advances);
    out
}

fn write_list(out: &mut String, name: &str, values: &[u32]) {
    let _ = writeln!(out, "{name}: [");
    for line in values.chunks(WRAP) {
        out.push_str("  ");
        for (i, v) in line.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{v},");
        }
        out.push('\n');
    }
    out.push_str("]\n");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Number(u64),
    Colon,
    Comma,
    Open,
    Close,
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else {
                return;
            }
        }
    }

    fn next(&mut self) -> Result<Option<Token<'a>>> {
        self.skip_trivia();
        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return Ok(None);
        };

        let single = match c {
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            '[' => Some(Token::Open),
            ']' => Some(Token::Close),
            _ => None,
        };
        if let Some(token) = single {
            self.pos += 1;
            return Ok(Some(token));
        }

        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error(&format!("unexpected character {c:?}")));
        }
        let word = &rest[..len];
        let start = self.pos;
        self.pos += len;

        if c.is_ascii_digit() {
            let value = match word.strip_prefix("0x").or_else(|| word.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => word.parse(),
            };
            return value
                .map(|v| Some(Token::Number(v)))
                .map_err(|_| self.error_at(start, &format!("bad number '{word}'")));
        }
        Ok(Some(Token::Ident(word)))
    }

    fn error(&self, msg: &str) -> BmpFontError {
        self.error_at(self.pos, msg)
    }

    fn error_at(&self, pos: usize, msg: &str) -> BmpFontError {
        let line = self.input[..pos].matches('\n').count() + 1;
        BmpFontError::TableParse(format!("line {line}: {msg}"))
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            peeked: None,
        }
    }

    fn peek(&mut self) -> Result<Option<Token<'a>>> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next()?;
        }
        Ok(self.peeked)
    }

    fn bump(&mut self) -> Result<Option<Token<'a>>> {
        let token = self.peek()?;
        self.peeked = None;
        Ok(token)
    }

    fn expect(&mut self, want: Token<'_>, what: &str) -> Result<()> {
        match self.bump()? {
            Some(got) if got == want => Ok(()),
            got => Err(self.lexer.error(&format!("expected {what}, found {got:?}"))),
        }
    }

    fn section(&mut self, name: &str) -> Result<()> {
        self.expect(Token::Ident(name), name)?;
        self.expect(Token::Colon, "':'")
    }

    fn number(&mut self) -> Result<u64> {
        match self.bump()? {
            Some(Token::Number(n)) => Ok(n),
            got => Err(self.lexer.error(&format!("expected number, found {got:?}"))),
        }
    }

    /// `[ item, item, ... ]` with an optional trailing comma
    fn list<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        self.expect(Token::Open, "'['")?;
        let mut items = Vec::new();
        loop {
            if self.peek()? == Some(Token::Close) {
                self.bump()?;
                return Ok(items);
            }
            items.push(item(self)?);
            match self.bump()? {
                Some(Token::Comma) => {}
                Some(Token::Close) => return Ok(items),
                got => return Err(self.lexer.error(&format!("expected ',' or ']', found {got:?}"))),
            }
        }
    }

    fn byte(&mut self) -> Result<u8> {
        let n = self.number()?;
        u8::try_from(n).map_err(|_| self.lexer.error(&format!("byte {n:#x} out of range")))
    }

    fn int(&mut self) -> Result<u32> {
        let n = self.number()?;
        u32::try_from(n).map_err(|_| self.lexer.error(&format!("value {n} out of range")))
    }
}

pub(super) fn parse(input: &str) -> Result<PackedFont> {
    let mut p = Parser::new(input);

    p.section("lineHeight")?;
    let line_height = p.int()?;

    p.section("glyphs")?;
    let glyphs = p.list(|p| p.list(Parser::byte))?;

    p.section("widths")?;
    let widths = p.list(Parser::int)?;

    p.section("advances")?;
    let advances = p.list(Parser::int)?;

    if let Some(token) = p.bump()? {
        return Err(p.lexer.error(&format!("trailing input {token:?}")));
    }

    Ok(PackedFont {
        line_height,
        glyphs,
        widths,
        advances,
    })
}
