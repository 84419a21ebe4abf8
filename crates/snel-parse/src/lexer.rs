//! Terminal scanners used by the grammar engine.
//!
//! The engine is scannerless: each terminal is tried at the position the
//! grammar asks for, after skipping whitespace. Every scanner returns the
//! end offset of its match, or `None`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Identifier,
    /// `-?[0-9]+`
    Int,
    /// `-?[0-9]+(\.[0-9]+)?`
    Float,
    /// `"..."` on a single line
    Str,
    /// `'x'`
    Char,
}

impl Lexeme {
    pub fn describe(self) -> &'static str {
        match self {
            Lexeme::Identifier => "identifier",
            Lexeme::Int => "integer",
            Lexeme::Float => "decimal",
            Lexeme::Str => "string",
            Lexeme::Char => "character",
        }
    }
}

pub struct Lexer<'a> {
    src: &'a str,
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn peek(&self, pos: usize) -> Option<u8> {
        self.bytes().get(pos).copied()
    }

    pub fn skip_ws(&self, mut pos: usize) -> usize {
        while matches!(self.peek(pos), Some(b) if b.is_ascii_whitespace()) {
            pos += 1;
        }
        pos
    }

    fn digits(&self, mut pos: usize) -> usize {
        while matches!(self.peek(pos), Some(b) if b.is_ascii_digit()) {
            pos += 1;
        }
        pos
    }

    /// Keywords match whole words only, so `fnord` is not `fn`.
    pub fn keyword(&self, pos: usize, kw: &str) -> Option<usize> {
        let mut end = pos;
        while matches!(self.peek(end), Some(b) if is_word(b)) {
            end += 1;
        }
        (end > pos && &self.src[pos..end] == kw).then_some(end)
    }

    pub fn token(&self, pos: usize, tok: &str) -> Option<usize> {
        self.src[pos..].starts_with(tok).then(|| pos + tok.len())
    }

    pub fn lexeme(&self, pos: usize, kind: Lexeme) -> Option<usize> {
        match kind {
            Lexeme::Identifier => self.identifier(pos),
            Lexeme::Int => self.int(pos),
            Lexeme::Float => self.float(pos),
            Lexeme::Str => self.string(pos),
            Lexeme::Char => self.char_lit(pos),
        }
    }

    fn identifier(&self, pos: usize) -> Option<usize> {
        let first = self.peek(pos)?;
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return None;
        }
        let mut end = pos + 1;
        while matches!(self.peek(end), Some(b) if is_word(b)) {
            end += 1;
        }
        Some(end)
    }

    fn int(&self, pos: usize) -> Option<usize> {
        let start = if self.peek(pos) == Some(b'-') {
            pos + 1
        } else {
            pos
        };
        let end = self.digits(start);
        (end > start).then_some(end)
    }

    fn float(&self, pos: usize) -> Option<usize> {
        let end = self.int(pos)?;
        if self.peek(end) == Some(b'.') {
            let frac = self.digits(end + 1);
            if frac > end + 1 {
                return Some(frac);
            }
        }
        Some(end)
    }

    fn string(&self, pos: usize) -> Option<usize> {
        if self.peek(pos) != Some(b'"') {
            return None;
        }
        let mut end = pos + 1;
        loop {
            match self.peek(end)? {
                b'"' => return Some(end + 1),
                b'\n' => return None,
                _ => end += 1,
            }
        }
    }

    fn char_lit(&self, pos: usize) -> Option<usize> {
        if self.peek(pos) != Some(b'\'') {
            return None;
        }
        let c = self.src[pos + 1..].chars().next()?;
        if c == '\n' {
            return None;
        }
        let close = pos + 1 + c.len_utf8();
        (self.peek(close) == Some(b'\'')).then_some(close + 1)
    }
}
