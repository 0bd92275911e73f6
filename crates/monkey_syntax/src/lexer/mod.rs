#[cfg(test)]
mod tests;

use monkey_diagnostic::span::Span;

use crate::token::*;

/// On-demand tokenizer over a source string.
///
/// The lexer holds a one-byte cursor: `ch` is the byte at `position`, and
/// `read_position` is the offset of the next byte to read. Past the end of
/// input `ch` is `0`, which is only treated as end-of-input when the cursor
/// really is beyond the source, so a NUL byte inside the source is still
/// reported as illegal.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,

    position: usize,
    read_position: usize,
    ch: u8,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Self {
            source,

            position: 0,
            read_position: 0,
            ch: 0,
        };

        lexer.read_char();
        lexer
    }

    /// Returns the next token. Once the input is exhausted every call returns
    /// an `Eof` token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let ch = self.ch;

        let kind = match ch {
            0 if self.at_end() => return Token::eof(self.source.len()),

            b'=' if self.eat_peek(b'=') => TokenKind::Eq,
            b'=' => TokenKind::Assign,
            b'!' if self.eat_peek(b'=') => TokenKind::NotEq,
            b'!' => TokenKind::Bang,

            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,

            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,

            ch if is_letter(ch) => {
                self.read_while(is_letter);
                let kind = lookup_identifier(&self.source[start..self.position]);
                return self.token(kind, start);
            }

            ch if is_digit(ch) => {
                self.read_while(is_digit);
                return self.token(TokenKind::Int, start);
            }

            ch if !ch.is_ascii() => {
                // one ILLEGAL token per character rather than per byte, so the
                // literal stays valid UTF-8
                let len = self.source[start..].chars().next().map_or(1, char::len_utf8);
                for _ in 1..len {
                    self.read_char();
                }
                TokenKind::Illegal
            }

            _ => TokenKind::Illegal,
        };

        self.read_char();
        self.token(kind, start)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(
            kind,
            &self.source[start..self.position],
            Span::new(start, self.position),
        )
    }

    fn read_char(&mut self) {
        self.ch = self.peek_char();
        self.position = self.read_position.min(self.source.len());
        self.read_position = self.position + 1;
    }

    fn peek_char(&self) -> u8 {
        self.source
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0)
    }

    /// Consumes the byte after the current one if it is `expected`.
    fn eat_peek(&mut self, expected: u8) -> bool {
        if self.read_position < self.source.len() && self.peek_char() == expected {
            self.read_char();
            true
        } else {
            false
        }
    }

    fn read_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.at_end() && pred(self.ch) {
            self.read_char();
        }
    }

    fn skip_whitespace(&mut self) {
        self.read_while(|ch| matches!(ch, b' ' | b'\t' | b'\n' | b'\r'));
    }

    fn at_end(&self) -> bool {
        self.position >= self.source.len()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token before `Eof`.
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is(TokenKind::Eof)).then_some(token)
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}
