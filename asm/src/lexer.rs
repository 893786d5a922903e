// lexer.rs

use crate::token::{Pos, Token, TokenKind};
use std::iter::{Enumerate, Peekable};
use std::str::CharIndices;

pub struct LineLexer<'a> {
    line: &'a str,
    iter: Peekable<Enumerate<CharIndices<'a>>>,
    row: usize,
}

impl<'a> LineLexer<'a> {
    pub fn new(raw: &'a str, row: usize) -> Self {
        let line = strip_comment(raw).trim_end_matches(&['\n', '\r'][..]);
        Self {
            line,
            iter: line.char_indices().enumerate().peekable(),
            row,
        }
    }

    pub fn parse(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }

    fn next_token(&mut self) -> Option<Token> {
        // 0. Skip whitespaces
        while self
            .iter
            .next_if(|(_, (_, ch))| ch.is_whitespace())
            .is_some()
        {}

        // 1. End of line
        let (idx, (start, c)) = self.iter.next()?;

        // 2. Identifier
        if c.is_ascii_alphabetic() || c == '_' {
            let end = self.take_while(start + c.len_utf8(), |ch| {
                ch.is_ascii_alphabetic() || ch == '_'
            });
            return self.token(TokenKind::Ident, start, end, idx);
        }

        // 3. Literal
        if c.is_ascii_digit() {
            let end = self.take_while(start + c.len_utf8(), |ch| ch.is_ascii_digit());
            return self.token(TokenKind::Literal, start, end, idx);
        }

        // 4. Separator
        if c == ',' {
            return self.token(TokenKind::Separator, start, start + 1, idx);
        }

        // 5. Anything else
        self.token(TokenKind::Invalid, start, start + c.len_utf8(), idx)
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, mut end: usize, pred: F) -> usize {
        while let Some((_, (ptr, ch))) = self.iter.next_if(|(_, (_, ch))| pred(*ch)) {
            end = ptr + ch.len_utf8();
        }
        end
    }

    fn token(&self, kind: TokenKind, start: usize, end: usize, idx: usize) -> Option<Token> {
        Some(Token::new(
            kind,
            self.line[start..end].to_string(),
            Pos {
                row: self.row,
                col: idx + 1,
                line: self.line.to_string(),
            },
        ))
    }
}

fn strip_comment(raw: &str) -> &str {
    split_comment(raw).0
}

/// Code part and comment text (after `;`) of a raw line.
pub fn split_comment(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(';') {
        Some((code, comment)) => (code, Some(comment.trim_end_matches(&['\n', '\r'][..]))),
        None => (raw, None),
    }
}

/// Tokens of one source line. Blank and comment-only lines give nothing.
pub fn tokenize(line: &str, row: usize) -> Vec<Token> {
    LineLexer::new(line, row).parse()
}
