// token.rs

use arch8::Arg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: String, pos: Pos) -> Self {
        Token { kind, text, pos }
    }

    /// Operand view of the token, if it can fill an operand slot at all.
    pub fn arg(&self) -> Option<Arg> {
        match self.kind {
            TokenKind::Ident => Some(Arg::Ident),
            TokenKind::Literal => Some(Arg::Literal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,     // [A-Za-z_]+
    Literal,   // [0-9]+
    Separator, // ','
    Invalid,   // anything else, one character
}

/// Location of a token, kept only for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pos {
    /// 1-based source line.
    pub row: usize,
    /// 1-based character offset.
    pub col: usize,
    /// The source line with its comment stripped.
    pub line: String,
}
