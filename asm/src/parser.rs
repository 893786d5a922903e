use crate::error::{Error, GrammarFault, Result};
use crate::token::{Token, TokenKind};

// ----------------------------------------------------------------------------
// Operation

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Mnemonic,
}

/// A grammatically valid line. For `Mnemonic` the first token is the
/// mnemonic and the rest are operands; separators are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub tokens: Vec<Token>,
}

impl Operation {
    pub fn mnemonic(&self) -> &Token {
        &self.tokens[0]
    }

    pub fn operands(&self) -> &[Token] {
        &self.tokens[1..]
    }
}

// ----------------------------------------------------------------------------
// Parser

/// Check the shape of one line of tokens. A blank line has no operation.
pub fn parse(tokens: &[Token]) -> Result<Option<Operation>> {
    let Some((head, rest)) = tokens.split_first() else {
        return Ok(None);
    };

    // The first token decides the operation kind
    let kind = match head.kind {
        TokenKind::Ident => OperationKind::Mnemonic,
        _ => return Err(Error::grammar(GrammarFault::InvalidOperation, head)),
    };

    let mut operation = Operation {
        kind,
        tokens: vec![head.clone()],
    };

    match operation.kind {
        OperationKind::Mnemonic => {
            for (idx, token) in rest.iter().enumerate() {
                let next = rest.get(idx + 1);
                match (token.kind, next) {
                    (TokenKind::Invalid, _) => {
                        return Err(Error::grammar(GrammarFault::InvalidSyntax, token))
                    }
                    (_, Some(next)) if next.kind == TokenKind::Invalid => {
                        return Err(Error::grammar(GrammarFault::InvalidSyntax, next))
                    }
                    _ => {}
                }
                match token.kind {
                    TokenKind::Ident | TokenKind::Literal => match next {
                        None => operation.tokens.push(token.clone()),
                        Some(next) if next.kind == TokenKind::Separator => {
                            operation.tokens.push(token.clone())
                        }
                        Some(next) => {
                            return Err(Error::grammar(GrammarFault::ExpectedSeparator, next))
                        }
                    },
                    TokenKind::Separator => match next {
                        None => return Err(Error::grammar(GrammarFault::ExpectedArgument, token)),
                        Some(next) if next.arg().is_some() => {}
                        Some(next) => {
                            return Err(Error::grammar(GrammarFault::InvalidArgument, next))
                        }
                    },
                    TokenKind::Invalid => {}
                }
            }
        }
    }

    Ok(Some(operation))
}
