use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reg::Reg;

/// One operand slot of an instruction definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    /// Wildcard filled by a decimal literal `0..=255`.
    Literal,
    Reg(Reg),
}

/// How the lexer classified an operand. Only the two kinds that can reach
/// an operand slot are distinguished here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg {
    Ident,
    Literal,
}

impl Operand {
    pub fn accepts(&self, arg: Arg, text: &str) -> bool {
        match (self, arg) {
            (Operand::Literal, Arg::Literal) => true,
            (Operand::Reg(reg), Arg::Ident) => Reg::parse(text) == Ok(*reg),
            _ => false,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Operand::Literal)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal => write!(f, "*"),
            Operand::Reg(reg) => write!(f, "{}", reg),
        }
    }
}

#[test]
fn test() {
    assert!(Operand::Literal.accepts(Arg::Literal, "12"));
    assert!(!Operand::Literal.accepts(Arg::Ident, "a"));
    assert!(Operand::Reg(Reg::A).accepts(Arg::Ident, "a"));
    assert!(!Operand::Reg(Reg::A).accepts(Arg::Ident, "b"));
    assert!(!Operand::Reg(Reg::A).accepts(Arg::Literal, "0"));
    assert_eq!(Operand::Literal.to_string(), "*");
    assert_eq!(Operand::Reg(Reg::Result).to_string(), "result");
}
