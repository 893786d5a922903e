use arch8::{Inst, Operand, Word};

use crate::error::{Error, ResolveFault, Result};
use crate::parser::Operation;
use crate::token::{Token, TokenKind};

/// A definition still in the running, with the operand slots it has left.
/// Built fresh for every line.
struct Candidate {
    inst: &'static Inst,
    free: Vec<Operand>,
}

impl Candidate {
    fn new(inst: &'static Inst) -> Self {
        Candidate {
            inst,
            free: inst.operands.clone(),
        }
    }

    /// Match the `idx`-th operand token against this definition.
    fn take(&mut self, idx: usize, token: &Token) -> bool {
        let Some(arg) = token.arg() else {
            return false;
        };
        if self.inst.interchangeable {
            match self.free.iter().position(|op| op.accepts(arg, &token.text)) {
                Some(slot) => {
                    self.free.remove(slot);
                    true
                }
                None => false,
            }
        } else {
            self.inst
                .operands
                .get(idx)
                .is_some_and(|op| op.accepts(arg, &token.text))
        }
    }
}

/// Resolve an operation to its instruction word.
///
/// Candidates are narrowed in catalog order; if several survive every
/// filter, the first one is used without any diagnostic.
pub fn encode(operation: &Operation) -> Result<Word> {
    let mnemonic = operation.mnemonic();
    let args = operation.operands();

    // 1. Mnemonic
    let insts = Inst::by_mnemonic(&mnemonic.text);
    if insts.is_empty() {
        return Err(Error::resolve(ResolveFault::UnknownMnemonic, mnemonic));
    }

    // 2. Argument count over every definition of the mnemonic
    let counts = insts.iter().map(|inst| inst.operands.len());
    let max = counts.clone().max().unwrap_or(0);
    let min = counts.min().unwrap_or(0);
    if args.len() > max {
        return Err(Error::resolve(ResolveFault::TooManyArguments, mnemonic));
    }
    if args.len() < min {
        return Err(Error::resolve(ResolveFault::MissingArguments, mnemonic));
    }

    // 3. Definitions with exactly this many operands
    let mut candidates: Vec<Candidate> = insts
        .iter()
        .filter(|inst| inst.operands.len() == args.len())
        .map(|inst| Candidate::new(*inst))
        .collect();
    if candidates.is_empty() {
        return Err(Error::resolve(ResolveFault::ArgumentCount, mnemonic));
    }

    // 4. Literal value
    let literals: Vec<&Token> = args
        .iter()
        .filter(|arg| arg.kind == TokenKind::Literal)
        .collect();
    let literal = match literals.as_slice() {
        [] => 0,
        [lit] => lit
            .text
            .parse::<u8>()
            .map_err(|_| Error::resolve(ResolveFault::LiteralOverflow, lit))?,
        [.., last] => return Err(Error::resolve(ResolveFault::TooManyLiterals, last)),
    };

    // 5. Operands, left to right
    for (idx, arg) in args.iter().enumerate() {
        candidates.retain_mut(|candidate| candidate.take(idx, arg));
        if candidates.is_empty() {
            return Err(Error::resolve(ResolveFault::InvalidArgument, arg));
        }
    }

    // 6. First survivor wins
    match candidates.first() {
        Some(candidate) => Ok(Word::new(candidate.inst.opcode, literal)),
        None => Err(Error::resolve(ResolveFault::ArgumentCount, mnemonic)),
    }
}

/// Assembly text of an instruction word, or `None` for an undefined opcode.
pub fn decode(opcode: u8, literal: u8) -> Option<String> {
    Inst::by_opcode(opcode).map(|inst| inst.render(literal))
}

pub fn decode_word(word: Word) -> Option<String> {
    decode(word.opcode, word.literal)
}
