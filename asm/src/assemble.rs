use std::io::Write;
use std::path::Path;

use arch8::Word;

use crate::codegen::encode;
use crate::error::{Error, ResolveFault, Result};
use crate::lexer::tokenize;
use crate::output::Output;
use crate::parser::parse;
use crate::record::{Bank, HexRecord};
use crate::token::Token;

/// Words per data record.
pub const RECORD_WORDS: usize = 8;
const RECORD_BYTES: u16 = (RECORD_WORDS * Word::SIZE) as u16;

/// Streams instruction words into an image, one data record per 8 words.
pub struct Assembler<W: Write> {
    out: W,
    pending: Vec<Word>,
    address: u16,
    bank: Bank,
}

impl<W: Write> Assembler<W> {
    /// Starts the image with the bank 0 selector.
    pub fn new(mut out: W) -> Result<Self> {
        out.write_all(HexRecord::bank(Bank::Zero).encode().as_bytes())?;
        Ok(Assembler {
            out,
            pending: Vec::with_capacity(RECORD_WORDS + 1),
            address: 0,
            bank: Bank::Zero,
        })
    }

    /// Index of the next instruction to be placed.
    pub fn index(&self) -> u32 {
        (self.bank.base() + u32::from(self.address)) / Word::SIZE as u32 + self.pending.len() as u32
    }

    /// Assemble one source line. Blank and comment-only lines give `None`.
    pub fn line(&mut self, raw: &str, row: usize) -> Result<Option<Word>> {
        let tokens = tokenize(raw, row);
        let Some(operation) = parse(&tokens)? else {
            return Ok(None);
        };
        let word = encode(&operation)?;
        self.push(word, operation.mnemonic())?;
        Ok(Some(word))
    }

    fn push(&mut self, word: Word, at: &Token) -> Result<()> {
        self.pending.push(word);
        if self.pending.len() < RECORD_WORDS {
            return Ok(());
        }
        let record = HexRecord::data(self.address, &self.pending);
        self.write(&record)?;
        self.pending.clear();

        match (self.address.checked_add(RECORD_BYTES), self.bank) {
            (Some(next), _) => self.address = next,
            (None, Bank::Zero) => {
                self.bank = Bank::One;
                self.address = 0;
                self.write(&HexRecord::bank(Bank::One))?;
            }
            (None, Bank::One) => return Err(Error::resolve(ResolveFault::InstructionLimit, at)),
        }
        Ok(())
    }

    fn write(&mut self, record: &HexRecord) -> Result<()> {
        self.out.write_all(record.encode().as_bytes())?;
        Ok(())
    }

    /// Append halt, flush the last data record and close with EOF.
    pub fn finish(mut self) -> Result<W> {
        self.pending.push(Word::HALT);
        let record = HexRecord::data(self.address, &self.pending);
        self.write(&record)?;
        self.write(&HexRecord::eof())?;
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Assemble every line of `source` into `out`.
pub fn assemble_to<W: Write>(source: &str, out: W) -> Result<W> {
    let mut asm = Assembler::new(out)?;
    for (idx, raw) in source.lines().enumerate() {
        asm.line(raw, idx + 1)?;
    }
    asm.finish()
}

/// In-memory assembly: source text in, image text out.
pub fn assemble_str(source: &str) -> Result<String> {
    let image = assemble_to(source, Vec::new())?;
    Ok(String::from_utf8_lossy(&image).into_owned())
}

/// Assemble the file at `source` into a new image at `dest`.
/// On any failure `dest` is left absent.
pub fn assemble(source: &Path, dest: &Path) -> Result<()> {
    let text = std::fs::read_to_string(source).map_err(|err| Error::from_io(source, err))?;
    let mut out = Output::create(dest)?;
    assemble_to(&text, &mut out).map_err(|err| err.at(dest))?;
    out.commit()
}
