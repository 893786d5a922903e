use std::io::{BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codegen::decode_word;
use crate::error::{Error, RecordFault, Result};
use crate::output::Output;
use crate::record::{Bank, HexRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisasmOptions {
    /// Append `;Address:0xXXXX` to every line.
    pub show_address: bool,
    /// Column where the address comment starts.
    pub padding: usize,
}

impl Default for DisasmOptions {
    fn default() -> Self {
        DisasmOptions {
            show_address: false,
            padding: 35,
        }
    }
}

impl DisasmOptions {
    fn line(&self, asm: &str, index: u32) -> String {
        if self.show_address {
            format!("{:<pad$};Address:0x{:04X}", asm, index, pad = self.padding)
        } else {
            asm.to_string()
        }
    }
}

/// Turn an image back into assembly, one instruction per line.
///
/// The image must open with the bank 0 selector and close with EOF; anything
/// after EOF is ignored.
pub fn disassemble_to<R: BufRead, W: Write>(input: R, mut out: W, opts: &DisasmOptions) -> Result<W> {
    let mut bank = Bank::Zero;
    let mut last = None;

    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let row = idx + 1;
        let fail = |fault| Error::record(fault, row, &line);

        let record = HexRecord::decode(&line).ok_or_else(|| fail(RecordFault::InvalidRecord))?;
        if row == 1 {
            if record.selected_bank() != Some(Bank::Zero) {
                return Err(fail(RecordFault::StartMissing));
            }
        } else if record.selected_bank() == Some(Bank::One) {
            bank = Bank::One;
        } else if record.is_eof() {
            out.flush()?;
            return Ok(out);
        } else {
            let words = record.words().ok_or_else(|| fail(RecordFault::InvalidRecord))?;
            let first = record.first_index(bank);
            for (offset, word) in words.into_iter().enumerate() {
                let asm = decode_word(word).ok_or_else(|| fail(RecordFault::UnknownInstruction))?;
                writeln!(out, "{}", opts.line(&asm, first + offset as u32))?;
            }
        }
        last = Some((row, line));
    }

    Err(match last {
        Some((row, line)) => Error::record(RecordFault::EofMissing, row, &line),
        None => Error::record(RecordFault::StartMissing, 1, ""),
    })
}

/// In-memory disassembly of image text.
pub fn disassemble_str(image: &str, opts: &DisasmOptions) -> Result<String> {
    let text = disassemble_to(image.as_bytes(), Vec::new(), opts)?;
    Ok(String::from_utf8_lossy(&text).into_owned())
}

/// Disassemble the image at `image` into a new source file at `dest`.
/// On any failure `dest` is left absent.
pub fn disassemble(image: &Path, dest: &Path, show_address: bool, padding: usize) -> Result<()> {
    let opts = DisasmOptions {
        show_address,
        padding,
    };
    let text = std::fs::read_to_string(image).map_err(|err| Error::from_io(image, err))?;
    let mut out = Output::create(dest)?;
    disassemble_to(text.as_bytes(), &mut out, &opts).map_err(|err| err.at(dest))?;
    out.commit()
}
