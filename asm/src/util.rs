use arch8::{Inst, Operand, Word};
use color_print::cformat;

use crate::codegen::encode;
use crate::lexer::{split_comment, tokenize};
use crate::parser::parse;

fn cformat_word(word: Word) -> String {
    let Some(inst) = Inst::by_opcode(word.opcode) else {
        return cformat!("<r,s>???</>");
    };
    let operands: Vec<String> = inst
        .operands
        .iter()
        .map(|op| match op {
            Operand::Literal => cformat!("<y>{}</>", word.literal),
            Operand::Reg(reg) => cformat!("<b>{}</>", reg),
        })
        .collect();
    cformat!("<r>{:<5}</>{}", inst.mnemonic, operands.join(", "))
}

/// Listing of a source file: instruction index, word bytes, row, code.
pub fn dump_lines(path: &str, source: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "{}+------[{}]{}",
        "-".repeat(14),
        path,
        "-".repeat(45usize.saturating_sub(path.chars().count()))
    )];
    let mut index: u32 = 0;

    for (idx, raw) in source.lines().enumerate() {
        let row = idx + 1;
        let comment = split_comment(raw)
            .1
            .map(|s| format!(";{}", s))
            .unwrap_or_default();

        let body = match parse(&tokenize(raw, row)) {
            Ok(None) => format!("{:14}| {:>4}: {}", "", row, comment),
            Ok(Some(operation)) => match encode(&operation) {
                Ok(word) => {
                    let line = format!(
                        "[{:04X}] {:02X} {:02X} | {:>4}:   {} {}",
                        index,
                        word.opcode,
                        word.literal,
                        row,
                        cformat_word(word),
                        comment
                    );
                    index += 1;
                    line
                }
                Err(_) => cformat!("[????] <r,s>!! !!</> | {:>4}:   {}", row, raw),
            },
            Err(_) => cformat!("[????] <r,s>!! !!</> | {:>4}:   {}", row, raw),
        };
        lines.push(body);
    }
    lines.push(format!("{}+{}", "-".repeat(14), "-".repeat(53)));
    lines
}

pub fn print_dump(path: &str, source: &str) {
    for line in dump_lines(path, source) {
        println!("{}", line);
    }
}
