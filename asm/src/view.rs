use std::io::BufRead;
use std::path::Path;

use arch8::Word;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::codegen::decode_word;
use crate::error::{Error, Result, ViewFault};
use crate::record::{Bank, HexRecord};

/// How `view` renders each instruction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    #[strum(to_string = "assembly", serialize = "a")]
    #[serde(alias = "a")]
    Assembly,
    #[strum(to_string = "hex", serialize = "h")]
    #[serde(alias = "h")]
    Hex,
    #[strum(to_string = "binary", serialize = "b")]
    #[serde(alias = "b")]
    Binary,
    #[strum(to_string = "decimal", serialize = "d")]
    #[serde(alias = "d")]
    Decimal,
}

impl Format {
    /// `None` only for an undefined opcode in assembly format.
    pub fn render(self, word: Word) -> Option<String> {
        let Word { opcode, literal } = word;
        match self {
            Format::Assembly => decode_word(word),
            Format::Hex => Some(format!("Opcode: 0x{:02X}, Literal: 0x{:02X}", opcode, literal)),
            Format::Binary => Some(format!("Opcode: 0b{:08b}, Literal: 0b{:08b}", opcode, literal)),
            Format::Decimal => Some(format!("Opcode: {:03}, Literal: {:03}", opcode, literal)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub format: Format,
}

/// Instructions at indexes `start..end` of an image.
///
/// Without an end, or with `end <= start`, only `start` is returned.
/// Lines that are not valid records are skipped; bank selectors move the
/// following records into their bank.
pub fn view_from<R: BufRead>(input: R, start: u32, end: Option<u32>, format: Format) -> Result<Vec<String>> {
    let end = end.filter(|end| *end > start).unwrap_or(start.saturating_add(1));
    let mut cursor = start;
    let mut bank = Bank::Zero;
    let mut found = Vec::new();

    for line in input.lines() {
        let line = line?;
        let Some(record) = HexRecord::decode(&line) else {
            continue;
        };
        if let Some(selected) = record.selected_bank() {
            bank = selected;
            continue;
        }
        let Some(words) = record.words() else {
            continue;
        };

        let first = record.first_index(bank);
        let last = first + words.len() as u32;
        while (first..last).contains(&cursor) {
            let word = words[(cursor - first) as usize];
            let text = format
                .render(word)
                .ok_or_else(|| Error::view(ViewFault::UnknownOpcode, cursor))?;
            found.push(text);
            cursor += 1;
            if cursor >= end {
                return Ok(found);
            }
        }
    }

    Err(Error::view(ViewFault::MissingRecords, cursor))
}

pub fn view_str(image: &str, start: u32, end: Option<u32>, format: Format) -> Result<Vec<String>> {
    view_from(image.as_bytes(), start, end, format)
}

/// Read instructions out of the image file at `image`. Never writes anything.
pub fn view(image: &Path, start: u32, end: Option<u32>, format: Format) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(image).map_err(|err| Error::from_io(image, err))?;
    view_str(&text, start, end, format)
}
