use std::io;
use std::path::{Path, PathBuf};

use color_print::cprintln;
use thiserror::Error;

use crate::token::Token;

/// Token sequence has the wrong shape.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarFault {
    #[error("Invalid syntax")]
    InvalidSyntax,

    #[error("Invalid operation")]
    InvalidOperation,

    #[error("Expected separator")]
    ExpectedSeparator,

    #[error("Expected argument")]
    ExpectedArgument,

    #[error("Invalid argument")]
    InvalidArgument,
}

/// Well-formed line that does not name a defined instruction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFault {
    #[error("Unknown mnemonic")]
    UnknownMnemonic,

    #[error("Too many arguments")]
    TooManyArguments,

    #[error("Missing arguments")]
    MissingArguments,

    #[error("Mnemonic doesn't match arguments")]
    ArgumentCount,

    #[error("Too many literals")]
    TooManyLiterals,

    #[error("Literal can't be more than 255")]
    LiteralOverflow,

    #[error("Invalid argument")]
    InvalidArgument,

    #[error("Instruction limit reached (64KB)")]
    InstructionLimit,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFault {
    #[error("Invalid record")]
    InvalidRecord,

    #[error("Record start missing")]
    StartMissing,

    #[error("EOF missing")]
    EofMissing,

    #[error("Record doesn't match any instructions")]
    UnknownInstruction,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFault {
    #[error("Missing records for the range")]
    MissingRecords,

    #[error("Opcode doesn't match any instructions")]
    UnknownOpcode,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{fault}: \"{}\"", .token.text)]
    Grammar { fault: GrammarFault, token: Token },

    #[error("{fault}: \"{}\"", .token.text)]
    Resolve { fault: ResolveFault, token: Token },

    #[error("{fault} -> {record}")]
    Record {
        fault: RecordFault,
        row: usize,
        record: String,
    },

    #[error("{fault} -> Address: {address}")]
    View { fault: ViewFault, address: u32 },

    #[error("No such file or directory: \"{}\"", .0.display())]
    NoSuchFile(PathBuf, #[source] io::Error),

    #[error("Invalid path: \"{}\"", .0.display())]
    InvalidPath(PathBuf, #[source] io::Error),

    #[error("Invalid config file: \"{}\"", .0.display())]
    Config(PathBuf, #[source] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn grammar(fault: GrammarFault, token: &Token) -> Self {
        Error::Grammar {
            fault,
            token: token.clone(),
        }
    }

    pub fn resolve(fault: ResolveFault, token: &Token) -> Self {
        Error::Resolve {
            fault,
            token: token.clone(),
        }
    }

    pub fn record(fault: RecordFault, row: usize, record: &str) -> Self {
        Error::Record {
            fault,
            row,
            record: record.trim_end_matches(&['\n', '\r'][..]).to_string(),
        }
    }

    pub fn view(fault: ViewFault, address: u32) -> Self {
        Error::View { fault, address }
    }

    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::NoSuchFile(path.to_path_buf(), err),
            _ => Error::InvalidPath(path.to_path_buf(), err),
        }
    }

    /// Attach a path to failures raised by a bare reader or writer.
    pub fn at(self, path: &Path) -> Self {
        match self {
            Error::Io(err) => Error::from_io(path, err),
            other => other,
        }
    }

    /// The source token the error points at, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Error::Grammar { token, .. } | Error::Resolve { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Plain text report, ready to be shown as is.
    pub fn render(&self, file: &Path) -> String {
        let file = file.display();
        let located = match self {
            Error::Grammar { fault, token } => Some((fault.to_string(), token)),
            Error::Resolve { fault, token } => Some((fault.to_string(), token)),
            _ => None,
        };
        if let Some((fault, token)) = located {
            let head = format!("{}: \"{}\" -> ", fault, token.text);
            let pad = head.chars().count() + token.pos.col - 1;
            return format!(
                "Error in file \"{}\", line: {}, column: {}\n{}{}\n{}^",
                file,
                token.pos.row,
                token.pos.col,
                head,
                token.pos.line,
                " ".repeat(pad)
            );
        }
        match self {
            Error::Record { row, .. } => {
                format!("Error in file \"{}\", line: {}\n{}", file, row, self)
            }
            Error::View { .. } => format!("Error in file \"{}\"\n{}", file, self),
            _ => self.to_string(),
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self);
        match self {
            Error::Grammar { token, .. } | Error::Resolve { token, .. } => {
                let (row, col) = (token.pos.row, token.pos.col);
                cprintln!("     <blue>--></> <underline>{}:{}:{}</>", file, row, col);
                cprintln!("      <blue>|</>");
                cprintln!(" <blue>{:>4} |</> {}", row, token.pos.line);
                cprintln!(
                    "      <blue>|</> {}<red,bold>{}</>",
                    " ".repeat(col - 1),
                    "^".repeat(token.text.chars().count().max(1))
                );
            }
            Error::Record { row, record, .. } => {
                cprintln!("     <blue>--></> <underline>{}:{}</>", file, row);
                cprintln!("      <blue>|</>");
                cprintln!(" <blue>{:>4} |</> {}", row, record);
                cprintln!("      <blue>|</>");
            }
            _ => cprintln!("     <blue>--></> <underline>{}</>", file),
        }
    }
}
