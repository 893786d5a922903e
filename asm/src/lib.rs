pub mod assemble;
pub mod codegen;
pub mod config;
pub mod disassemble;
pub mod error;
pub mod lexer;
pub mod list;
pub mod output;
pub mod parser;
pub mod record;
pub mod token;
pub mod util;
pub mod view;

pub use assemble::{assemble, assemble_str, Assembler};
pub use config::Config;
pub use disassemble::{disassemble, disassemble_str, DisasmOptions};
pub use error::{Error, Result};
pub use list::{list_instructions, InstructionInfo};
pub use view::{view, view_str, Format};
