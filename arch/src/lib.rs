pub mod inst;
pub mod op;
pub mod reg;
pub mod word;

pub use inst::Inst;
pub use op::{Arg, Operand};
pub use reg::Reg;
pub use word::Word;
