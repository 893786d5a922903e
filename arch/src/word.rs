/// The on-disk unit: one opcode byte followed by one literal byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Word {
    pub opcode: u8,
    pub literal: u8,
}

impl Word {
    pub const SIZE: usize = 2;

    /// Appended after the last source line by the assembler.
    pub const HALT: Word = Word::new(0x01, 0x00);

    pub const fn new(opcode: u8, literal: u8) -> Self {
        Word { opcode, literal }
    }

    pub fn to_bytes(self) -> [u8; 2] {
        [self.opcode, self.literal]
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Word::new(bytes[0], bytes[1])
    }
}
