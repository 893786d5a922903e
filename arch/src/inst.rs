use color_print::cformat;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::{op::Operand, reg::Reg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inst {
    pub opcode: u8,
    pub pipeline1: u8,
    pub pipeline2: u8,
    pub mnemonic: &'static str,
    pub operands: Vec<Operand>,
    /// Operand order does not change the encoding.
    pub interchangeable: bool,
    pub description: &'static str,
}

// ----------------------------------------------------------------------------
// Catalog

macro_rules! inst {
    ($opcode:expr, $mnemonic:expr, [$($operand:expr),*], $interchangeable:expr, $description:expr) => {
        Inst {
            opcode: $opcode,
            pipeline1: 0x00,
            pipeline2: 0x00,
            mnemonic: $mnemonic,
            operands: vec![$($operand),*],
            interchangeable: $interchangeable,
            description: $description,
        }
    };
}

/// Every defined instruction. Order matters: when several definitions still
/// match after filtering, the first one wins.
pub static INSTS: Lazy<Vec<Inst>> = Lazy::new(|| {
    use Operand::Literal as Lit;
    let a = Operand::Reg(Reg::A);
    let b = Operand::Reg(Reg::B);
    let result = Operand::Reg(Reg::Result);
    vec![
        inst!(0x00, "nop", [], false, "No operation."),
        inst!(0x01, "halt", [], false, "Halts the computer."),
        inst!(0x02, "mov", [Lit, a], false, "Move literal to A-register."),
        inst!(0x03, "mov", [Lit, b], false, "Move literal to B-register."),
        inst!(0x04, "mov", [a, b], false, "Move A-register to B-register."),
        inst!(0x05, "mov", [b, a], false, "Move B-register to A-register."),
        inst!(0x06, "mov", [result, a], false, "Move result-register to A-register."),
        inst!(0x07, "mov", [result, b], false, "Move result-register to B-register."),
        inst!(0x08, "add", [a, b], true, "Add A-register and B-register."),
    ]
});

static BY_MNEMONIC: Lazy<IndexMap<&'static str, Vec<&'static Inst>>> = Lazy::new(|| {
    let mut map: IndexMap<&'static str, Vec<&'static Inst>> = IndexMap::new();
    for inst in INSTS.iter() {
        map.entry(inst.mnemonic).or_default().push(inst);
    }
    map
});

static BY_OPCODE: Lazy<IndexMap<u8, &'static Inst>> = Lazy::new(|| {
    let mut map: IndexMap<u8, &'static Inst> = IndexMap::new();
    for inst in INSTS.iter() {
        map.entry(inst.opcode).or_insert(inst);
    }
    map
});

impl Inst {
    pub fn all() -> &'static [Inst] {
        &INSTS
    }

    /// Definitions sharing `mnemonic`, in catalog order. Case sensitive.
    pub fn by_mnemonic(mnemonic: &str) -> &'static [&'static Inst] {
        BY_MNEMONIC
            .get(mnemonic)
            .map(|insts| insts.as_slice())
            .unwrap_or(&[])
    }

    /// First definition carrying `opcode`.
    pub fn by_opcode(opcode: u8) -> Option<&'static Inst> {
        BY_OPCODE.get(&opcode).copied()
    }
}

// ----------------------------------------------------------------------------
// Rendering

impl Inst {
    fn join<F: Fn(&Operand) -> String>(&self, f: F) -> String {
        let operands: Vec<String> = self.operands.iter().map(f).collect();
        if operands.is_empty() {
            self.mnemonic.to_string()
        } else {
            format!("{} {}", self.mnemonic, operands.join(", "))
        }
    }

    /// `mov *, a`
    pub fn syntax(&self) -> String {
        self.join(|op| op.to_string())
    }

    /// `mov 12, a`
    pub fn render(&self, literal: u8) -> String {
        self.join(|op| match op {
            Operand::Literal => literal.to_string(),
            Operand::Reg(reg) => reg.to_string(),
        })
    }

    pub fn cformat(&self) -> String {
        let operands: Vec<String> = self
            .operands
            .iter()
            .map(|op| match op {
                Operand::Literal => cformat!("<y>*</>"),
                Operand::Reg(reg) => cformat!("<b>{}</>", reg),
            })
            .collect();
        let swap = if self.interchangeable { "<->" } else { "" };
        cformat!(
            "<y>0x{:02X}</> <r>{:<5}</>{:<24} {:>3} {}",
            self.opcode,
            self.mnemonic,
            operands.join(", "),
            swap,
            self.description
        )
    }
}
