use arch8::Inst;
use serde::Serialize;

/// One catalog entry as exposed to front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionInfo {
    /// `mov *, a`; `*` is the literal slot.
    pub syntax: String,
    pub interchangeable: bool,
    pub description: String,
    pub opcode: u8,
    pub pipeline1: u8,
    pub pipeline2: u8,
}

impl From<&Inst> for InstructionInfo {
    fn from(inst: &Inst) -> Self {
        InstructionInfo {
            syntax: inst.syntax(),
            interchangeable: inst.interchangeable,
            description: inst.description.to_string(),
            opcode: inst.opcode,
            pipeline1: inst.pipeline1,
            pipeline2: inst.pipeline2,
        }
    }
}

/// Every defined instruction, in catalog order.
pub fn list_instructions() -> Vec<InstructionInfo> {
    Inst::all().iter().map(InstructionInfo::from).collect()
}

pub fn list_yaml() -> String {
    serde_yaml::to_string(&list_instructions())
        .unwrap_or_else(|e| format!("# Error generating YAML: {}", e))
}
