//! Supported-operation classifier
//!
//! Only pure, effect-free operator classes may be absorbed into a DAG.
//! Everything else is a boundary value.

use dagx_ir::Instruction;

/// Whether `instr` belongs to the operator set a DAG may contain:
/// binary arithmetic/logic, unary arithmetic, select, casts and compares.
pub fn is_supported(instr: &Instruction) -> bool {
    matches!(
        instr,
        Instruction::Binary { .. }
            | Instruction::Unary { .. }
            | Instruction::Select { .. }
            | Instruction::Cast { .. }
            | Instruction::Compare { .. }
    )
}
