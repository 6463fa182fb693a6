//! Dead-value preservation
//!
//! A DAG result that no other DAG instruction consumes would look dead
//! inside the wrapper. Each such result is passed to its own opaque
//! external function (`use-0`, `use-1`, ...) so it stays observable.

use dagx_common::DagError;
use dagx_ir::{Instruction, IrType, Value};
use log::trace;

use crate::synth::SyntheticFunction;

pub const USE_PREFIX: &str = "use-";

/// Insert one observation call per unreferenced instruction, in list
/// order, right before the wrapper's terminator. Returns the number of
/// calls inserted.
pub fn preserve_dead_values(
    synth: &mut SyntheticFunction,
    instructions: &[&Instruction],
) -> Result<usize, DagError> {
    let mut calls = Vec::new();
    for instr in instructions {
        let Some(id) = instr.result() else {
            continue;
        };
        if synth.referenced.contains(&id) {
            continue;
        }

        let ty = instr.result_type();
        let value = synth
            .value_map
            .get(&id)
            .cloned()
            .ok_or(DagError::UnmappedOperand { id })?;
        let name = format!("{USE_PREFIX}{}", calls.len());
        let callee = synth.module.get_or_insert_declaration(&name, IrType::Void, &[ty]);
        trace!("preserving %{id} through @{callee}");

        calls.push(Instruction::Call {
            result: None,
            callee: Value::Function(callee),
            args: vec![(ty, value)],
            result_type: IrType::Void,
        });
    }

    let count = calls.len();
    let exit = synth
        .wrapper_mut()
        .and_then(|wrapper| wrapper.blocks.last_mut())
        .ok_or_else(|| DagError::from("Wrapper has no exit block".to_string()))?;
    for call in calls {
        exit.insert_before_terminator(call);
    }
    Ok(count)
}
