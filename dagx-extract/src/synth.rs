//! Synthetic function builder
//!
//! Turns an [`ExtractedUnit`] into a closed function inside its own
//! throwaway module: one parameter per live-in, a clone of every DAG
//! instruction with operands retargeted to parameters or earlier clones,
//! and a two-block skeleton (`entry` falls through to `sink`, which returns).

use std::collections::{HashMap, HashSet};

use dagx_common::{DagError, LabelId, TempId};
use dagx_ir::{BasicBlock, Function, Instruction, IrType, Module, Value};

use crate::traversal::ExtractedUnit;

pub const MODULE_NAME: &str = "dag";
pub const WRAPPER_NAME: &str = "wrapper";
pub const ENTRY_LABEL: LabelId = 0;
pub const SINK_LABEL: LabelId = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticFunction {
    pub module: Module,
    /// Original temporary -> its counterpart inside the wrapper
    pub value_map: HashMap<TempId, Value>,
    /// Original temporaries consumed by some instruction of the unit
    pub referenced: HashSet<TempId>,
}

impl SyntheticFunction {
    pub fn build(unit: &ExtractedUnit<'_>) -> Result<Self, DagError> {
        let mut wrapper = Function::new(WRAPPER_NAME.to_string(), IrType::Void);
        let mut value_map = HashMap::new();
        let mut next_temp: TempId = 0;

        for live_in in &unit.live_ins {
            wrapper.add_parameter(next_temp, live_in.ty);
            value_map.insert(live_in.id, Value::Temp(next_temp));
            next_temp += 1;
        }

        let mut entry = BasicBlock::new(ENTRY_LABEL);
        let mut referenced = HashSet::new();
        for instr in &unit.instructions {
            let mut cloned = (*instr).clone();
            if let Some(old) = instr.result() {
                cloned.set_result(next_temp);
                value_map.insert(old, Value::Temp(next_temp));
                next_temp += 1;
            }
            for operand in cloned.operands_mut() {
                remap(operand, &value_map)?;
            }
            referenced.extend(instr.operands().into_iter().filter_map(Value::as_temp));
            entry.add_instruction(cloned);
        }
        entry.add_instruction(Instruction::Branch(SINK_LABEL));

        let mut sink = BasicBlock::new(SINK_LABEL);
        sink.add_instruction(Instruction::Return(None));

        wrapper.add_block(entry);
        wrapper.add_block(sink);

        let mut module = Module::new(MODULE_NAME.to_string());
        module.add_function(wrapper);

        Ok(Self {
            module,
            value_map,
            referenced,
        })
    }

    pub fn wrapper(&self) -> Option<&Function> {
        self.module.get_function(WRAPPER_NAME)
    }

    pub fn wrapper_mut(&mut self) -> Option<&mut Function> {
        self.module.get_function_mut(WRAPPER_NAME)
    }
}

/// Point `operand` at its counterpart inside the wrapper. Constants stay.
fn remap(operand: &mut Value, value_map: &HashMap<TempId, Value>) -> Result<(), DagError> {
    if let Some(id) = operand.as_temp() {
        *operand = value_map
            .get(&id)
            .cloned()
            .ok_or(DagError::UnmappedOperand { id })?;
    }
    Ok(())
}
