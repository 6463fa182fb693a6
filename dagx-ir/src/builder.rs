//! IR Builder
//!
//! Provides utilities for constructing IR programmatically.

use dagx_common::{DagError, LabelId, TempId};
use crate::{
    BasicBlock, Function, Instruction, IrBinaryOp, IrCastOp, IrComparePredicate, IrType,
    IrUnaryOp, Value,
};

/// Builder for constructing IR
pub struct IrBuilder {
    current_function: Option<Function>,
    current_block: Option<LabelId>,
    next_temp_id: TempId,
    next_label_id: LabelId,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self {
            current_function: None,
            current_block: None,
            next_temp_id: 0,
            next_label_id: 0,
        }
    }

    pub fn new_temp(&mut self) -> TempId {
        let temp = self.next_temp_id;
        self.next_temp_id += 1;
        temp
    }

    pub fn new_label(&mut self) -> LabelId {
        let label = self.next_label_id;
        self.next_label_id += 1;
        label
    }

    pub fn create_function(&mut self, name: &str, return_type: IrType) -> &mut Function {
        // Reset counters for new function
        self.next_temp_id = 0;
        self.next_label_id = 0;
        self.current_block = None;
        self.current_function.insert(Function::new(name.to_string(), return_type))
    }

    /// Append a parameter of type `param_type` and return it as a value
    pub fn add_parameter(&mut self, param_type: IrType) -> Result<Value, DagError> {
        let param_id = self.new_temp();
        let function = self.function_mut()?;
        function.add_parameter(param_id, param_type);
        Ok(Value::Temp(param_id))
    }

    /// Create a fresh block and make it the insertion point
    pub fn create_block(&mut self) -> Result<LabelId, DagError> {
        let label = self.new_label();
        self.function_mut()?.add_block(BasicBlock::new(label));
        self.current_block = Some(label);
        Ok(label)
    }

    pub fn switch_to_block(&mut self, label: LabelId) -> Result<(), DagError> {
        if self.function_mut()?.get_block(label).is_none() {
            return Err(DagError::ir_build(format!("Block L{label} does not exist")));
        }
        self.current_block = Some(label);
        Ok(())
    }

    pub fn build_binary(&mut self, op: IrBinaryOp, lhs: Value, rhs: Value, result_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Binary { result, op, lhs, rhs, result_type })?;
        Ok(Value::Temp(result))
    }

    pub fn build_unary(&mut self, op: IrUnaryOp, operand: Value, result_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Unary { result, op, operand, result_type })?;
        Ok(Value::Temp(result))
    }

    pub fn build_compare(&mut self, predicate: IrComparePredicate, lhs: Value, rhs: Value, operand_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Compare { result, predicate, lhs, rhs, operand_type })?;
        Ok(Value::Temp(result))
    }

    pub fn build_cast(&mut self, op: IrCastOp, value: Value, from_type: IrType, target_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Cast { result, op, value, from_type, target_type })?;
        Ok(Value::Temp(result))
    }

    pub fn build_select(&mut self, condition: Value, true_value: Value, false_value: Value, result_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Select { result, condition, true_value, false_value, result_type })?;
        Ok(Value::Temp(result))
    }

    pub fn build_load(&mut self, ptr: Value, result_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Load { result, ptr, result_type })?;
        Ok(Value::Temp(result))
    }

    pub fn build_store(&mut self, value: Value, ptr: Value, value_type: IrType) -> Result<(), DagError> {
        self.add_instruction(Instruction::Store { value, ptr, value_type })
    }

    pub fn build_alloca(&mut self, alloc_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Alloca { result, alloc_type })?;
        Ok(Value::Temp(result))
    }

    /// Call `callee`; returns the result value unless `result_type` is void
    pub fn build_call(&mut self, callee: &str, args: Vec<(IrType, Value)>, result_type: IrType) -> Result<Option<Value>, DagError> {
        let result = if result_type.is_void() {
            None
        } else {
            Some(self.new_temp())
        };

        let callee = Value::Function(callee.to_string());
        self.add_instruction(Instruction::Call { result, callee, args, result_type })?;
        Ok(result.map(Value::Temp))
    }

    pub fn build_phi(&mut self, incoming: Vec<(Value, LabelId)>, result_type: IrType) -> Result<Value, DagError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Phi { result, incoming, result_type })?;
        Ok(Value::Temp(result))
    }

    pub fn build_return(&mut self, value: Option<(IrType, Value)>) -> Result<(), DagError> {
        self.add_instruction(Instruction::Return(value))
    }

    pub fn build_branch(&mut self, label: LabelId) -> Result<(), DagError> {
        self.add_instruction(Instruction::Branch(label))
    }

    pub fn build_branch_cond(&mut self, condition: Value, true_label: LabelId, false_label: LabelId) -> Result<(), DagError> {
        self.add_instruction(Instruction::BranchCond { condition, true_label, false_label })
    }

    fn function_mut(&mut self) -> Result<&mut Function, DagError> {
        self.current_function
            .as_mut()
            .ok_or_else(|| DagError::ir_build("No current function"))
    }

    fn add_instruction(&mut self, instr: Instruction) -> Result<(), DagError> {
        let block_id = self
            .current_block
            .ok_or_else(|| DagError::ir_build("No current block"))?;
        let block = self
            .function_mut()?
            .get_block_mut(block_id)
            .ok_or_else(|| DagError::ir_build("Current block not found"))?;
        block.add_instruction(instr);
        Ok(())
    }

    pub fn finish_function(&mut self) -> Option<Function> {
        self.current_block = None;
        self.current_function.take()
    }
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new()
    }
}
