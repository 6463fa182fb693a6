//! IR Instructions
//!
//! Defines all instruction types available in the IR, together with the
//! operand access used to clone an instruction and retarget its operands.

use dagx_common::{LabelId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{IrBinaryOp, IrCastOp, IrComparePredicate, IrType, IrUnaryOp, Value};

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Binary operation: result = op lhs, rhs
    Binary {
        result: TempId,
        op: IrBinaryOp,
        lhs: Value,
        rhs: Value,
        result_type: IrType,
    },

    /// Unary operation: result = op operand
    Unary {
        result: TempId,
        op: IrUnaryOp,
        operand: Value,
        result_type: IrType,
    },

    /// Comparison: result = icmp/fcmp predicate lhs, rhs (always i1)
    Compare {
        result: TempId,
        predicate: IrComparePredicate,
        lhs: Value,
        rhs: Value,
        operand_type: IrType,
    },

    /// Type cast: result = op value to target_type
    Cast {
        result: TempId,
        op: IrCastOp,
        value: Value,
        from_type: IrType,
        target_type: IrType,
    },

    /// Select (ternary): result = select condition, true_value, false_value
    Select {
        result: TempId,
        condition: Value,
        true_value: Value,
        false_value: Value,
        result_type: IrType,
    },

    /// Load from memory: result = load ptr
    Load {
        result: TempId,
        ptr: Value,
        result_type: IrType,
    },

    /// Store to memory: store value, ptr
    Store {
        value: Value,
        ptr: Value,
        value_type: IrType,
    },

    /// Allocate stack memory: result = alloca type
    Alloca {
        result: TempId,
        alloc_type: IrType,
    },

    /// Function call: result = call callee(args...)
    Call {
        result: Option<TempId>,
        callee: Value,
        args: Vec<(IrType, Value)>,
        result_type: IrType,
    },

    /// Phi node: result = phi [val1, label1], [val2, label2], ...
    Phi {
        result: TempId,
        incoming: Vec<(Value, LabelId)>,
        result_type: IrType,
    },

    /// Return: ret value or ret void
    Return(Option<(IrType, Value)>),

    /// Unconditional branch: br label
    Branch(LabelId),

    /// Conditional branch: br condition, true_label, false_label
    BranchCond {
        condition: Value,
        true_label: LabelId,
        false_label: LabelId,
    },
}

impl Instruction {
    /// The temporary defined by this instruction, if it produces a value
    pub fn result(&self) -> Option<TempId> {
        match self {
            Instruction::Binary { result, .. }
            | Instruction::Unary { result, .. }
            | Instruction::Compare { result, .. }
            | Instruction::Cast { result, .. }
            | Instruction::Select { result, .. }
            | Instruction::Load { result, .. }
            | Instruction::Alloca { result, .. }
            | Instruction::Phi { result, .. } => Some(*result),
            Instruction::Call { result, .. } => *result,
            Instruction::Store { .. }
            | Instruction::Return(_)
            | Instruction::Branch(_)
            | Instruction::BranchCond { .. } => None,
        }
    }

    /// Type of the value this instruction produces (`void` if none)
    pub fn result_type(&self) -> IrType {
        match self {
            Instruction::Binary { result_type, .. }
            | Instruction::Unary { result_type, .. }
            | Instruction::Select { result_type, .. }
            | Instruction::Load { result_type, .. }
            | Instruction::Phi { result_type, .. } => *result_type,
            Instruction::Compare { .. } => IrType::I1,
            Instruction::Cast { target_type, .. } => *target_type,
            Instruction::Alloca { .. } => IrType::Ptr,
            Instruction::Call { result: Some(_), result_type, .. } => *result_type,
            Instruction::Call { result: None, .. }
            | Instruction::Store { .. }
            | Instruction::Return(_)
            | Instruction::Branch(_)
            | Instruction::BranchCond { .. } => IrType::Void,
        }
    }

    /// Operands in slot order
    pub fn operands(&self) -> Vec<&Value> {
        match self {
            Instruction::Binary { lhs, rhs, .. } | Instruction::Compare { lhs, rhs, .. } => {
                vec![lhs, rhs]
            }
            Instruction::Unary { operand, .. } => vec![operand],
            Instruction::Cast { value, .. } => vec![value],
            Instruction::Select { condition, true_value, false_value, .. } => {
                vec![condition, true_value, false_value]
            }
            Instruction::Load { ptr, .. } => vec![ptr],
            Instruction::Store { value, ptr, .. } => vec![value, ptr],
            Instruction::Alloca { .. } | Instruction::Branch(_) => Vec::new(),
            Instruction::Call { callee, args, .. } => {
                // Arguments first, callee last
                args.iter().map(|(_, arg)| arg).chain(std::iter::once(callee)).collect()
            }
            Instruction::Phi { incoming, .. } => incoming.iter().map(|(value, _)| value).collect(),
            Instruction::Return(value) => value.iter().map(|(_, value)| value).collect(),
            Instruction::BranchCond { condition, .. } => vec![condition],
        }
    }

    /// Mutable operands, in the same slot order as [`Instruction::operands`]
    pub fn operands_mut(&mut self) -> Vec<&mut Value> {
        match self {
            Instruction::Binary { lhs, rhs, .. } | Instruction::Compare { lhs, rhs, .. } => {
                vec![lhs, rhs]
            }
            Instruction::Unary { operand, .. } => vec![operand],
            Instruction::Cast { value, .. } => vec![value],
            Instruction::Select { condition, true_value, false_value, .. } => {
                vec![condition, true_value, false_value]
            }
            Instruction::Load { ptr, .. } => vec![ptr],
            Instruction::Store { value, ptr, .. } => vec![value, ptr],
            Instruction::Alloca { .. } | Instruction::Branch(_) => Vec::new(),
            Instruction::Call { callee, args, .. } => args
                .iter_mut()
                .map(|(_, arg)| arg)
                .chain(std::iter::once(callee))
                .collect(),
            Instruction::Phi { incoming, .. } => {
                incoming.iter_mut().map(|(value, _)| value).collect()
            }
            Instruction::Return(value) => value.iter_mut().map(|(_, value)| value).collect(),
            Instruction::BranchCond { condition, .. } => vec![condition],
        }
    }

    /// Rename the temporary this instruction defines.
    /// Instructions without a result are left untouched.
    pub fn set_result(&mut self, id: TempId) {
        match self {
            Instruction::Binary { result, .. }
            | Instruction::Unary { result, .. }
            | Instruction::Compare { result, .. }
            | Instruction::Cast { result, .. }
            | Instruction::Select { result, .. }
            | Instruction::Load { result, .. }
            | Instruction::Alloca { result, .. }
            | Instruction::Phi { result, .. } => *result = id,
            Instruction::Call { result: Some(result), .. } => *result = id,
            Instruction::Call { result: None, .. }
            | Instruction::Store { .. }
            | Instruction::Return(_)
            | Instruction::Branch(_)
            | Instruction::BranchCond { .. } => {}
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::Return(_) | Instruction::Branch(_) | Instruction::BranchCond { .. }
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary { result, op, lhs, rhs, result_type } => {
                write!(f, "%{result} = {op} {result_type} {lhs}, {rhs}")
            }
            Instruction::Unary { result, op, operand, result_type } => {
                write!(f, "%{result} = {op} {result_type} {operand}")
            }
            Instruction::Compare { result, predicate, lhs, rhs, operand_type } => {
                let mnemonic = predicate.mnemonic();
                write!(f, "%{result} = {mnemonic} {predicate} {operand_type} {lhs}, {rhs}")
            }
            Instruction::Cast { result, op, value, from_type, target_type } => {
                write!(f, "%{result} = {op} {from_type} {value} to {target_type}")
            }
            Instruction::Select { result, condition, true_value, false_value, result_type } => {
                write!(f, "%{result} = select i1 {condition}, {result_type} {true_value}, {result_type} {false_value}")
            }
            Instruction::Load { result, ptr, result_type } => {
                write!(f, "%{result} = load {result_type}, ptr {ptr}")
            }
            Instruction::Store { value, ptr, value_type } => {
                write!(f, "store {value_type} {value}, ptr {ptr}")
            }
            Instruction::Alloca { result, alloc_type } => {
                write!(f, "%{result} = alloca {alloc_type}")
            }
            Instruction::Call { result, callee, args, result_type } => {
                if let Some(result) = result {
                    write!(f, "%{result} = ")?;
                }
                write!(f, "call {result_type} {callee}(")?;
                for (i, (ty, arg)) in args.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{ty} {arg}")?;
                }
                write!(f, ")")
            }
            Instruction::Phi { result, incoming, result_type } => {
                write!(f, "%{result} = phi {result_type} ")?;
                for (i, (value, label)) in incoming.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "[{value}, %L{label}]")?;
                }
                Ok(())
            }
            Instruction::Return(Some((ty, value))) => write!(f, "ret {ty} {value}"),
            Instruction::Return(None) => write!(f, "ret void"),
            Instruction::Branch(label) => write!(f, "br label %L{label}"),
            Instruction::BranchCond { condition, true_label, false_label } => {
                write!(f, "br i1 {condition}, label %L{true_label}, label %L{false_label}")
            }
        }
    }
}
