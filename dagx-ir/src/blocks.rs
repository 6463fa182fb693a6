//! Basic Block Management
//!
//! Defines basic blocks - sequences of instructions with single entry/exit points.

use dagx_common::LabelId;
use serde::{Deserialize, Serialize};
use crate::Instruction;

/// Basic Block - a sequence of instructions with a single entry and exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: LabelId,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(id: LabelId) -> Self {
        Self {
            id,
            instructions: Vec::new(),
        }
    }

    pub fn add_instruction(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    /// Insert `instr` immediately before the block terminator, or at the
    /// end if the block is not terminated yet.
    pub fn insert_before_terminator(&mut self, instr: Instruction) {
        if self.has_terminator() {
            let at = self.instructions.len() - 1;
            self.instructions.insert(at, instr);
        } else {
            self.instructions.push(instr);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn has_terminator(&self) -> bool {
        self.instructions.last().is_some_and(Instruction::is_terminator)
    }
}
