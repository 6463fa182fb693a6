//! Function Definitions
//!
//! Defines IR functions with their parameters and blocks, and the
//! definition index that resolves a `TempId` to where it is defined.

use dagx_common::{DagError, LabelId, TempId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use crate::{BasicBlock, Instruction, IrType};

/// Position of an instruction inside its function: block index, then
/// instruction index within that block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstRef {
    pub block: usize,
    pub index: usize,
}

/// Where a temporary is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDef {
    /// The `index`-th parameter of the function
    Param { index: usize, ty: IrType },
    /// The result of an instruction
    Inst(InstRef),
}

/// Function in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: IrType,
    pub parameters: Vec<(TempId, IrType)>,
    pub blocks: Vec<BasicBlock>,
    #[serde(default)]
    pub is_external: bool,
}

impl Function {
    pub fn new(name: String, return_type: IrType) -> Self {
        Self {
            name,
            return_type,
            parameters: Vec::new(),
            blocks: Vec::new(),
            is_external: false,
        }
    }

    /// An external declaration: a signature without a body
    pub fn declaration(name: String, return_type: IrType, param_types: &[IrType]) -> Self {
        let mut function = Self::new(name, return_type);
        for (i, ty) in param_types.iter().enumerate() {
            function.add_parameter(i as TempId, *ty);
        }
        function.is_external = true;
        function
    }

    pub fn add_parameter(&mut self, param_id: TempId, param_type: IrType) {
        self.parameters.push((param_id, param_type));
    }

    pub fn add_block(&mut self, block: BasicBlock) {
        self.blocks.push(block);
    }

    pub fn get_block(&self, id: LabelId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_block_mut(&mut self, id: LabelId) -> Option<&mut BasicBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn instruction(&self, at: InstRef) -> Option<&Instruction> {
        self.blocks.get(at.block)?.instructions.get(at.index)
    }

    pub fn param_types(&self) -> Vec<IrType> {
        self.parameters.iter().map(|(_, ty)| *ty).collect()
    }

    /// Build the value-identity index of this function.
    ///
    /// Every parameter and every value-producing instruction gets exactly one
    /// entry. A temporary defined twice makes the function malformed.
    pub fn definitions(&self) -> Result<HashMap<TempId, ValueDef>, DagError> {
        let mut defs = HashMap::new();
        let duplicate = |id| DagError::DuplicateDefinition {
            function: self.name.clone(),
            id,
        };

        for (index, (id, ty)) in self.parameters.iter().enumerate() {
            if defs.insert(*id, ValueDef::Param { index, ty: *ty }).is_some() {
                return Err(duplicate(*id));
            }
        }

        for (block, bb) in self.blocks.iter().enumerate() {
            for (index, instr) in bb.instructions.iter().enumerate() {
                if let Some(id) = instr.result() {
                    if defs.insert(id, ValueDef::Inst(InstRef { block, index })).is_some() {
                        return Err(duplicate(id));
                    }
                }
            }
        }

        Ok(defs)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_external {
            write!(f, "declare {} @{}(", self.return_type, self.name)?;
            for (i, (_, ty)) in self.parameters.iter().enumerate() {
                if i > 0 { write!(f, ", ")?; }
                write!(f, "{ty}")?;
            }
            return writeln!(f, ")");
        }

        write!(f, "define {} @{}(", self.return_type, self.name)?;
        for (i, (id, ty)) in self.parameters.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            write!(f, "{ty} %{id}")?;
        }
        writeln!(f, ") {{")?;
        for block in &self.blocks {
            writeln!(f, "L{}:", block.id)?;
            for instr in &block.instructions {
                writeln!(f, "  {instr}")?;
            }
        }
        writeln!(f, "}}")
    }
}
