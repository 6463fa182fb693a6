//! Dependency traversal
//!
//! Walks the operand graph of one basic block, starting from every
//! instruction in block order, and splits the reachable values into the
//! instructions that form the block's DAG and the boundary values (live-ins)
//! that feed it. The walk is a postorder DFS on an explicit stack, so the
//! DAG comes out in dependency order however deep the operand chains are.

use std::collections::{HashMap, HashSet};

use dagx_common::{DagError, TempId};
use dagx_ir::{Function, InstRef, Instruction, IrType, Value, ValueDef};
use log::trace;

use crate::classify::is_supported;

/// A boundary value: becomes one parameter of the synthetic function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveIn {
    pub id: TempId,
    pub ty: IrType,
}

/// The DAG of one basic block.
///
/// Every operand of every member of `instructions` is an earlier member,
/// a live-in, or a constant. `live_ins` holds no duplicates and no void
/// values, in first-discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedUnit<'f> {
    pub instructions: Vec<&'f Instruction>,
    pub live_ins: Vec<LiveIn>,
}

impl ExtractedUnit<'_> {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Identity of a non-constant value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Node {
    Param { id: TempId, ty: IrType },
    Inst(InstRef),
}

/// An internal instruction whose operands are still being visited
struct Frame<'f> {
    instr: &'f Instruction,
    operands: Vec<&'f Value>,
    next: usize,
}

struct Traversal<'f, 'd> {
    function: &'f Function,
    defs: &'d HashMap<TempId, ValueDef>,
    block: usize,
    include_live_ins: bool,
    visited: HashSet<Node>,
    instructions: Vec<&'f Instruction>,
    live_ins: Vec<LiveIn>,
}

/// Extract the DAG of block number `block` of `function`.
///
/// `defs` is the function's definition index (see [`Function::definitions`]).
/// Returns `None` when no instruction of the block qualifies.
pub fn extract_block<'f>(
    function: &'f Function,
    defs: &HashMap<TempId, ValueDef>,
    block: usize,
    include_live_ins: bool,
) -> Result<Option<ExtractedUnit<'f>>, DagError> {
    let traversal = Traversal {
        function,
        defs,
        block,
        include_live_ins,
        visited: HashSet::new(),
        instructions: Vec::new(),
        live_ins: Vec::new(),
    };
    traversal.run()
}

impl<'f> Traversal<'f, '_> {
    fn run(mut self) -> Result<Option<ExtractedUnit<'f>>, DagError> {
        let function = self.function;
        let bb = function.blocks.get(self.block).ok_or_else(|| {
            DagError::from(format!("Block #{} out of range in '{}'", self.block, function.name))
        })?;

        let mut stack: Vec<Frame<'f>> = Vec::new();
        for index in 0..bb.instructions.len() {
            let root = Node::Inst(InstRef { block: self.block, index });
            stack.extend(self.enter(root)?);

            while let Some(frame) = stack.last_mut() {
                if let Some(operand) = frame.operands.get(frame.next).copied() {
                    frame.next += 1;
                    if let Some(node) = self.resolve(operand)? {
                        stack.extend(self.enter(node)?);
                    }
                } else {
                    self.instructions.push(frame.instr);
                    stack.pop();
                }
            }
        }

        if self.instructions.is_empty() {
            trace!("L{}: no supported instructions", bb.id);
            return Ok(None);
        }

        trace!(
            "L{}: {} instructions, {} live-ins",
            bb.id,
            self.instructions.len(),
            self.live_ins.len()
        );
        Ok(Some(ExtractedUnit {
            instructions: self.instructions,
            live_ins: self.live_ins,
        }))
    }

    /// Map an operand to its definition. Constants have none.
    fn resolve(&self, value: &Value) -> Result<Option<Node>, DagError> {
        let Some(id) = value.as_temp() else {
            return Ok(None);
        };
        match self.defs.get(&id) {
            Some(ValueDef::Param { ty, .. }) => Ok(Some(Node::Param { id, ty: *ty })),
            Some(ValueDef::Inst(at)) => Ok(Some(Node::Inst(*at))),
            None => Err(DagError::UndefinedValue {
                function: self.function.name.clone(),
                id,
            }),
        }
    }

    /// First visit of `node` decides its classification. Returns a frame
    /// when the node joins the DAG and its operands must be walked.
    fn enter(&mut self, node: Node) -> Result<Option<Frame<'f>>, DagError> {
        if !self.visited.insert(node) {
            return Ok(None);
        }

        match node {
            Node::Param { id, ty } => {
                self.add_live_in(Some(id), ty);
                Ok(None)
            }
            Node::Inst(at) => {
                let instr = self.function.instruction(at).ok_or_else(|| {
                    DagError::from(format!("Dangling instruction reference {at:?}"))
                })?;
                if self.absorbs(at, instr) {
                    Ok(Some(Frame {
                        instr,
                        operands: instr.operands(),
                        next: 0,
                    }))
                } else {
                    self.add_live_in(instr.result(), instr.result_type());
                    Ok(None)
                }
            }
        }
    }

    fn absorbs(&self, at: InstRef, instr: &Instruction) -> bool {
        is_supported(instr) && (self.include_live_ins || at.block == self.block)
    }

    /// Void values carry no data and cannot be parameters
    fn add_live_in(&mut self, id: Option<TempId>, ty: IrType) {
        match id {
            Some(id) if !ty.is_void() => self.live_ins.push(LiveIn { id, ty }),
            _ => {}
        }
    }
}
