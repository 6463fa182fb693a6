//! Intermediate Representation for the DAG extractor
//!
//! A small SSA representation of compiled program units. It supplies the
//! object model the extraction core reads: typed values, instructions with
//! ordered operands, basic blocks, functions and modules.
//!
//! ## Architecture
//!
//! The crate is structured as follows:
//! - `types` - Type system (IrType)
//! - `values` - Value representations
//! - `ops` - Binary, unary, cast and compare operators
//! - `instructions` - IR instructions and the clone/remap primitives
//! - `blocks` - Basic block management
//! - `function` - Function definitions and the definition index
//! - `module` - Module and its textual rendering
//! - `builder` - IR construction utilities

// Public exports - clean API surface
pub use self::types::IrType;
pub use self::values::Value;
pub use self::ops::{IrBinaryOp, IrCastOp, IrComparePredicate, IrUnaryOp};
pub use self::instructions::Instruction;
pub use self::blocks::BasicBlock;
pub use self::function::{Function, InstRef, ValueDef};
pub use self::module::Module;
pub use self::builder::IrBuilder;

pub use dagx_common::{LabelId, TempId};

// Internal modules
mod types;
mod values;
mod ops;
mod instructions;
mod blocks;
mod function;
mod module;
mod builder;
