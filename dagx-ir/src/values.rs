//! IR Value Representations
//!
//! Defines values that can be used as operands in IR instructions.
//! Only [`Value::Temp`] names a computed value; every other variant is a
//! constant and is printed inline wherever it is used.

use dagx_common::TempId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// IR Value - represents operands in IR instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Instruction result or function parameter
    Temp(TempId),

    /// Constant integer
    Constant(i64),

    /// Constant floating point number
    Float(f64),

    /// Global symbol reference
    Global(String),

    /// Function reference
    Function(String),

    /// Undefined value
    Undef,
}

impl Value {
    /// The temporary this value names, if it is not a constant
    pub fn as_temp(&self) -> Option<TempId> {
        match self {
            Value::Temp(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.as_temp().is_none()
    }
}

/// Decimal when it reads back exactly with a fraction point, otherwise the
/// 64-bit hex image, the same two forms an LLVM assembler accepts.
fn write_float(f: &mut fmt::Formatter<'_>, val: f64) -> fmt::Result {
    let decimal = format!("{val:?}");
    if val.is_finite() && decimal.contains('.') && !decimal.contains('e') {
        write!(f, "{decimal}")
    } else {
        write!(f, "0x{:016X}", val.to_bits())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Temp(id) => write!(f, "%{id}"),
            Value::Constant(val) => write!(f, "{val}"),
            Value::Float(val) => write_float(f, *val),
            Value::Global(name) => write!(f, "@{name}"),
            Value::Function(name) => write!(f, "@{name}"),
            Value::Undef => write!(f, "undef"),
        }
    }
}
