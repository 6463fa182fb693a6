//! Identifier types shared across the workspace

/// Label identifier for basic blocks
pub type LabelId = u32;

/// Temporary value identifier (instruction results and function parameters)
pub type TempId = u32;
