//! IR Operations
//!
//! Defines the binary, unary, cast and comparison operators available in
//! the IR. These are exactly the pure, effect-free operator classes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrBinaryOp {
    // Integer arithmetic
    Add, Sub, Mul,
    SDiv, UDiv,    // Signed/unsigned division
    SRem, URem,    // Signed/unsigned remainder

    // Bitwise
    And, Or, Xor,
    Shl, LShr, AShr, // Logical/arithmetic shift right

    // Floating point arithmetic
    FAdd, FSub, FMul, FDiv, FRem,
}

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrBinaryOp::Add => "add",
            IrBinaryOp::Sub => "sub",
            IrBinaryOp::Mul => "mul",
            IrBinaryOp::SDiv => "sdiv",
            IrBinaryOp::UDiv => "udiv",
            IrBinaryOp::SRem => "srem",
            IrBinaryOp::URem => "urem",
            IrBinaryOp::And => "and",
            IrBinaryOp::Or => "or",
            IrBinaryOp::Xor => "xor",
            IrBinaryOp::Shl => "shl",
            IrBinaryOp::LShr => "lshr",
            IrBinaryOp::AShr => "ashr",
            IrBinaryOp::FAdd => "fadd",
            IrBinaryOp::FSub => "fsub",
            IrBinaryOp::FMul => "fmul",
            IrBinaryOp::FDiv => "fdiv",
            IrBinaryOp::FRem => "frem",
        };
        write!(f, "{op_str}")
    }
}

/// Unary operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrUnaryOp {
    Not,  // Bitwise NOT
    Neg,  // Arithmetic negation
    FNeg, // Floating point negation
}

impl fmt::Display for IrUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrUnaryOp::Not => "not",
            IrUnaryOp::Neg => "neg",
            IrUnaryOp::FNeg => "fneg",
        };
        write!(f, "{op_str}")
    }
}

/// Conversion operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrCastOp {
    Trunc, ZExt, SExt,
    FpTrunc, FpExt,
    FpToUi, FpToSi,
    UiToFp, SiToFp,
    PtrToInt, IntToPtr,
    Bitcast,
}

impl fmt::Display for IrCastOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrCastOp::Trunc => "trunc",
            IrCastOp::ZExt => "zext",
            IrCastOp::SExt => "sext",
            IrCastOp::FpTrunc => "fptrunc",
            IrCastOp::FpExt => "fpext",
            IrCastOp::FpToUi => "fptoui",
            IrCastOp::FpToSi => "fptosi",
            IrCastOp::UiToFp => "uitofp",
            IrCastOp::SiToFp => "sitofp",
            IrCastOp::PtrToInt => "ptrtoint",
            IrCastOp::IntToPtr => "inttoptr",
            IrCastOp::Bitcast => "bitcast",
        };
        write!(f, "{op_str}")
    }
}

/// Comparison predicates. Integer predicates print under `icmp`,
/// floating point ones under `fcmp`. All comparisons produce `i1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrComparePredicate {
    Eq, Ne,
    Slt, Sle, Sgt, Sge, // Signed comparisons
    Ult, Ule, Ugt, Uge, // Unsigned comparisons

    // Ordered float comparisons
    FOeq, FOne, FOlt, FOle, FOgt, FOge,
    // Unordered float comparisons
    FUeq, FUne, FUlt, FUle, FUgt, FUge,
}

impl IrComparePredicate {
    pub fn is_float(&self) -> bool {
        use IrComparePredicate::*;
        matches!(
            self,
            FOeq | FOne | FOlt | FOle | FOgt | FOge | FUeq | FUne | FUlt | FUle | FUgt | FUge
        )
    }

    /// The instruction mnemonic this predicate belongs to
    pub fn mnemonic(&self) -> &'static str {
        if self.is_float() { "fcmp" } else { "icmp" }
    }
}

impl fmt::Display for IrComparePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pred_str = match self {
            IrComparePredicate::Eq => "eq",
            IrComparePredicate::Ne => "ne",
            IrComparePredicate::Slt => "slt",
            IrComparePredicate::Sle => "sle",
            IrComparePredicate::Sgt => "sgt",
            IrComparePredicate::Sge => "sge",
            IrComparePredicate::Ult => "ult",
            IrComparePredicate::Ule => "ule",
            IrComparePredicate::Ugt => "ugt",
            IrComparePredicate::Uge => "uge",
            IrComparePredicate::FOeq => "oeq",
            IrComparePredicate::FOne => "one",
            IrComparePredicate::FOlt => "olt",
            IrComparePredicate::FOle => "ole",
            IrComparePredicate::FOgt => "ogt",
            IrComparePredicate::FOge => "oge",
            IrComparePredicate::FUeq => "ueq",
            IrComparePredicate::FUne => "une",
            IrComparePredicate::FUlt => "ult",
            IrComparePredicate::FUle => "ule",
            IrComparePredicate::FUgt => "ugt",
            IrComparePredicate::FUge => "uge",
        };
        write!(f, "{pred_str}")
    }
}
