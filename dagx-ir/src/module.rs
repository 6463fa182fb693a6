//! Module
//!
//! The top-level container of functions and external declarations, and
//! its textual rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{Function, IrType};

/// IR Module - represents a complete compilation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(name: String) -> Self {
        Self {
            name,
            functions: Vec::new(),
        }
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn get_function_mut(&mut self, name: &str) -> Option<&mut Function> {
        self.functions.iter_mut().find(|f| f.name == name)
    }

    /// Declare an external function unless a function of that name
    /// already exists. Returns the declared name.
    pub fn get_or_insert_declaration(
        &mut self,
        name: &str,
        return_type: IrType,
        param_types: &[IrType],
    ) -> String {
        if self.get_function(name).is_none() {
            let decl = Function::declaration(name.to_string(), return_type, param_types);
            self.add_function(decl);
        }
        name.to_string()
    }
}

/// Declarations first, then definitions, each in insertion order.
impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.name)?;
        for decl in self.functions.iter().filter(|func| func.is_external) {
            write!(f, "{decl}")?;
        }
        for func in self.functions.iter().filter(|func| !func.is_external) {
            writeln!(f)?;
            write!(f, "{func}")?;
        }
        Ok(())
    }
}
