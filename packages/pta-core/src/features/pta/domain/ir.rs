//! Program IR for Points-to Analysis
//!
//! Minimal statement-level representation the reference engine consumes:
//! allocations, class literals, copies and static call sites, plus the
//! declared-method table used to resolve call targets by subsignature.
//!
//! Variables and methods are interned to dense numeric IDs when the
//! program is assembled; all validation happens here so the analysis
//! itself never has to handle malformed input.

use crate::shared::models::{AnalysisError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Variable identifier (interned index)
pub type VarId = u32;

/// Declared method identifier
pub type MethodId = u32;

/// Call site identifier
pub type CallSiteId = u32;

/// Method subsignature: name, parameter type names, return type name
///
/// Overloads are distinguished by parameter shape, so a subsignature is
/// the unit of method resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subsignature {
    name: String,
    params: Vec<String>,
    ret: String,
}

impl Subsignature {
    pub fn new(name: impl Into<String>, params: &[&str], ret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
            ret: ret.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Subsignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}({})", self.ret, self.name, self.params.join(","))
    }
}

/// A declared method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub id: MethodId,
    pub class: String,
    pub subsig: Subsignature,
    pub is_static: bool,
}

/// An unresolved call target: class plus subsignature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: String,
    pub subsig: Subsignature,
}

/// A static invocation site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSite {
    pub id: CallSiteId,
    pub target: MethodRef,
    pub args: Vec<VarId>,
    pub result: Option<VarId>,
    pub is_static: bool,
}

/// Pointer-relevant statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    /// `x = new T()`
    New { var: VarId, class: String },

    /// `x = T.class`
    TypeLiteral { var: VarId, class: String },

    /// `x = y`
    Copy { lhs: VarId, rhs: VarId },
}

/// An assembled, validated program
#[derive(Debug, Clone)]
pub struct Program {
    var_names: Vec<String>,
    methods: Vec<MethodDecl>,
    method_index: FxHashMap<String, MethodId>,
    stmts: Vec<Stmt>,
    calls: Vec<CallSite>,
}

fn method_key(class: &str, subsig: &Subsignature) -> String {
    format!("{}#{}", class, subsig)
}

impl Program {
    #[inline]
    pub fn var_count(&self) -> usize {
        self.var_names.len()
    }

    #[inline]
    pub fn var_name(&self, var: VarId) -> &str {
        &self.var_names[var as usize]
    }

    #[inline]
    pub fn method(&self, id: MethodId) -> &MethodDecl {
        &self.methods[id as usize]
    }

    /// Look up a declared method by class and subsignature
    pub fn declared_method(&self, class: &str, subsig: &Subsignature) -> Option<MethodId> {
        self.method_index.get(&method_key(class, subsig)).copied()
    }

    #[inline]
    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    #[inline]
    pub fn calls(&self) -> &[CallSite] {
        &self.calls
    }
}

/// Builder that interns variables and validates call sites
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    var_ids: FxHashMap<String, VarId>,
    var_names: Vec<String>,
    methods: Vec<MethodDecl>,
    method_index: FxHashMap<String, MethodId>,
    stmts: Vec<Stmt>,
    calls: Vec<CallSite>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a variable name, creating it on first use
    pub fn var(&mut self, name: &str) -> VarId {
        if let Some(&id) = self.var_ids.get(name) {
            return id;
        }
        let id = self.var_names.len() as VarId;
        self.var_names.push(name.to_string());
        self.var_ids.insert(name.to_string(), id);
        id
    }

    /// Declare a method so call sites can resolve against it
    pub fn declare_method(
        &mut self,
        class: &str,
        subsig: Subsignature,
        is_static: bool,
    ) -> Result<MethodId> {
        let key = method_key(class, &subsig);
        if self.method_index.contains_key(&key) {
            return Err(AnalysisError::DuplicateMethod {
                class: class.to_string(),
                subsig: subsig.to_string(),
            });
        }
        let id = self.methods.len() as MethodId;
        self.methods.push(MethodDecl {
            id,
            class: class.to_string(),
            subsig,
            is_static,
        });
        self.method_index.insert(key, id);
        Ok(id)
    }

    /// `var = new class()`
    pub fn stmt_new(&mut self, var: &str, class: &str) {
        let var = self.var(var);
        self.stmts.push(Stmt::New {
            var,
            class: class.to_string(),
        });
    }

    /// `var = class.class`
    pub fn type_literal(&mut self, var: &str, class: &str) {
        let var = self.var(var);
        self.stmts.push(Stmt::TypeLiteral {
            var,
            class: class.to_string(),
        });
    }

    /// `lhs = rhs`
    pub fn copy(&mut self, lhs: &str, rhs: &str) {
        let lhs = self.var(lhs);
        let rhs = self.var(rhs);
        self.stmts.push(Stmt::Copy { lhs, rhs });
    }

    /// Add an invocation site, checking argument arity against the target shape
    pub fn call(
        &mut self,
        class: &str,
        subsig: Subsignature,
        args: &[&str],
        result: Option<&str>,
        is_static: bool,
    ) -> Result<CallSiteId> {
        if args.len() != subsig.param_count() {
            return Err(AnalysisError::ArityMismatch {
                class: class.to_string(),
                subsig: subsig.to_string(),
                given: args.len(),
                expected: subsig.param_count(),
            });
        }
        let args = args.iter().map(|a| self.var(a)).collect();
        let result = result.map(|r| self.var(r));
        let id = self.calls.len() as CallSiteId;
        self.calls.push(CallSite {
            id,
            target: MethodRef {
                class: class.to_string(),
                subsig,
            },
            args,
            result,
            is_static,
        });
        Ok(id)
    }

    /// Add a static invocation site
    pub fn call_static(
        &mut self,
        class: &str,
        subsig: Subsignature,
        args: &[&str],
        result: Option<&str>,
    ) -> Result<CallSiteId> {
        self.call(class, subsig, args, result, true)
    }

    pub fn build(self) -> Program {
        Program {
            var_names: self.var_names,
            methods: self.methods,
            method_index: self.method_index,
            stmts: self.stmts,
            calls: self.calls,
        }
    }
}
