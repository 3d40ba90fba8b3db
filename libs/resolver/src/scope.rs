//! Evaluation scope
//!
//! A scope holds the variables and functions visible to one evaluation. Both
//! maps sit behind an `Arc` and are copied on write, so cloning a scope is
//! cheap and binding a name in a clone never shows up in the original.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::EquationNode;
use crate::error::{ErrorKind, ResolveError, Result};
use crate::functions::{default_functions, ResolverFunction};
use crate::resolve::ResolveOptions;
use crate::value::ResultValue;

pub type VariableLookup = HashMap<Arc<str>, ResultValue>;
pub type FunctionLookup = HashMap<Arc<str>, Arc<dyn ResolverFunction>>;

/// Variables and functions visible during evaluation
#[derive(Clone, Default)]
pub struct Scope {
    variables: Arc<VariableLookup>,
    functions: Arc<FunctionLookup>,
    options: ResolveOptions,
    depth: usize,
}

impl Scope {
    /// An empty scope: no variables, no functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope with the built-in functions and constants registered.
    pub fn with_defaults() -> Self {
        Self {
            variables: Arc::new(default_variables()),
            functions: Arc::new(default_functions()),
            ..Self::default()
        }
    }

    pub fn from_lookups(variables: VariableLookup, functions: FunctionLookup) -> Self {
        Self {
            variables: Arc::new(variables),
            functions: Arc::new(functions),
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn get_variable(&self, name: &str) -> Option<&ResultValue> {
        self.variables.get(name)
    }

    pub fn get_function(&self, name: &str) -> Option<&Arc<dyn ResolverFunction>> {
        self.functions.get(name)
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.keys().map(|name| name.as_ref())
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.functions.keys().map(|name| name.as_ref())
    }

    /// Bind a variable in this scope. Clones sharing the map keep their view.
    pub fn set_variable(&mut self, name: impl Into<Arc<str>>, value: ResultValue) {
        Arc::make_mut(&mut self.variables).insert(name.into(), value);
    }

    /// Register a function in this scope, replacing any previous binding.
    pub fn set_function(&mut self, name: impl Into<Arc<str>>, function: Arc<dyn ResolverFunction>) {
        let name: Arc<str> = name.into();
        if self.functions.contains_key(&name) {
            tracing::debug!(function = %name, "overriding registered function");
        }
        Arc::make_mut(&mut self.functions).insert(name, function);
    }

    /// A copy of this scope with one more variable bound.
    pub fn with_variable(&self, name: impl Into<Arc<str>>, value: ResultValue) -> Scope {
        let mut scope = self.clone();
        scope.set_variable(name, value);
        scope
    }

    /// A copy of this scope with one more function bound.
    pub fn with_function(&self, name: impl Into<Arc<str>>, function: Arc<dyn ResolverFunction>) -> Scope {
        let mut scope = self.clone();
        scope.set_function(name, function);
        scope
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn at_depth(mut self, depth: usize) -> Scope {
        self.depth = depth;
        self
    }

    /// Scope for the children of `node`, failing once the depth limit is hit.
    pub(crate) fn descend(&self, node: &EquationNode) -> Result<Scope> {
        let depth = self.depth + 1;
        if let Some(limit) = self.options.max_depth {
            if depth > limit {
                return Err(ResolveError::new(ErrorKind::DepthExceeded { limit }, node));
            }
        }
        Ok(self.clone().at_depth(depth))
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variables: Vec<&str> = self.variable_names().collect();
        let mut functions: Vec<&str> = self.function_names().collect();
        variables.sort_unstable();
        functions.sort_unstable();
        f.debug_struct("Scope")
            .field("variables", &variables)
            .field("functions", &functions)
            .field("options", &self.options)
            .field("depth", &self.depth)
            .finish()
    }
}

/// Built-in constants: `pi` and `e`.
pub fn default_variables() -> VariableLookup {
    let mut variables = VariableLookup::new();
    variables.insert(Arc::from("pi"), ResultValue::Number(std::f64::consts::PI));
    variables.insert(Arc::from("e"), ResultValue::Number(std::f64::consts::E));
    variables
}
