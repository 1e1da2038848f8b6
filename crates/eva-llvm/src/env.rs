//! Lexical environments for name resolution during lowering.

use eva_core::{Error, Result};
use inkwell::types::BasicTypeEnum;
use inkwell::values::{FunctionValue, GlobalValue, PointerValue};
use std::collections::HashMap;

/// What a name resolves to during lowering.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'ctx> {
    /// A stack slot in the current function's entry block. The allocated
    /// type travels with the pointer so reads can emit a typed load.
    Local {
        ptr: PointerValue<'ctx>,
        ty: BasicTypeEnum<'ctx>,
    },

    /// A module-level global; its pointed-to type is recovered from the
    /// initializer.
    Global(GlobalValue<'ctx>),

    /// A callable function, used directly as a call target.
    Function(FunctionValue<'ctx>),
}

/// A stack of lexical scopes mapping names to IR bindings.
///
/// Scope 0 is the global environment, created once and never popped. Each
/// `begin` form and each function body pushes a child scope for the
/// duration of its subtree walk. Resolution is innermost-wins.
#[derive(Debug)]
pub struct Environment<'ctx> {
    scopes: Vec<HashMap<String, Binding<'ctx>>>,
}

impl<'ctx> Environment<'ctx> {
    /// Creates an environment holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Enters a new scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Exits the current scope. The global scope stays.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Installs (or overwrites) a binding in the innermost scope and
    /// returns it.
    pub fn define(&mut self, name: impl Into<String>, binding: Binding<'ctx>) -> Binding<'ctx> {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), binding);
        }
        binding
    }

    /// Resolves a name through the scope chain, innermost first.
    ///
    /// # Errors
    /// Returns [`Error::UnboundName`] when no scope contains the name.
    pub fn lookup(&self, name: &str) -> Result<Binding<'ctx>> {
        for scope in self.scopes.iter().rev() {
            if let Some(binding) = scope.get(name) {
                return Ok(*binding);
            }
        }
        Err(Error::UnboundName(name.to_string()))
    }
}

impl<'ctx> Default for Environment<'ctx> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell::context::Context;

    fn global_named<'ctx>(
        module: &inkwell::module::Module<'ctx>,
        context: &'ctx Context,
        name: &str,
    ) -> Binding<'ctx> {
        Binding::Global(module.add_global(context.i32_type(), None, name))
    }

    #[test]
    fn test_lookup_walks_outer_scopes() {
        let context = Context::create();
        let module = context.create_module("test");
        let mut env = Environment::new();

        env.define("x", global_named(&module, &context, "outer"));
        env.enter_scope();

        let Binding::Global(g) = env.lookup("x").unwrap() else {
            panic!("expected global binding");
        };
        assert_eq!(g.get_name().to_str().unwrap(), "outer");
    }

    #[test]
    fn test_inner_definition_shadows_outer() {
        let context = Context::create();
        let module = context.create_module("test");
        let mut env = Environment::new();

        env.define("x", global_named(&module, &context, "outer"));
        env.enter_scope();
        env.define("x", global_named(&module, &context, "inner"));

        let Binding::Global(g) = env.lookup("x").unwrap() else {
            panic!("expected global binding");
        };
        assert_eq!(g.get_name().to_str().unwrap(), "inner");

        env.exit_scope();
        let Binding::Global(g) = env.lookup("x").unwrap() else {
            panic!("expected global binding");
        };
        assert_eq!(g.get_name().to_str().unwrap(), "outer");
    }

    #[test]
    fn test_unbound_name_is_an_error() {
        let env = Environment::new();
        assert!(matches!(
            env.lookup("missing"),
            Err(eva_core::Error::UnboundName(_))
        ));
    }

    #[test]
    fn test_global_scope_survives_exit() {
        let context = Context::create();
        let module = context.create_module("test");
        let mut env = Environment::new();

        env.define("VERSION", global_named(&module, &context, "VERSION"));
        env.exit_scope();

        assert!(env.lookup("VERSION").is_ok());
    }
}
