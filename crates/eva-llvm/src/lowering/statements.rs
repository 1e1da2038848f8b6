//! Lowering for the binding forms: `begin`, `var`, and `set`.

use eva_core::{Error, Result};
use eva_parser::Expr;
use inkwell::values::BasicValueEnum;

use crate::env::Binding;
use crate::lowering::core::AstLowering;
use crate::types;

impl<'ctx> AstLowering<'ctx> {
    /// `(begin e1 ... en)`: lowers the body in a child scope and yields the
    /// last value (`i32 0` when the body is empty).
    pub(crate) fn lower_begin(&mut self, body: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        self.env.enter_scope();

        let mut result = self.context.i32_type().const_zero().into();
        for expr in body {
            result = self.lower_expr(expr)?;
        }

        self.env.exit_scope();
        Ok(result)
    }

    /// `(var decl init)`: allocates an entry-block slot of the declared
    /// type, binds the name, and stores the initializer.
    pub(crate) fn lower_var(&mut self, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let [decl, init] = args else {
            return Err(Error::MalformedForm(
                "'var' expects a declarator and an initializer".to_string(),
            ));
        };

        let name = types::declared_name(decl)?.to_string();
        let ty = types::declared_type(self.context, decl)?;

        let value = self.lower_expr(init)?;
        let slot = self.create_entry_alloca(&name, ty)?;
        self.env.define(name, Binding::Local { ptr: slot, ty });
        self.builder
            .build_store(slot, value)
            .map_err(Self::builder_error)?;

        Ok(value)
    }

    /// `(set name rhs)`: stores into an existing local or global slot. The
    /// rhs value is the result.
    pub(crate) fn lower_set(&mut self, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let [target, rhs] = args else {
            return Err(Error::MalformedForm(
                "'set' expects a name and a value".to_string(),
            ));
        };
        let Expr::Symbol(name) = target else {
            return Err(Error::MalformedForm(format!(
                "'set' target must be a symbol, got '{target}'"
            )));
        };

        let value = self.lower_expr(rhs)?;
        match self.env.lookup(name)? {
            Binding::Local { ptr, .. } => {
                self.builder
                    .build_store(ptr, value)
                    .map_err(Self::builder_error)?;
            }
            Binding::Global(global) => {
                self.builder
                    .build_store(global.as_pointer_value(), value)
                    .map_err(Self::builder_error)?;
            }
            Binding::Function(_) => {
                return Err(Error::Codegen(format!(
                    "Cannot assign to function '{name}'"
                )));
            }
        }

        Ok(value)
    }
}
