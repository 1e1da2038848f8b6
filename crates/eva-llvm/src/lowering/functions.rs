//! Function creation: prototypes, entry blocks, argument slots, and `def`.

use eva_core::{Error, Result};
use eva_parser::Expr;
use inkwell::module::Linkage;
use inkwell::types::{BasicMetadataTypeEnum, BasicType, BasicTypeEnum, FunctionType};
use inkwell::values::{BasicValueEnum, FunctionValue, PointerValue};

use crate::env::Binding;
use crate::lowering::core::AstLowering;
use crate::types;

impl<'ctx> AstLowering<'ctx> {
    /// Creates (or reuses) a prototype for `name`, binds it in the current
    /// scope, and opens a fresh entry block with the primary builder
    /// pointed at it.
    pub(crate) fn install_function(
        &mut self,
        name: &str,
        fn_type: FunctionType<'ctx>,
    ) -> Result<FunctionValue<'ctx>> {
        let function = match self.module.get_function(name) {
            Some(existing) => existing,
            None => self.create_function_proto(name, fn_type)?,
        };
        self.env.define(name, Binding::Function(function));

        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);
        self.fn_value = Some(function);

        Ok(function)
    }

    fn create_function_proto(
        &mut self,
        name: &str,
        fn_type: FunctionType<'ctx>,
    ) -> Result<FunctionValue<'ctx>> {
        let function = self
            .module
            .add_function(name, fn_type, Some(Linkage::External));
        self.verify_function(function)?;
        Ok(function)
    }

    /// Allocates a stack slot in the current function's entry block.
    ///
    /// The vars builder is repositioned on every call: allocas must stay in
    /// the entry block even when the primary cursor is deep inside branch
    /// or loop blocks, so they dominate every use.
    pub(crate) fn create_entry_alloca(
        &mut self,
        name: &str,
        ty: BasicTypeEnum<'ctx>,
    ) -> Result<PointerValue<'ctx>> {
        let function = self.current_fn()?;
        let entry = function.get_first_basic_block().ok_or_else(|| {
            Error::Codegen(format!(
                "Function '{}' has no entry block",
                function.get_name().to_string_lossy()
            ))
        })?;

        match entry.get_first_instruction() {
            Some(first) => self.vars_builder.position_before(&first),
            None => self.vars_builder.position_at_end(entry),
        }

        self.vars_builder
            .build_alloca(ty, name)
            .map_err(Self::builder_error)
    }

    /// `(def name params body)` or `(def name params -> type body)`.
    ///
    /// The function is bound in the enclosing scope before its body is
    /// lowered, so it can call itself. Parameters are copied into
    /// entry-block slots, making them mutable and uniformly addressed.
    pub(crate) fn lower_def(&mut self, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let (name, params, return_type, body) = match args {
            [Expr::Symbol(name), Expr::List(params), body] => {
                (name, params, BasicTypeEnum::from(self.context.i32_type()), body)
            }
            [Expr::Symbol(name), Expr::List(params), Expr::Symbol(arrow), Expr::Symbol(annotation), body]
                if arrow.as_str() == "->" =>
            {
                (name, params, types::resolve(self.context, annotation), body)
            }
            _ => {
                return Err(Error::MalformedForm(
                    "'def' expects a name, a parameter list, and a body".to_string(),
                ));
            }
        };

        let mut param_names = Vec::with_capacity(params.len());
        let mut param_types: Vec<BasicMetadataTypeEnum> = Vec::with_capacity(params.len());
        for param in params {
            param_names.push(types::declared_name(param)?.to_string());
            param_types.push(types::declared_type(self.context, param)?.into());
        }
        let fn_type = return_type.fn_type(&param_types, false);

        // A nested `def` must not disturb the enclosing emission state.
        let prev_fn = self.fn_value;
        let prev_block = self.insert_block()?;

        let function = self.install_function(name, fn_type)?;

        self.env.enter_scope();
        for (i, param_name) in param_names.iter().enumerate() {
            let arg = function.get_nth_param(i as u32).ok_or_else(|| {
                Error::Codegen(format!("Function '{name}' has no parameter #{i}"))
            })?;
            arg.set_name(param_name);

            let ty = arg.get_type();
            let slot = self.create_entry_alloca(param_name, ty)?;
            self.builder
                .build_store(slot, arg)
                .map_err(Self::builder_error)?;
            self.env
                .define(param_name.clone(), Binding::Local { ptr: slot, ty });
        }

        let body_value = self.lower_expr(body)?;
        self.builder
            .build_return(Some(&body_value))
            .map_err(Self::builder_error)?;
        self.env.exit_scope();

        self.verify_function(function)?;

        self.fn_value = prev_fn;
        self.builder.position_at_end(prev_block);

        Ok(function.as_global_value().as_pointer_value().into())
    }
}
