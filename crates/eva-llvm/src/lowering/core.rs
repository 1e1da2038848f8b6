//! Core lowering structure, module setup, and predeclared globals.

use eva_core::{Error, Result};
use eva_parser::Expr;
use inkwell::basic_block::BasicBlock;
use inkwell::builder::{Builder, BuilderError};
use inkwell::context::Context;
use inkwell::module::{Linkage, Module};
use inkwell::values::{BasicValueEnum, FunctionValue, GlobalValue, IntValue};
use inkwell::AddressSpace;

use crate::env::{Binding, Environment};

/// Value of the predeclared `VERSION` global.
const VERSION: u64 = 44;

/// Lowers Eva ASTs into an LLVM module.
///
/// Owns the module and two builders. The primary `builder` emits
/// instructions at the current cursor; `vars_builder` is repositioned into
/// the current function's entry block for every stack allocation, so
/// `alloca`s land upstream of all their uses no matter where the walker
/// currently is.
pub struct AstLowering<'ctx> {
    pub(crate) context: &'ctx Context,
    pub(crate) module: Module<'ctx>,
    pub(crate) builder: Builder<'ctx>,
    pub(crate) vars_builder: Builder<'ctx>,
    pub(crate) env: Environment<'ctx>,
    pub(crate) fn_value: Option<FunctionValue<'ctx>>,
}

impl<'ctx> AstLowering<'ctx> {
    /// Creates a lowering instance with the global environment primed:
    /// `VERSION` as an `i32` global and `printf` as an external variadic
    /// declaration.
    #[must_use]
    pub fn new(context: &'ctx Context) -> Self {
        let mut lowering = Self {
            context,
            module: context.create_module("EvaLLVM"),
            builder: context.create_builder(),
            vars_builder: context.create_builder(),
            env: Environment::new(),
            fn_value: None,
        };

        lowering.setup_global_environment();
        lowering.setup_extern_functions();
        lowering
    }

    /// Compiles a whole program into the module's `main` function.
    ///
    /// # Errors
    /// Returns an error on unbound names, malformed forms, builder
    /// failures, or when a function fails the IR verifier.
    pub fn lower_program(&mut self, ast: &Expr) -> Result<()> {
        let main_type = self.context.i32_type().fn_type(&[], false);
        let main = self.install_function("main", main_type)?;

        self.lower_expr(ast)?;

        self.builder
            .build_return(Some(&self.context.i32_type().const_zero()))
            .map_err(Self::builder_error)?;
        self.verify_function(main)?;

        self.module
            .verify()
            .map_err(|message| Error::Verifier(message.to_string()))
    }

    /// Returns the underlying LLVM module.
    pub fn module(&self) -> &Module<'ctx> {
        &self.module
    }

    /// Returns the module's textual IR.
    #[must_use]
    pub fn print_ir(&self) -> String {
        self.module.print_to_string().to_string()
    }

    fn setup_global_environment(&mut self) {
        let init = self.context.i32_type().const_int(VERSION, false);
        let version = self.create_global("VERSION", init);
        self.env.define("VERSION", Binding::Global(version));
    }

    fn setup_extern_functions(&mut self) {
        let byte_ptr = self.context.ptr_type(AddressSpace::default());
        let printf_type = self.context.i32_type().fn_type(&[byte_ptr.into()], true);
        let printf = self
            .module
            .add_function("printf", printf_type, Some(Linkage::External));
        self.env.define("printf", Binding::Function(printf));
    }

    /// Creates a module-level global with the given initializer, reusing
    /// the existing one when the name is already taken.
    pub(crate) fn create_global(&mut self, name: &str, init: IntValue<'ctx>) -> GlobalValue<'ctx> {
        if let Some(existing) = self.module.get_global(name) {
            return existing;
        }

        let global = self.module.add_global(init.get_type(), None, name);
        global.set_initializer(&init);
        global.set_alignment(4);
        global
    }

    /// The function currently being emitted into.
    pub(crate) fn current_fn(&self) -> Result<FunctionValue<'ctx>> {
        self.fn_value
            .ok_or_else(|| Error::Codegen("No function is being emitted".to_string()))
    }

    /// The primary builder's current insertion block.
    pub(crate) fn insert_block(&self) -> Result<BasicBlock<'ctx>> {
        self.builder
            .get_insert_block()
            .ok_or_else(|| Error::Codegen("Builder has no insertion block".to_string()))
    }

    /// Runs the IR verifier over one function.
    pub(crate) fn verify_function(&self, function: FunctionValue<'ctx>) -> Result<()> {
        if function.verify(true) {
            Ok(())
        } else {
            Err(Error::Verifier(format!(
                "function '{}' failed verification",
                function.get_name().to_string_lossy()
            )))
        }
    }

    pub(crate) fn builder_error(err: BuilderError) -> Error {
        Error::Codegen(err.to_string())
    }

    /// Narrows a lowered value to an integer, the only operand kind the
    /// arithmetic, comparison, and branch forms accept.
    pub(crate) fn expect_int(value: BasicValueEnum<'ctx>, form: &str) -> Result<IntValue<'ctx>> {
        match value {
            BasicValueEnum::IntValue(int) => Ok(int),
            other => Err(Error::Codegen(format!(
                "'{form}' expects an integer operand, got {:?}",
                other.get_type()
            ))),
        }
    }
}
