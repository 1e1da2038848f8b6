//! Expression lowering: atoms, operators, and calls.

use eva_core::{Error, Result};
use eva_parser::Expr;
use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum, IntValue};
use inkwell::IntPredicate;

use crate::env::Binding;
use crate::lowering::core::AstLowering;

impl<'ctx> AstLowering<'ctx> {
    /// Lowers one expression and returns its IR value.
    ///
    /// Every form leaves the primary builder in a block that subsequent
    /// instructions may legitimately flow from: `if` ends positioned in its
    /// join block, `while` in its exit block.
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Result<BasicValueEnum<'ctx>> {
        match expr {
            Expr::Number(n) => Ok(self.context.i32_type().const_int(*n as u64, true).into()),
            Expr::Str(s) => self.lower_string(s),
            Expr::Symbol(name) => self.lower_symbol(name),
            Expr::List(items) => self.lower_list(items),
        }
    }

    fn lower_list(&mut self, items: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let Some(Expr::Symbol(head)) = items.first() else {
            return Err(Error::MalformedForm(
                "Expected a form or function name at the head of a list".to_string(),
            ));
        };

        let args = &items[1..];
        match head.as_str() {
            "begin" => self.lower_begin(args),
            "var" => self.lower_var(args),
            "set" => self.lower_set(args),
            "if" => self.lower_if(args),
            "while" => self.lower_while(args),
            "def" => self.lower_def(args),
            "printf" => self.lower_printf(args),
            "+" | "-" | "*" | "/" => self.lower_arithmetic(head, args),
            "==" | "!=" | "<" | "<=" | ">" | ">=" => self.lower_comparison(head, args),
            _ => self.lower_call(head, args),
        }
    }

    /// Interns a string literal as a module-level global and returns a
    /// pointer to it. Textual `\n` sequences become newline bytes here;
    /// everything else is kept as written.
    fn lower_string(&mut self, raw: &str) -> Result<BasicValueEnum<'ctx>> {
        let unescaped = raw.replace("\\n", "\n");
        let global = self
            .builder
            .build_global_string_ptr(&unescaped, "str")
            .map_err(Self::builder_error)?;
        Ok(global.as_pointer_value().into())
    }

    fn lower_symbol(&mut self, name: &str) -> Result<BasicValueEnum<'ctx>> {
        match name {
            "true" => Ok(self.context.bool_type().const_int(1, false).into()),
            "false" => Ok(self.context.bool_type().const_zero().into()),
            _ => match self.env.lookup(name)? {
                Binding::Local { ptr, ty } => self
                    .builder
                    .build_load(ty, ptr, name)
                    .map_err(Self::builder_error),
                Binding::Global(global) => {
                    let init = global.get_initializer().ok_or_else(|| {
                        Error::Codegen(format!("Global '{name}' has no initializer"))
                    })?;
                    self.builder
                        .build_load(init.get_type(), global.as_pointer_value(), name)
                        .map_err(Self::builder_error)
                }
                Binding::Function(function) => {
                    Ok(function.as_global_value().as_pointer_value().into())
                }
            },
        }
    }

    fn lower_arithmetic(&mut self, op: &str, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let (lhs, rhs) = self.lower_int_operands(op, args)?;

        let value = match op {
            "+" => self.builder.build_int_add(lhs, rhs, "tmpadd"),
            "-" => self.builder.build_int_sub(lhs, rhs, "tmpsub"),
            "*" => self.builder.build_int_mul(lhs, rhs, "tmpmul"),
            "/" => self.builder.build_int_signed_div(lhs, rhs, "tmpdiv"),
            _ => unreachable!(),
        };

        value.map(Into::into).map_err(Self::builder_error)
    }

    fn lower_comparison(&mut self, op: &str, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let (lhs, rhs) = self.lower_int_operands(op, args)?;

        // `number` comparisons use unsigned predicates.
        let predicate = match op {
            "==" => IntPredicate::EQ,
            "!=" => IntPredicate::NE,
            "<" => IntPredicate::ULT,
            "<=" => IntPredicate::ULE,
            ">" => IntPredicate::UGT,
            ">=" => IntPredicate::UGE,
            _ => unreachable!(),
        };

        self.builder
            .build_int_compare(predicate, lhs, rhs, "tmpcmp")
            .map(Into::into)
            .map_err(Self::builder_error)
    }

    fn lower_int_operands(
        &mut self,
        op: &str,
        args: &[Expr],
    ) -> Result<(IntValue<'ctx>, IntValue<'ctx>)> {
        let [lhs_expr, rhs_expr] = args else {
            return Err(Error::MalformedForm(format!("'{op}' expects two operands")));
        };

        let lhs = self.lower_expr(lhs_expr)?;
        let lhs = Self::expect_int(lhs, op)?;
        let rhs = self.lower_expr(rhs_expr)?;
        let rhs = Self::expect_int(rhs, op)?;

        Ok((lhs, rhs))
    }

    /// `(printf fmt args...)`: call into the external variadic `printf`.
    fn lower_printf(&mut self, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        if args.is_empty() {
            return Err(Error::MalformedForm(
                "'printf' expects a format string".to_string(),
            ));
        }

        let printf = self
            .module
            .get_function("printf")
            .ok_or_else(|| Error::Codegen("'printf' is not declared".to_string()))?;

        let operands = self.lower_call_operands(args)?;
        let call = self
            .builder
            .build_call(printf, &operands, "printf")
            .map_err(Self::builder_error)?;

        call.try_as_basic_value()
            .left()
            .ok_or_else(|| Error::Codegen("'printf' call produced no value".to_string()))
    }

    /// Any other symbol-headed list is a function call.
    fn lower_call(&mut self, name: &str, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let Binding::Function(function) = self.env.lookup(name)? else {
            return Err(Error::Codegen(format!("'{name}' is not a function")));
        };

        let operands = self.lower_call_operands(args)?;
        let call = self
            .builder
            .build_call(function, &operands, "tmpcall")
            .map_err(Self::builder_error)?;

        call.try_as_basic_value()
            .left()
            .ok_or_else(|| Error::Codegen(format!("Call to '{name}' produced no value")))
    }

    fn lower_call_operands(
        &mut self,
        args: &[Expr],
    ) -> Result<Vec<BasicMetadataValueEnum<'ctx>>> {
        let mut operands = Vec::with_capacity(args.len());
        for arg in args {
            operands.push(self.lower_expr(arg)?.into());
        }
        Ok(operands)
    }
}
