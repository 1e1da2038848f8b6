//! Lowering for the branching forms: `if` and `while`.

use eva_core::{Error, Result};
use eva_parser::Expr;
use inkwell::values::BasicValueEnum;

use crate::lowering::core::AstLowering;

impl<'ctx> AstLowering<'ctx> {
    /// `(if cond then else)`: a two-way branch joined through a phi.
    pub(crate) fn lower_if(&mut self, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let [cond_expr, then_expr, else_expr] = args else {
            return Err(Error::MalformedForm(
                "'if' expects a condition and two branches".to_string(),
            ));
        };

        let cond = self.lower_expr(cond_expr)?;
        let cond = Self::expect_int(cond, "if")?;
        let function = self.current_fn()?;

        let then_block = self.context.append_basic_block(function, "then");
        let else_block = self.context.append_basic_block(function, "else");
        let end_block = self.context.append_basic_block(function, "ifend");

        self.builder
            .build_conditional_branch(cond, then_block, else_block)
            .map_err(Self::builder_error)?;

        self.builder.position_at_end(then_block);
        let then_value = self.lower_expr(then_expr)?;
        self.builder
            .build_unconditional_branch(end_block)
            .map_err(Self::builder_error)?;
        // The block feeding the join is wherever lowering left the cursor,
        // not necessarily `then_block`: a nested `if` ends in its own join.
        let then_end = self.insert_block()?;

        self.builder.position_at_end(else_block);
        let else_value = self.lower_expr(else_expr)?;
        self.builder
            .build_unconditional_branch(end_block)
            .map_err(Self::builder_error)?;
        let else_end = self.insert_block()?;

        self.builder.position_at_end(end_block);
        let phi = self
            .builder
            .build_phi(then_value.get_type(), "ifres")
            .map_err(Self::builder_error)?;
        phi.add_incoming(&[(&then_value, then_end), (&else_value, else_end)]);

        Ok(phi.as_basic_value())
    }

    /// `(while cond body)`: condition re-evaluated on every iteration. The
    /// loop has no meaningful value; the result is `i32 0`.
    pub(crate) fn lower_while(&mut self, args: &[Expr]) -> Result<BasicValueEnum<'ctx>> {
        let [cond_expr, body_expr] = args else {
            return Err(Error::MalformedForm(
                "'while' expects a condition and a body".to_string(),
            ));
        };

        let function = self.current_fn()?;
        let cond_block = self.context.append_basic_block(function, "cond");
        let body_block = self.context.append_basic_block(function, "body");
        let end_block = self.context.append_basic_block(function, "loopend");

        self.builder
            .build_unconditional_branch(cond_block)
            .map_err(Self::builder_error)?;

        self.builder.position_at_end(cond_block);
        let cond = self.lower_expr(cond_expr)?;
        let cond = Self::expect_int(cond, "while")?;
        self.builder
            .build_conditional_branch(cond, body_block, end_block)
            .map_err(Self::builder_error)?;

        self.builder.position_at_end(body_block);
        self.lower_expr(body_expr)?;
        self.builder
            .build_unconditional_branch(cond_block)
            .map_err(Self::builder_error)?;

        self.builder.position_at_end(end_block);
        Ok(self.context.i32_type().const_zero().into())
    }
}
