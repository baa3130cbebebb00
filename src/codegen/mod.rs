//! Lowering of IR types and constants onto a [`Target`].

use tracing::{debug, instrument};

use crate::{
    context::Context,
    ir::{FloatTy, IntTy, Label, Lambda, Scalar, Type, UintTy, Value},
};

pub mod target;
pub mod text;

pub use target::Target;

/// A lambda lowered onto a target: its function type and the initial value of
/// every local, in slot order.
#[derive(Debug, Clone)]
pub struct LoweredLambda<Ty, Constant> {
    pub name: Label,
    pub signature: Ty,
    pub locals: Vec<Constant>,
}

pub fn lower_type<T: Target>(ty: &Type, target: &mut T) -> T::Type {
    match ty {
        Type::Nil | Type::Bool => target.int_type(1),
        Type::Int(int_ty) => match int_ty {
            IntTy::I8 => target.int_type(8),
            IntTy::I16 => target.int_type(16),
            IntTy::I32 => target.int_type(32),
            IntTy::I64 => target.int_type(64),
        },
        Type::Uint(uint_ty) => match uint_ty {
            UintTy::U8 => target.int_type(8),
            UintTy::U16 => target.int_type(16),
            UintTy::U32 => target.int_type(32),
            UintTy::U64 => target.int_type(64),
        },
        Type::Float(float_ty) => match float_ty {
            FloatTy::F32 => target.float_type(),
            FloatTy::F64 => target.double_type(),
        },
        Type::Function(function) => {
            let return_type = lower_type(&function.return_type, target);
            let arguments = function
                .arguments
                .iter()
                .map(|argument| lower_type(&argument.ty, target))
                .collect();
            target.function_type(return_type, arguments)
        }
    }
}

/// Nil lowers to a zero bit, signed integers are passed as their two's
/// complement bits.
pub fn lower_scalar<T: Target>(scalar: Scalar, target: &mut T) -> T::Constant {
    match scalar {
        Scalar::Nil => target.int_constant(1, 0, false),
        Scalar::Bool(value) => target.int_constant(1, value.into(), false),
        Scalar::U8(value) => target.int_constant(8, value.into(), false),
        Scalar::U16(value) => target.int_constant(16, value.into(), false),
        Scalar::U32(value) => target.int_constant(32, value.into(), false),
        Scalar::U64(value) => target.int_constant(64, value, false),
        Scalar::I8(value) => target.int_constant(8, (value as u8).into(), true),
        Scalar::I16(value) => target.int_constant(16, (value as u16).into(), true),
        Scalar::I32(value) => target.int_constant(32, (value as u32).into(), true),
        Scalar::I64(value) => target.int_constant(64, value as u64, true),
        Scalar::F32(value) => target.float_constant(value),
        Scalar::F64(value) => target.double_constant(value),
    }
}

pub fn lower_value<T: Target>(value: &Value, target: &mut T) -> T::Constant {
    match value {
        Value::Scalar(scalar) => lower_scalar(*scalar, target),
    }
}

pub fn lower_signature<T: Target>(lambda: &Lambda, target: &mut T) -> T::Type {
    lower_type(&lambda.signature(), target)
}

/// Lowers the signature and locals of every lambda in the unit.
#[instrument(level = "debug", skip_all)]
pub fn lower_unit<T: Target>(ctx: &mut Context<T>) -> Vec<LoweredLambda<T::Type, T::Constant>> {
    let Context {
        lambdas, target, ..
    } = ctx;

    lambdas
        .iter()
        .map(|(name, lambda)| {
            debug!(?name, locals = lambda.locals().len(), "lowering lambda");
            let signature = lower_signature(lambda, target);
            let locals = lambda
                .locals()
                .iter()
                .map(|local| lower_value(&local.value, target))
                .collect();
            LoweredLambda {
                name: *name,
                signature,
                locals,
            }
        })
        .collect()
}
