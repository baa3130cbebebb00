//! The IR value model: scalars, operands, types and the containers that make
//! up a function body.

use std::fmt;

pub mod block;
pub mod instruction;
pub mod label;
pub mod lambda;
pub mod local;
pub mod operand;
pub mod scalar;
pub mod types;
pub mod value;

pub use block::Block;
pub use instruction::{Format, Instruction, Opcode};
pub use label::{Interner, Label};
pub use lambda::{Lambda, Slot};
pub use local::{Local, LocalHandle};
pub use operand::Operand;
pub use scalar::{Nil, Scalar};
pub use types::{Argument, FloatTy, FunctionTy, IntTy, Type, UintTy};
pub use value::Value;

/// Formatting that can resolve labels to their interned names.
///
/// The plain `Display` impls print labels by index.
pub trait NamedDisplay {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: Option<&Interner>) -> fmt::Result;

    fn display<'a>(&'a self, names: &'a Interner) -> Named<'a, Self>
    where
        Self: Sized,
    {
        Named { item: self, names }
    }
}

/// Returned by [`NamedDisplay::display`].
pub struct Named<'a, T> {
    item: &'a T,
    names: &'a Interner,
}

impl<T: NamedDisplay> fmt::Display for Named<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.item.fmt_named(f, Some(self.names))
    }
}
