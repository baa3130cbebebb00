use std::{cmp::Ordering, fmt, mem};

use super::{
    NamedDisplay,
    label::{Interner, Label},
    local::LocalHandle,
    scalar::{Nil, Scalar, ScalarKind},
};

/// An instruction argument: a literal scalar, a label or a local slot.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    Scalar(Scalar),
    Label(Label),
    Local(LocalHandle),
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Scalar(Scalar::Nil)
    }
}

/// A type that can be projected out of an [`Operand`].
pub trait OperandKind: Sized {
    const NAME: &'static str;

    fn from_operand(operand: &Operand) -> Option<Self>;
}

impl OperandKind for Scalar {
    const NAME: &'static str = "scalar";

    fn from_operand(operand: &Operand) -> Option<Self> {
        match operand {
            Operand::Scalar(scalar) => Some(*scalar),
            _ => None,
        }
    }
}

impl OperandKind for Label {
    const NAME: &'static str = "label";

    fn from_operand(operand: &Operand) -> Option<Self> {
        match operand {
            Operand::Label(label) => Some(*label),
            _ => None,
        }
    }
}

impl OperandKind for LocalHandle {
    const NAME: &'static str = "local";

    fn from_operand(operand: &Operand) -> Option<Self> {
        match operand {
            Operand::Local(local) => Some(*local),
            _ => None,
        }
    }
}

macro_rules! operand_kinds {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Scalar(value.into())
                }
            }

            impl OperandKind for $ty {
                const NAME: &'static str = <$ty as ScalarKind>::NAME;

                fn from_operand(operand: &Operand) -> Option<Self> {
                    match operand {
                        Operand::Scalar(scalar) => scalar.try_get::<$ty>(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

operand_kinds!(Nil, bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl From<Scalar> for Operand {
    fn from(scalar: Scalar) -> Self {
        Operand::Scalar(scalar)
    }
}

impl From<Label> for Operand {
    fn from(label: Label) -> Self {
        Operand::Label(label)
    }
}

impl From<LocalHandle> for Operand {
    fn from(local: LocalHandle) -> Self {
        Operand::Local(local)
    }
}

impl Operand {
    /// Replaces the operand with `scalar`, taking on its kind.
    pub fn set(&mut self, scalar: impl Into<Scalar>) {
        *self = Operand::Scalar(scalar.into());
    }

    /// Whether the operand holds a `K`.
    ///
    /// `is::<Scalar>()` answers whether this is a literal operand at all.
    pub fn is<K: OperandKind>(&self) -> bool {
        K::from_operand(self).is_some()
    }

    /// # Panics
    ///
    /// Panics if the operand does not hold a `K`.
    pub fn get<K: OperandKind>(&self) -> K {
        match K::from_operand(self) {
            Some(value) => value,
            None => panic!("operand of kind {} accessed as {}", self.kind_name(), K::NAME),
        }
    }

    pub fn try_get<K: OperandKind>(&self) -> Option<K> {
        K::from_operand(self)
    }

    pub fn same_kind(&self, other: &Operand) -> bool {
        match (self, other) {
            (Operand::Scalar(a), Operand::Scalar(b)) => a.same_kind(b),
            _ => mem::discriminant(self) == mem::discriminant(other),
        }
    }

    fn kind_name(&self) -> String {
        match self {
            Operand::Scalar(scalar) => scalar.kind().to_string(),
            Operand::Label(_) => Label::NAME.to_string(),
            Operand::Local(_) => LocalHandle::NAME.to_string(),
        }
    }

    fn assert_same_kind(&self, other: &Operand) {
        assert!(
            self.same_kind(other),
            "cannot compare an operand of kind {} with an operand of kind {}",
            self.kind_name(),
            other.kind_name()
        );
    }
}

impl PartialEq for Operand {
    /// # Panics
    ///
    /// Panics if the operands are of different kinds.
    fn eq(&self, other: &Self) -> bool {
        self.assert_same_kind(other);
        match (self, other) {
            (Operand::Scalar(a), Operand::Scalar(b)) => a == b,
            (Operand::Label(a), Operand::Label(b)) => a == b,
            (Operand::Local(a), Operand::Local(b)) => a == b,
            _ => unreachable!(),
        }
    }
}

impl PartialOrd for Operand {
    /// Labels and locals are ordered by index.
    ///
    /// # Panics
    ///
    /// Panics if the operands are of different kinds.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.assert_same_kind(other);
        match (self, other) {
            (Operand::Scalar(a), Operand::Scalar(b)) => a.partial_cmp(b),
            (Operand::Label(a), Operand::Label(b)) => a.partial_cmp(b),
            (Operand::Local(a), Operand::Local(b)) => a.partial_cmp(b),
            _ => unreachable!(),
        }
    }
}

impl NamedDisplay for Operand {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: Option<&Interner>) -> fmt::Result {
        match self {
            Operand::Scalar(scalar) => write!(f, "{scalar}"),
            Operand::Label(label) => match names.and_then(|names| names.resolve(*label)) {
                Some(name) => write!(f, "@{name}"),
                None => write!(f, "{label}"),
            },
            Operand::Local(local) => write!(f, "{local}"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_named(f, None)
    }
}
