use std::{cmp::Ordering, fmt, mem};

use super::types::{FloatTy, IntTy, Type, UintTy};

/// The payload-less `nil` kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nil;

/// A primitive value known at compile time.
///
/// Exactly one kind is active at a time and no conversion between kinds ever
/// happens implicitly. Comparing two scalars of different kinds is a bug in
/// the IR builder and panics.
#[derive(Debug, Clone, Copy, Default)]
pub enum Scalar {
    #[default]
    Nil,
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

/// A Rust type that can be stored in, and projected out of, a [`Scalar`].
pub trait ScalarKind: Copy + Into<Scalar> {
    /// The IR spelling of this kind, used in panic messages.
    const NAME: &'static str;

    fn from_scalar(scalar: &Scalar) -> Option<Self>;

    fn from_scalar_mut(scalar: &mut Scalar) -> Option<&mut Self>;
}

impl From<Nil> for Scalar {
    fn from(_: Nil) -> Self {
        Scalar::Nil
    }
}

impl ScalarKind for Nil {
    const NAME: &'static str = "nil";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        matches!(scalar, Scalar::Nil).then_some(Nil)
    }

    /// `Scalar::Nil` has no payload to borrow, so this hands out a fresh
    /// `&mut Nil` that is not tied to the scalar. Writing through it can never
    /// change the scalar, which has nothing to change.
    fn from_scalar_mut(scalar: &mut Scalar) -> Option<&mut Self> {
        // zero-sized, leaking the box does not allocate
        matches!(scalar, Scalar::Nil).then(|| Box::leak(Box::new(Nil)))
    }
}

macro_rules! scalar_kinds {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value)
                }
            }

            impl ScalarKind for $ty {
                const NAME: &'static str = stringify!($ty);

                fn from_scalar(scalar: &Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::$variant(value) => Some(*value),
                        _ => None,
                    }
                }

                fn from_scalar_mut(scalar: &mut Scalar) -> Option<&mut Self> {
                    match scalar {
                        Scalar::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_kinds! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

impl Scalar {
    /// Whether the active kind is `K`.
    pub fn is<K: ScalarKind>(&self) -> bool {
        K::from_scalar(self).is_some()
    }

    /// Returns the value of kind `K`.
    ///
    /// # Panics
    ///
    /// Panics if the active kind is not `K`.
    pub fn get<K: ScalarKind>(&self) -> K {
        match K::from_scalar(self) {
            Some(value) => value,
            None => panic!("scalar of kind {} accessed as {}", self.kind(), K::NAME),
        }
    }

    /// Returns a mutable reference to the value of kind `K`.
    ///
    /// # Panics
    ///
    /// Panics if the active kind is not `K`.
    pub fn get_mut<K: ScalarKind>(&mut self) -> &mut K {
        let kind = self.kind();
        match K::from_scalar_mut(self) {
            Some(value) => value,
            None => panic!("scalar of kind {} accessed as {}", kind, K::NAME),
        }
    }

    pub fn try_get<K: ScalarKind>(&self) -> Option<K> {
        K::from_scalar(self)
    }

    /// The primitive type of the active kind.
    pub fn kind(&self) -> Type {
        match self {
            Scalar::Nil => Type::Nil,
            Scalar::Bool(_) => Type::Bool,
            Scalar::U8(_) => Type::Uint(UintTy::U8),
            Scalar::U16(_) => Type::Uint(UintTy::U16),
            Scalar::U32(_) => Type::Uint(UintTy::U32),
            Scalar::U64(_) => Type::Uint(UintTy::U64),
            Scalar::I8(_) => Type::Int(IntTy::I8),
            Scalar::I16(_) => Type::Int(IntTy::I16),
            Scalar::I32(_) => Type::Int(IntTy::I32),
            Scalar::I64(_) => Type::Int(IntTy::I64),
            Scalar::F32(_) => Type::Float(FloatTy::F32),
            Scalar::F64(_) => Type::Float(FloatTy::F64),
        }
    }

    pub fn same_kind(&self, other: &Scalar) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    fn assert_same_kind(&self, other: &Scalar) {
        assert!(
            self.same_kind(other),
            "cannot compare a scalar of kind {} with a scalar of kind {}",
            self.kind(),
            other.kind()
        );
    }
}

macro_rules! epsilon_eq {
    ($name:ident, $ty:ident) => {
        /// Equal if identical, or if the difference is below the machine
        /// epsilon scaled by the magnitude of the operands.
        pub(crate) fn $name(x: $ty, y: $ty) -> bool {
            if x == y {
                return true;
            }

            let difference = (x - y).abs();
            let normalized = (x.abs() + y.abs()).min($ty::MAX);
            difference < $ty::MIN_POSITIVE.max($ty::EPSILON * normalized)
        }
    };
}

epsilon_eq!(epsilon_eq_f32, f32);
epsilon_eq!(epsilon_eq_f64, f64);

impl PartialEq for Scalar {
    /// # Panics
    ///
    /// Panics if the scalars are of different kinds.
    fn eq(&self, other: &Self) -> bool {
        self.assert_same_kind(other);
        match (self, other) {
            (Scalar::Nil, Scalar::Nil) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::U8(a), Scalar::U8(b)) => a == b,
            (Scalar::U16(a), Scalar::U16(b)) => a == b,
            (Scalar::U32(a), Scalar::U32(b)) => a == b,
            (Scalar::U64(a), Scalar::U64(b)) => a == b,
            (Scalar::I8(a), Scalar::I8(b)) => a == b,
            (Scalar::I16(a), Scalar::I16(b)) => a == b,
            (Scalar::I32(a), Scalar::I32(b)) => a == b,
            (Scalar::I64(a), Scalar::I64(b)) => a == b,
            (Scalar::F32(a), Scalar::F32(b)) => epsilon_eq_f32(*a, *b),
            (Scalar::F64(a), Scalar::F64(b)) => epsilon_eq_f64(*a, *b),
            _ => unreachable!(),
        }
    }
}

impl PartialOrd for Scalar {
    /// Floats use their native ordering here, only equality is fuzzy.
    ///
    /// # Panics
    ///
    /// Panics if the scalars are of different kinds.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.assert_same_kind(other);
        match (self, other) {
            (Scalar::Nil, Scalar::Nil) => Some(Ordering::Equal),
            (Scalar::Bool(a), Scalar::Bool(b)) => a.partial_cmp(b),
            (Scalar::U8(a), Scalar::U8(b)) => a.partial_cmp(b),
            (Scalar::U16(a), Scalar::U16(b)) => a.partial_cmp(b),
            (Scalar::U32(a), Scalar::U32(b)) => a.partial_cmp(b),
            (Scalar::U64(a), Scalar::U64(b)) => a.partial_cmp(b),
            (Scalar::I8(a), Scalar::I8(b)) => a.partial_cmp(b),
            (Scalar::I16(a), Scalar::I16(b)) => a.partial_cmp(b),
            (Scalar::I32(a), Scalar::I32(b)) => a.partial_cmp(b),
            (Scalar::I64(a), Scalar::I64(b)) => a.partial_cmp(b),
            (Scalar::F32(a), Scalar::F32(b)) => a.partial_cmp(b),
            (Scalar::F64(a), Scalar::F64(b)) => a.partial_cmp(b),
            _ => unreachable!(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Nil => write!(f, "nil"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::U8(value) => write!(f, "{value}"),
            Scalar::U16(value) => write!(f, "{value}"),
            Scalar::U32(value) => write!(f, "{value}"),
            Scalar::U64(value) => write!(f, "{value}"),
            Scalar::I8(value) => write!(f, "{value}"),
            Scalar::I16(value) => write!(f, "{value}"),
            Scalar::I32(value) => write!(f, "{value}"),
            Scalar::I64(value) => write!(f, "{value}"),
            Scalar::F32(value) => write!(f, "{value}"),
            Scalar::F64(value) => write!(f, "{value}"),
        }
    }
}
