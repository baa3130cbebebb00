use std::{cmp::Ordering, fmt};

use super::{
    scalar::{Nil, Scalar, ScalarKind},
    types::Type,
};

/// A value bound to a name at compile time.
///
/// Only scalars exist for now; arrays, structs and lambdas will become
/// further variants without touching [`Scalar`].
#[derive(Debug, Clone, Copy)]
pub enum Value {
    Scalar(Scalar),
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(Scalar::Nil)
    }
}

/// A type that can be projected out of a [`Value`].
pub trait ValueKind: Sized {
    const NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;

    fn from_value_mut(value: &mut Value) -> Option<&mut Self>;
}

impl ValueKind for Scalar {
    const NAME: &'static str = "scalar";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Scalar(scalar) => Some(*scalar),
        }
    }

    fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
        match value {
            Value::Scalar(scalar) => Some(scalar),
        }
    }
}

macro_rules! value_kinds {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.into())
                }
            }

            impl ValueKind for $ty {
                const NAME: &'static str = <$ty as ScalarKind>::NAME;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Scalar(scalar) => scalar.try_get::<$ty>(),
                    }
                }

                fn from_value_mut(value: &mut Value) -> Option<&mut Self> {
                    match value {
                        Value::Scalar(scalar) => <$ty as ScalarKind>::from_scalar_mut(scalar),
                    }
                }
            }
        )*
    };
}

value_kinds!(Nil, bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(scalar) => scalar,
        }
    }
}

impl Value {
    pub fn is<K: ValueKind>(&self) -> bool {
        K::from_value(self).is_some()
    }

    /// # Panics
    ///
    /// Panics if the value is not of kind `K`.
    pub fn get<K: ValueKind>(&self) -> K {
        match K::from_value(self) {
            Some(value) => value,
            None => panic!("value of kind {} accessed as {}", self.kind(), K::NAME),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not of kind `K`.
    pub fn get_mut<K: ValueKind>(&mut self) -> &mut K {
        let kind = self.kind();
        match K::from_value_mut(self) {
            Some(value) => value,
            None => panic!("value of kind {} accessed as {}", kind, K::NAME),
        }
    }

    pub fn try_get<K: ValueKind>(&self) -> Option<K> {
        K::from_value(self)
    }

    pub fn kind(&self) -> Type {
        match self {
            Value::Scalar(scalar) => scalar.kind(),
        }
    }
}

impl PartialEq for Value {
    /// # Panics
    ///
    /// Panics if the values are of different kinds.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
        }
    }
}

impl PartialOrd for Value {
    /// # Panics
    ///
    /// Panics if the values are of different kinds.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a.partial_cmp(b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(scalar) => write!(f, "{scalar}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::ir::scalar::{Nil, Scalar};

    #[test]
    fn nil() {
        let a = Value::default();
        assert!(a.is::<Nil>());
        assert!(a.is::<Scalar>());
        assert!(!a.is::<bool>());
        assert!(a == Value::from(Nil));
    }

    #[test]
    fn reassign_changes_kind() {
        let mut a = Value::from(0u8);
        assert!(a.is::<u8>());

        a = Value::from(1);
        assert!(a.is::<i32>());
        assert_eq!(a.get::<i32>(), 1);
        assert!(!a.is::<u8>());

        a = Value::from(Scalar::from(2.5f64));
        assert!(a.is::<f64>());
    }

    #[test]
    fn scalar_round_trip() {
        for scalar in [
            Scalar::Nil,
            Scalar::from(true),
            Scalar::from(8u8),
            Scalar::from(16u16),
            Scalar::from(32u32),
            Scalar::from(64u64),
            Scalar::from(-8i8),
            Scalar::from(-16i16),
            Scalar::from(-32i32),
            Scalar::from(-64i64),
            Scalar::from(0.5f32),
            Scalar::from(0.25f64),
        ] {
            let value = Value::from(scalar);
            let back = value.get::<Scalar>();
            assert!(back.same_kind(&scalar));
            assert!(back == scalar);
            assert_eq!(value.to_string(), scalar.to_string());
        }
    }

    #[test]
    fn ordering_delegates_to_scalar() {
        let a = Value::from(1i64);
        let b = Value::from(2i64);
        assert!(a < b);
        assert!(a <= b);
        assert!(b > a);
        assert!(a != b);
    }

    #[test]
    fn get_mut() {
        let mut a = Value::from(10u32);
        *a.get_mut::<u32>() = 11;
        assert_eq!(a.get::<u32>(), 11);
    }

    #[test]
    #[should_panic(expected = "accessed as")]
    fn wrong_kind_access() {
        Value::from(true).get::<u8>();
    }

    #[test]
    #[should_panic(expected = "cannot compare")]
    fn cross_kind_comparison() {
        let _ = Value::from(1u16) < Value::from(1u32);
    }
}
