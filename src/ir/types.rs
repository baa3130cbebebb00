use std::{fmt, str::FromStr};

use educe::Educe;
use itertools::Itertools;

/// A static type descriptor.
///
/// Function types own their return and argument types, so a type is always a
/// tree and can never refer back to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Nil,
    Bool,
    Int(IntTy),
    Uint(UintTy),
    Float(FloatTy),
    Function(FunctionTy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntTy {
    I8,
    I16,
    I32,
    I64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UintTy {
    U8,
    U16,
    U32,
    U64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloatTy {
    F32,
    F64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionTy {
    pub return_type: Box<Type>,
    pub arguments: Vec<Argument>,
}

/// A named argument of a function type or lambda.
///
/// The name is only informative, two arguments of the same type are equal.
#[derive(Debug, Clone, Educe)]
#[educe(PartialEq, Eq, Hash)]
pub struct Argument {
    #[educe(PartialEq(ignore), Hash(ignore))]
    pub name: String,
    pub ty: Type,
}

impl Argument {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Type {
    pub fn function(return_type: Type, arguments: Vec<Argument>) -> Self {
        Type::Function(FunctionTy {
            return_type: Box::new(return_type),
            arguments,
        })
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }

    /// # Panics
    ///
    /// Panics if this is not a function type.
    pub fn as_function(&self) -> &FunctionTy {
        match self {
            Type::Function(function) => function,
            other => panic!("type {other} accessed as a function type"),
        }
    }

    pub fn try_as_function(&self) -> Option<&FunctionTy> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the type bit width, None for function types.
    pub fn bit_width(&self) -> Option<u32> {
        let width = match self {
            Type::Nil => 1,
            Type::Bool => 1,
            Type::Int(ty) => match ty {
                IntTy::I8 => 8,
                IntTy::I16 => 16,
                IntTy::I32 => 32,
                IntTy::I64 => 64,
            },
            Type::Uint(ty) => match ty {
                UintTy::U8 => 8,
                UintTy::U16 => 16,
                UintTy::U32 => 32,
                UintTy::U64 => 64,
            },
            Type::Float(ty) => match ty {
                FloatTy::F32 => 32,
                FloatTy::F64 => 64,
            },
            Type::Function(_) => return None,
        };
        Some(width)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Nil => write!(f, "nil"),
            Type::Bool => write!(f, "bool"),
            Type::Int(ty) => match ty {
                IntTy::I8 => write!(f, "i8"),
                IntTy::I16 => write!(f, "i16"),
                IntTy::I32 => write!(f, "i32"),
                IntTy::I64 => write!(f, "i64"),
            },
            Type::Uint(ty) => match ty {
                UintTy::U8 => write!(f, "u8"),
                UintTy::U16 => write!(f, "u16"),
                UintTy::U32 => write!(f, "u32"),
                UintTy::U64 => write!(f, "u64"),
            },
            Type::Float(ty) => match ty {
                FloatTy::F32 => write!(f, "f32"),
                FloatTy::F64 => write!(f, "f64"),
            },
            Type::Function(function) => write!(f, "{function}"),
        }
    }
}

impl fmt::Display for FunctionTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) -> {}",
            self.arguments.iter().join(", "),
            self.return_type
        )
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// Error returned when a name does not spell a primitive type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType;

impl FromStr for Type {
    type Err = UnknownType;

    /// Parses the primitive type names, function types are built by the parser.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "nil" => Type::Nil,
            "bool" => Type::Bool,
            "i8" => Type::Int(IntTy::I8),
            "i16" => Type::Int(IntTy::I16),
            "i32" => Type::Int(IntTy::I32),
            "i64" => Type::Int(IntTy::I64),
            "u8" => Type::Uint(UintTy::U8),
            "u16" => Type::Uint(UintTy::U16),
            "u32" => Type::Uint(UintTy::U32),
            "u64" => Type::Uint(UintTy::U64),
            "f32" => Type::Float(FloatTy::F32),
            "f64" => Type::Float(FloatTy::F64),
            _ => return Err(UnknownType),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Argument, FloatTy, IntTy, Type, UintTy};

    #[test]
    fn display_primitives() {
        assert_eq!(Type::Nil.to_string(), "nil");
        assert_eq!(Type::Bool.to_string(), "bool");
        assert_eq!(Type::Uint(UintTy::U8).to_string(), "u8");
        assert_eq!(Type::Int(IntTy::I64).to_string(), "i64");
        assert_eq!(Type::Float(FloatTy::F64).to_string(), "f64");
    }

    #[test]
    fn display_function() {
        let ty = Type::function(
            Type::Uint(UintTy::U32),
            vec![Argument::new("x", Type::Uint(UintTy::U8))],
        );
        assert_eq!(ty.to_string(), "(x: u8) -> u32");

        let empty = Type::function(Type::Nil, vec![]);
        assert_eq!(empty.to_string(), "() -> nil");
    }

    #[test]
    fn display_nested_function() {
        let callback = Type::function(
            Type::Bool,
            vec![Argument::new("value", Type::Int(IntTy::I32))],
        );
        let ty = Type::function(
            Type::Float(FloatTy::F32),
            vec![
                Argument::new("f", callback),
                Argument::new("n", Type::Uint(UintTy::U16)),
            ],
        );
        assert_eq!(ty.to_string(), "(f: (value: i32) -> bool, n: u16) -> f32");
    }

    #[test]
    fn function_accessors() {
        let ty = Type::function(Type::Bool, vec![Argument::new("a", Type::Nil)]);
        assert!(ty.is_function());
        let function = ty.as_function();
        assert_eq!(*function.return_type, Type::Bool);
        assert_eq!(function.arguments.len(), 1);
        assert_eq!(ty.bit_width(), None);
        assert!(Type::Bool.try_as_function().is_none());
    }

    #[test]
    #[should_panic(expected = "accessed as a function type")]
    fn primitive_as_function() {
        Type::Uint(UintTy::U8).as_function();
    }

    #[test]
    fn argument_names_do_not_affect_equality() {
        let a = Type::function(Type::Bool, vec![Argument::new("x", Type::Nil)]);
        let b = Type::function(Type::Bool, vec![Argument::new("y", Type::Nil)]);
        assert_eq!(a, b);
    }

    #[test]
    fn parse_primitive_names() {
        for name in [
            "nil", "bool", "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "f32", "f64",
        ] {
            let ty: Type = name.parse().unwrap();
            assert_eq!(ty.to_string(), name);
        }
        assert!("u128".parse::<Type>().is_err());
    }

    #[test]
    fn bit_widths() {
        assert_eq!(Type::Nil.bit_width(), Some(1));
        assert_eq!(Type::Uint(UintTy::U16).bit_width(), Some(16));
        assert_eq!(Type::Int(IntTy::I32).bit_width(), Some(32));
        assert_eq!(Type::Float(FloatTy::F64).bit_width(), Some(64));
    }
}
