use std::fmt;

use itertools::Itertools;

use super::Target;

/// A reference target rendering LLVM flavoured type and constant spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetType {
    Int(u32),
    Float,
    Double,
    Function {
        return_type: Box<TargetType>,
        arguments: Vec<TargetType>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetConstant {
    Int { bits: u32, value: u64, signed: bool },
    Float(f32),
    Double(f64),
}

impl TargetConstant {
    pub fn ty(&self) -> TargetType {
        match self {
            TargetConstant::Int { bits, .. } => TargetType::Int(*bits),
            TargetConstant::Float(_) => TargetType::Float,
            TargetConstant::Double(_) => TargetType::Double,
        }
    }
}

impl Target for TextTarget {
    type Type = TargetType;
    type Constant = TargetConstant;

    fn int_type(&mut self, bits: u32) -> Self::Type {
        TargetType::Int(bits)
    }

    fn float_type(&mut self) -> Self::Type {
        TargetType::Float
    }

    fn double_type(&mut self) -> Self::Type {
        TargetType::Double
    }

    fn function_type(
        &mut self,
        return_type: Self::Type,
        arguments: Vec<Self::Type>,
    ) -> Self::Type {
        TargetType::Function {
            return_type: Box::new(return_type),
            arguments,
        }
    }

    fn int_constant(&mut self, bits: u32, value: u64, signed: bool) -> Self::Constant {
        TargetConstant::Int {
            bits,
            value,
            signed,
        }
    }

    fn float_constant(&mut self, value: f32) -> Self::Constant {
        TargetConstant::Float(value)
    }

    fn double_constant(&mut self, value: f64) -> Self::Constant {
        TargetConstant::Double(value)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Int(bits) => write!(f, "i{bits}"),
            TargetType::Float => write!(f, "float"),
            TargetType::Double => write!(f, "double"),
            TargetType::Function {
                return_type,
                arguments,
            } => write!(f, "{return_type} ({})", arguments.iter().join(", ")),
        }
    }
}

impl fmt::Display for TargetConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetConstant::Int { bits: 1, value, .. } => write!(f, "i1 {}", *value != 0),
            TargetConstant::Int {
                bits,
                value,
                signed: true,
            } => {
                // sign extend from the constant's width
                let shift = 64 - bits;
                write!(f, "i{bits} {}", ((value << shift) as i64) >> shift)
            }
            TargetConstant::Int { bits, value, .. } => write!(f, "i{bits} {value}"),
            TargetConstant::Float(value) => write!(f, "float {value:e}"),
            TargetConstant::Double(value) => write!(f, "double {value:e}"),
        }
    }
}
