use std::{fmt, str::FromStr};

use super::{NamedDisplay, label::Interner, operand::Operand};

/// The operation an instruction performs.
///
/// The set grows as the compiler does; jumps, branches, comparisons, bitwise
/// and shift operations are still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Opcode {
    // Control flow
    Ret,
    Call,
    // Memory
    Load,
    // Arithmetic
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl Opcode {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Ret => "ret",
            Opcode::Call => "call",
            Opcode::Load => "load",
            Opcode::Neg => "neg",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Rem => "rem",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOpcode;

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ret" => Opcode::Ret,
            "call" => Opcode::Call,
            "load" => Opcode::Load,
            "neg" => Opcode::Neg,
            "add" => Opcode::Add,
            "sub" => Opcode::Sub,
            "mul" => Opcode::Mul,
            "div" => Opcode::Div,
            "rem" => Opcode::Rem,
            _ => return Err(UnknownOpcode),
        })
    }
}

/// How many operands an instruction was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Unary,
    Binary,
    Ternary,
}

impl Format {
    pub fn arity(&self) -> usize {
        match self {
            Format::Unary => 1,
            Format::Binary => 2,
            Format::Ternary => 3,
        }
    }
}

/// One opcode and up to three operands.
///
/// The format is fixed by the constructor used, unused operands are nil.
/// Whether the arity suits the opcode is up to whoever builds the instruction.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    opcode: Opcode,
    format: Format,
    operands: [Operand; 3],
}

impl Instruction {
    pub fn unary(opcode: Opcode, a: impl Into<Operand>) -> Self {
        Self {
            opcode,
            format: Format::Unary,
            operands: [a.into(), Operand::default(), Operand::default()],
        }
    }

    pub fn binary(opcode: Opcode, a: impl Into<Operand>, b: impl Into<Operand>) -> Self {
        Self {
            opcode,
            format: Format::Binary,
            operands: [a.into(), b.into(), Operand::default()],
        }
    }

    pub fn ternary(
        opcode: Opcode,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        c: impl Into<Operand>,
    ) -> Self {
        Self {
            opcode,
            format: Format::Ternary,
            operands: [a.into(), b.into(), c.into()],
        }
    }

    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn a(&self) -> Operand {
        self.operands[0]
    }

    pub fn b(&self) -> Operand {
        self.operands[1]
    }

    pub fn c(&self) -> Operand {
        self.operands[2]
    }

    /// The operands supplied at construction.
    pub fn operands(&self) -> &[Operand] {
        &self.operands[..self.format.arity()]
    }
}

impl NamedDisplay for Instruction {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: Option<&Interner>) -> fmt::Result {
        write!(f, "{:<4}", self.opcode)?;
        for (i, operand) in self.operands().iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            operand.fmt_named(f, names)?;
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_named(f, None)
    }
}

#[cfg(test)]
mod tests {
    use super::{Format, Instruction, Opcode};
    use crate::ir::{label::Label, local::LocalHandle, scalar::Nil};

    #[test]
    fn ret() {
        let i = Instruction::unary(Opcode::Ret, 1);
        assert_eq!(i.opcode(), Opcode::Ret);
        assert_eq!(i.format(), Format::Unary);
        assert!(i.a().is::<i32>());
        assert_eq!(i.a().get::<i32>(), 1);
        assert!(i.b().is::<Nil>());
        assert!(i.c().is::<Nil>());
        assert_eq!(i.operands().len(), 1);
    }

    #[test]
    fn call() {
        let i = Instruction::ternary(
            Opcode::Call,
            LocalHandle::new(0),
            LocalHandle::new(1),
            LocalHandle::new(2),
        );
        assert_eq!(i.opcode(), Opcode::Call);
        assert_eq!(i.format(), Format::Ternary);
        assert_eq!(i.a().get::<LocalHandle>().index, 0);
        assert_eq!(i.b().get::<LocalHandle>().index, 1);
        assert_eq!(i.c().get::<LocalHandle>().index, 2);
    }

    #[test]
    fn load() {
        let i = Instruction::binary(Opcode::Load, LocalHandle::new(0), 1i32);
        assert_eq!(i.opcode(), Opcode::Load);
        assert_eq!(i.format(), Format::Binary);
        assert!(i.a().is::<LocalHandle>());
        assert_eq!(i.a().get::<LocalHandle>().index, 0);
        assert!(i.b().is::<i32>());
        assert_eq!(i.b().get::<i32>(), 1);
        assert!(i.c().is::<Nil>());
    }

    #[test]
    fn neg() {
        let i = Instruction::binary(Opcode::Neg, LocalHandle::new(0), 1i32);
        assert_eq!(i.opcode(), Opcode::Neg);
        assert_eq!(i.format(), Format::Binary);
        assert!(i.c().is::<Nil>());
    }

    #[test]
    fn arithmetic() {
        for opcode in [Opcode::Add, Opcode::Sub, Opcode::Mul, Opcode::Div, Opcode::Rem] {
            let i = Instruction::ternary(opcode, LocalHandle::new(0), 2i32, 2i32);
            assert_eq!(i.opcode(), opcode);
            assert_eq!(i.format(), Format::Ternary);
            assert!(i.a().is::<LocalHandle>());
            assert_eq!(i.a().get::<LocalHandle>().index, 0);
            assert!(i.b().is::<i32>());
            assert_eq!(i.b().get::<i32>(), 2);
            assert!(i.c().is::<i32>());
            assert_eq!(i.c().get::<i32>(), 2);
        }
    }

    #[test]
    fn arity_is_not_checked_against_opcode() {
        let i = Instruction::ternary(Opcode::Ret, 1u8, 2u8, 3u8);
        assert_eq!(i.format(), Format::Ternary);
    }

    #[test]
    fn display() {
        let i = Instruction::unary(Opcode::Ret, 1);
        assert_eq!(i.to_string(), "ret  1");

        let i = Instruction::ternary(Opcode::Add, LocalHandle::new(0), 2i32, 2i32);
        assert_eq!(i.to_string(), "add  %0, 2, 2");

        let i = Instruction::binary(Opcode::Call, Label::new(3), LocalHandle::new(1));
        assert_eq!(i.to_string(), "call @3, %1");
    }

    #[test]
    fn mnemonics_round_trip() {
        for opcode in [
            Opcode::Ret,
            Opcode::Call,
            Opcode::Load,
            Opcode::Neg,
            Opcode::Add,
            Opcode::Sub,
            Opcode::Mul,
            Opcode::Div,
            Opcode::Rem,
        ] {
            assert_eq!(opcode.mnemonic().parse::<Opcode>(), Ok(opcode));
        }
        assert!("jmp".parse::<Opcode>().is_err());
    }
}
