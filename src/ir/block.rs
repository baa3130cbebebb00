use std::{
    fmt,
    ops::{Index, IndexMut},
    slice,
};

use super::{
    NamedDisplay,
    instruction::{Instruction, Opcode},
    label::Interner,
    operand::Operand,
};

/// A straight-line sequence of instructions.
///
/// Branches and jumps target blocks, never individual instructions, so
/// instructions are only addressed by their position in the block.
#[derive(Debug, Clone, Default)]
pub struct Block {
    instructions: Vec<Instruction>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn append_unary(&mut self, opcode: Opcode, a: impl Into<Operand>) {
        self.push(Instruction::unary(opcode, a));
    }

    pub fn append_binary(&mut self, opcode: Opcode, a: impl Into<Operand>, b: impl Into<Operand>) {
        self.push(Instruction::binary(opcode, a, b));
    }

    pub fn append_ternary(
        &mut self,
        opcode: Opcode,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        c: impl Into<Operand>,
    ) {
        self.push(Instruction::ternary(opcode, a, b, c));
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Instruction> {
        self.instructions.iter_mut()
    }
}

impl Index<usize> for Block {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Self::Output {
        &self.instructions[index]
    }
}

impl IndexMut<usize> for Block {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.instructions[index]
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Instruction;
    type IntoIter = slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Block {
    type Item = &'a mut Instruction;
    type IntoIter = slice::IterMut<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl FromIterator<Instruction> for Block {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

impl NamedDisplay for Block {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: Option<&Interner>) -> fmt::Result {
        for (index, instruction) in self.iter().enumerate() {
            write!(f, "{index}:\t")?;
            instruction.fmt_named(f, names)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_named(f, None)
    }
}
