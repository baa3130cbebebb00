use std::fmt;

use itertools::Itertools;

use super::{
    NamedDisplay,
    block::Block,
    label::Interner,
    local::{Local, LocalHandle},
    types::{Argument, Type},
};

/// A function: its signature, its locals and its body.
#[derive(Debug, Clone)]
pub struct Lambda {
    return_type: Type,
    arguments: Vec<Argument>,
    locals: Vec<Local>,
    body: Vec<Block>,
}

/// What a [`LocalHandle`] resolves to inside a lambda.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    Argument(&'a Argument),
    Local(&'a Local),
}

impl Slot<'_> {
    pub fn name(&self) -> &str {
        match self {
            Slot::Argument(argument) => &argument.name,
            Slot::Local(local) => &local.name,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Slot::Argument(argument) => &argument.ty,
            Slot::Local(local) => &local.ty,
        }
    }
}

impl Lambda {
    pub fn new(
        return_type: Type,
        arguments: Vec<Argument>,
        locals: Vec<Local>,
        body: Vec<Block>,
    ) -> Self {
        Self {
            return_type,
            arguments,
            locals,
            body,
        }
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn locals(&self) -> &[Local] {
        &self.locals
    }

    pub fn body(&self) -> &[Block] {
        &self.body
    }

    /// The number of addressable slots, arguments included.
    pub fn slot_count(&self) -> usize {
        self.arguments.len() + self.locals.len()
    }

    /// Resolves a handle, arguments come before locals.
    pub fn slot(&self, handle: LocalHandle) -> Option<Slot<'_>> {
        match self.arguments.get(handle.index) {
            Some(argument) => Some(Slot::Argument(argument)),
            None => self
                .locals
                .get(handle.index - self.arguments.len())
                .map(Slot::Local),
        }
    }

    /// The function type of this lambda.
    pub fn signature(&self) -> Type {
        Type::function(self.return_type.clone(), self.arguments.clone())
    }
}

impl NamedDisplay for Lambda {
    fn fmt_named(&self, f: &mut fmt::Formatter<'_>, names: Option<&Interner>) -> fmt::Result {
        writeln!(
            f,
            "({}) -> {} {{",
            self.arguments.iter().join(", "),
            self.return_type
        )?;
        for local in &self.locals {
            writeln!(f, "    {local}")?;
        }
        for (index, block) in self.body.iter().enumerate() {
            writeln!(f, "  block {index}:")?;
            block.fmt_named(f, names)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_named(f, None)
    }
}
