use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    codegen::text::TextTarget,
    ir::{Interner, Label, Lambda, NamedDisplay},
};

/// Holds everything defined in one compilation unit, one context per file.
///
/// The context owns the string table the labels index into and the target the
/// unit is lowered with.
#[derive(Debug)]
pub struct Context<T = TextTarget> {
    pub(crate) path: PathBuf,
    pub(crate) interner: Interner,
    pub(crate) lambdas: Vec<(Label, Lambda)>,
    pub(crate) target: T,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(PathBuf::new(), TextTarget::default())
    }
}

impl<T> Context<T> {
    pub fn new(path: impl Into<PathBuf>, target: T) -> Self {
        Self {
            path: path.into(),
            interner: Interner::new(),
            lambdas: Vec::new(),
            target,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the label for `text`, interning it on first use.
    pub fn intern_string(&mut self, text: &str) -> Label {
        self.interner.intern(text)
    }

    pub fn resolve(&self, label: Label) -> Option<&str> {
        self.interner.resolve(label)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn define_lambda(&mut self, name: &str, lambda: Lambda) -> Label {
        let label = self.intern_string(name);
        debug!(name, ?label, "defined lambda");
        self.lambdas.push((label, lambda));
        label
    }

    /// The lambdas of this unit, in definition order.
    pub fn lambdas(&self) -> impl Iterator<Item = (Label, &Lambda)> {
        self.lambdas.iter().map(|(label, lambda)| (*label, lambda))
    }

    pub fn lambda(&self, name: &str) -> Option<&Lambda> {
        let label = self.interner.get(name)?;
        self.lambdas
            .iter()
            .find(|(defined, _)| *defined == label)
            .map(|(_, lambda)| lambda)
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Renders every lambda with labels resolved to their names.
    pub fn dump(&self) -> Result<String, std::fmt::Error> {
        let mut f = String::new();
        for (label, lambda) in &self.lambdas {
            let name = self.interner.resolve(*label).unwrap_or_default();
            writeln!(f, "fn {name} {}", lambda.display(&self.interner))?;
        }
        Ok(f)
    }
}
