use std::{collections::HashMap, fmt};

/// Index-based reference to an interned string, such as a block or lambda name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    pub index: usize,
}

impl Label {
    pub const fn new(index: usize) -> Self {
        Self { index }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.index)
    }
}

/// The string table of a compilation unit.
///
/// Interning the same text twice yields the same label.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    strings: Vec<String>,
    labels: HashMap<String, Label>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, text: &str) -> Label {
        if let Some(label) = self.labels.get(text) {
            return *label;
        }

        let label = Label::new(self.strings.len());
        self.strings.push(text.to_string());
        self.labels.insert(text.to_string(), label);
        label
    }

    pub fn resolve(&self, label: Label) -> Option<&str> {
        self.strings.get(label.index).map(String::as_str)
    }

    pub fn get(&self, text: &str) -> Option<Label> {
        self.labels.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Interner, Label};

    #[test]
    fn compare_by_index() {
        assert!(Label::new(7) == Label::new(7));
        assert!(Label::new(3) < Label::new(7));
        assert!(Label::new(7) >= Label::new(3));
        assert!(Label::new(3) != Label::new(7));
    }

    #[test]
    fn intern_deduplicates() {
        let mut interner = Interner::new();
        let entry = interner.intern("entry");
        let exit = interner.intern("exit");
        assert_ne!(entry, exit);
        assert_eq!(interner.intern("entry"), entry);
        assert_eq!(interner.len(), 2);
        assert_eq!(interner.resolve(exit), Some("exit"));
        assert_eq!(interner.get("entry"), Some(entry));
        assert_eq!(interner.resolve(Label::new(9)), None);
    }

    #[test]
    fn display() {
        assert_eq!(Label::new(4).to_string(), "@4");
    }
}
