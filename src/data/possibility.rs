//! Leaves of the split tree read as epistemic possibilities
//!
//! A leaf at generation `n` fixes a truth value for each of `n`
//! propositions: bit `j` of its path is 1 when proposition `j` holds.

use super::disc::DiscPath;

/// Names for `count` propositions, taking given names first and
/// generating `B1`, `B2`, ... for the rest
pub fn proposition_names(count: usize, given: &[String]) -> Vec<String> {
    (0..count)
        .map(|i| given.get(i).cloned().unwrap_or_else(|| format!("B{}", i + 1)))
        .collect()
}

/// One assignment of truth values, read from a disc path
#[derive(Debug, Clone, Copy)]
pub struct Possibility<'a> {
    path: &'a DiscPath,
}

impl<'a> Possibility<'a> {
    pub fn new(path: &'a DiscPath) -> Self {
        Self { path }
    }

    /// Number of propositions decided so far
    pub fn len(&self) -> usize {
        self.path.generation()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether proposition `index` holds, or None if it is still open
    pub fn holds(&self, index: usize) -> Option<bool> {
        self.path.bits().get(index).copied()
    }

    pub fn bitstring(&self) -> String {
        self.path.to_bitstring()
    }

    /// Set-theoretic form, e.g. `B1 ∩ ¬B2`
    pub fn notation(&self, given: &[String]) -> String {
        let names = proposition_names(self.len(), given);
        self.path
            .bits()
            .iter()
            .zip(names)
            .map(|(&bit, name)| if bit { name } else { format!("¬{}", name) })
            .collect::<Vec<_>>()
            .join(" ∩ ")
    }
}
