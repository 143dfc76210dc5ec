//! Construction options.

/// Suffix sorting algorithm used to build a [`SuffixArray`](crate::SuffixArray).
///
/// All strategies produce the same suffix array for the same terminated text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Prefix doubling with a comparison sort per round, *O*(*n* log² *n*).
    Naive,
    /// Prefix doubling with a counting sort per round, *O*(*n* log *n*).
    Doubling,
    /// Manber–Myers bucket refinement.
    ManberMyers,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Doubling
    }
}

/// Options for [`UkkonenTree::with_config`](crate::UkkonenTree::with_config).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub case_insensitive: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold ASCII letters to lower case, both in the indexed text and in every query.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }
}
