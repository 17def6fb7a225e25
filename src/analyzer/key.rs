// Canonical keys bridging store titles and benchmark chart labels

use crate::model::Category;
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_CPU_STOPWORDS: [&str; 5] = ["amd", "intel", "core", "ryzen", "ultra"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the sorted token set of a lower-cased, punctuation-free name.
///
/// Deterministic and total but not injective: two products can collide, and two
/// spellings of one product can miss each other (`RX7600` vs `RX 7600`, a `KF`
/// listing vs a `K` chart label, `Vídeo` losing its accented letter while
/// `Video` keeps it). Misses surface as unmatched-row counts in the matcher.
#[derive(Debug, Clone)]
pub struct KeyNormalizer {
    cpu_stopwords: HashSet<String>,
}

impl KeyNormalizer {
    pub fn new<I, S>(cpu_stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            cpu_stopwords: cpu_stopwords
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// CPU names drop brand and marketing words; GPU names keep every token
    /// because the brand prefix is part of the model (`rtx`, `rx`, `arc`).
    pub fn normalize(&self, name: &str, category: Category) -> CanonicalKey {
        let lowered = name.to_lowercase().replace('-', " ");
        let cleaned: String = lowered
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
            .collect();

        let mut tokens: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|t| category == Category::Gpu || !self.cpu_stopwords.contains(*t))
            .collect();
        tokens.sort_unstable();
        CanonicalKey(tokens.join(" "))
    }
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CPU_STOPWORDS)
    }
}
