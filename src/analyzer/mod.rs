// Analyzer module: canonical keys, cross-source matching, ratios, rankings, history.

pub mod key;
pub mod matcher;
pub mod ratio;
pub mod ranking;
pub mod history;

pub use key::{CanonicalKey, KeyNormalizer};
pub use matcher::{JoinedRecord, MatchOutcome, Matcher};
pub use ratio::{compute_ratios, usable_benchmarks};
