use crate::analyzer::key::{CanonicalKey, KeyNormalizer};
use crate::model::{BenchmarkEntry, Category, NormalizedProduct};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, info};

/// Catalog row joined to a benchmark, before the ratio is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub key: CanonicalKey,
    pub product: NormalizedProduct,
    pub benchmark: BenchmarkEntry,
}

/// Join result plus the diagnostics operators watch for match quality.
#[derive(Debug, Default)]
pub struct MatchOutcome {
    /// One row per distinct key, ordered by key.
    pub records: Vec<JoinedRecord>,
    /// Catalog rows with a key but no benchmark counterpart.
    pub unmatched_catalog: usize,
    /// Catalog rows whose model never resolved, so they carry no key.
    pub unkeyed_catalog: usize,
    /// Benchmark rows sharing a key with an earlier benchmark row.
    pub duplicate_benchmarks: usize,
}

pub struct Matcher<'a> {
    normalizer: &'a KeyNormalizer,
    category: Category,
}

impl<'a> Matcher<'a> {
    pub fn new(normalizer: &'a KeyNormalizer, category: Category) -> Self {
        Self {
            normalizer,
            category,
        }
    }

    /// Inner-joins catalog rows against benchmarks on the canonical key, keeping
    /// the cheapest listing per key. On equal prices the first row seen wins.
    /// Rows of another category and empty keys never join.
    pub fn match_products(
        &self,
        products: &[NormalizedProduct],
        benchmarks: &[BenchmarkEntry],
    ) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();

        let mut bench_by_key: BTreeMap<CanonicalKey, &BenchmarkEntry> = BTreeMap::new();
        for entry in benchmarks {
            let key = self.normalizer.normalize(&entry.display_name, self.category);
            if key.is_empty() {
                continue;
            }
            match bench_by_key.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(slot) => {
                    debug!(
                        "Benchmark '{}' collides with '{}' on key '{}'",
                        entry.display_name,
                        slot.get().display_name,
                        slot.key()
                    );
                    outcome.duplicate_benchmarks += 1;
                }
            }
        }

        let mut cheapest: BTreeMap<CanonicalKey, (&NormalizedProduct, &BenchmarkEntry)> =
            BTreeMap::new();
        for product in products.iter().filter(|p| p.category() == self.category) {
            let Some(source) = product.key_source() else {
                outcome.unkeyed_catalog += 1;
                continue;
            };
            let key = self.normalizer.normalize(&source, self.category);
            let Some(benchmark) = bench_by_key.get(&key).copied() else {
                outcome.unmatched_catalog += 1;
                continue;
            };

            match cheapest.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert((product, benchmark));
                }
                Entry::Occupied(mut slot) => {
                    if product.cash_price() < slot.get().0.cash_price() {
                        slot.insert((product, benchmark));
                    }
                }
            }
        }

        outcome.records = cheapest
            .into_iter()
            .map(|(key, (product, benchmark))| JoinedRecord {
                key,
                product: product.clone(),
                benchmark: benchmark.clone(),
            })
            .collect();

        info!(
            "{} match: {} models matched, {} catalog rows unmatched, {} without a resolved model",
            self.category,
            outcome.records.len(),
            outcome.unmatched_catalog,
            outcome.unkeyed_catalog
        );
        outcome
    }
}
