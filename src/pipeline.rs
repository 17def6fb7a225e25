// Matching stage: snapshot + benchmarks -> rated records, with run diagnostics.
use crate::analyzer::key::KeyNormalizer;
use crate::analyzer::matcher::Matcher;
use crate::analyzer::ratio::{compute_ratios, usable_benchmarks};
use crate::model::{BenchmarkEntry, Category, MatchedRecord, NormalizedProduct};

#[derive(Debug)]
pub struct CategoryRanking {
    pub category: Category,
    /// One record per canonical key, cheapest listing across stores.
    pub records: Vec<MatchedRecord>,
    pub unmatched_catalog: usize,
    pub unkeyed_catalog: usize,
    pub excluded_benchmarks: usize,
}

/// Same input, same output: nothing is carried between calls.
pub fn build_ranking(
    products: &[NormalizedProduct],
    benchmarks: Vec<BenchmarkEntry>,
    keys: &KeyNormalizer,
    category: Category,
) -> CategoryRanking {
    let (benchmarks, zero_scores) = usable_benchmarks(benchmarks);
    let matched = Matcher::new(keys, category).match_products(products, &benchmarks);
    let rated = compute_ratios(matched.records);

    CategoryRanking {
        category,
        records: rated.records,
        unmatched_catalog: matched.unmatched_catalog,
        unkeyed_catalog: matched.unkeyed_catalog,
        excluded_benchmarks: zero_scores + rated.excluded,
    }
}
