// Cost-benefit: price per benchmark point, lower is better.
use crate::analyzer::matcher::JoinedRecord;
use crate::model::{BenchmarkEntry, MatchedRecord};
use tracing::warn;

#[derive(Debug, Default)]
pub struct RatioOutcome {
    pub records: Vec<MatchedRecord>,
    pub excluded: usize,
}

/// Drops benchmark rows that cannot produce a finite ratio (score 0).
pub fn usable_benchmarks(entries: Vec<BenchmarkEntry>) -> (Vec<BenchmarkEntry>, usize) {
    let total = entries.len();
    let usable: Vec<_> = entries.into_iter().filter(|e| e.score > 0).collect();
    let excluded = total - usable.len();
    if excluded > 0 {
        warn!("Excluded {} benchmark rows with a zero score", excluded);
    }
    (usable, excluded)
}

/// `cash_price / score` for every joined row. Rows with a zero score or a
/// non-finite result are left out, so rankings never sort over inf/NaN.
pub fn compute_ratios(joined: Vec<JoinedRecord>) -> RatioOutcome {
    let mut outcome = RatioOutcome::default();
    for row in joined {
        if row.benchmark.score == 0 {
            outcome.excluded += 1;
            continue;
        }
        let ratio = row.product.cash_price() / f64::from(row.benchmark.score);
        if !ratio.is_finite() {
            outcome.excluded += 1;
            continue;
        }
        outcome.records.push(MatchedRecord {
            key: row.key.into_string(),
            product: row.product,
            benchmark: row.benchmark,
            cost_benefit_ratio: ratio,
        });
    }
    if outcome.excluded > 0 {
        warn!("Excluded {} matched rows without a finite cost-benefit ratio", outcome.excluded);
    }
    outcome
}
