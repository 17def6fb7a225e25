use crate::model::{Brand, MatchedRecord, Store};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Presentation filters. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct RankingFilter {
    pub brands: HashSet<Brand>,
    pub stores: HashSet<Store>,
    pub manufacturers: HashSet<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl RankingFilter {
    pub fn accepts(&self, record: &MatchedRecord) -> bool {
        let product = &record.product;
        let price = product.cash_price();

        if !self.brands.is_empty()
            && !product.brand().resolved().is_some_and(|b| self.brands.contains(b))
        {
            return false;
        }
        if !self.stores.is_empty() && !self.stores.contains(&product.store()) {
            return false;
        }
        if !self.manufacturers.is_empty()
            && !product
                .manufacturer()
                .is_some_and(|m| self.manufacturers.contains(&m.to_uppercase()))
        {
            return false;
        }
        self.min_price.is_none_or(|min| price >= min) && self.max_price.is_none_or(|max| price <= max)
    }

    pub fn apply<'a>(&self, records: &'a [MatchedRecord]) -> Vec<&'a MatchedRecord> {
        records.iter().filter(|r| self.accepts(r)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingSummary {
    pub total: usize,
    pub max_score: u32,
    pub best_ratio: f64,
}

pub fn summarize(records: &[&MatchedRecord]) -> Option<RankingSummary> {
    let max_score = records.iter().map(|r| r.benchmark.score).max()?;
    let best_ratio = records
        .iter()
        .map(|r| r.cost_benefit_ratio)
        .min_by(|a, b| a.total_cmp(b))?;
    Some(RankingSummary {
        total: records.len(),
        max_score,
        best_ratio,
    })
}

/// Highest scores first.
pub fn top_by_score<'a>(records: &[&'a MatchedRecord], n: usize) -> Vec<&'a MatchedRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.benchmark.score.cmp(&a.benchmark.score));
    sorted.truncate(n);
    sorted
}

/// Cheapest price per point first.
pub fn top_by_ratio<'a>(records: &[&'a MatchedRecord], n: usize) -> Vec<&'a MatchedRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        a.cost_benefit_ratio
            .partial_cmp(&b.cost_benefit_ratio)
            .unwrap_or(Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}
