use crate::model::{PricePoint, PriceStats};

/// Summarizes a base model's price history. `None` for an empty history.
/// Non-positive prices are ignored, as they never come from an in-stock listing.
pub fn price_stats(base_model: &str, history: &[PricePoint]) -> Option<PriceStats> {
    let points: Vec<&PricePoint> = history.iter().filter(|p| p.cash_price > 0.0).collect();
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let avg = points.iter().map(|p| p.cash_price).sum::<f64>() / count;
    let std_dev = (points
        .iter()
        .map(|p| (p.cash_price - avg).powi(2))
        .sum::<f64>()
        / count)
        .sqrt();

    let min_price = points.iter().map(|p| p.cash_price).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.cash_price).fold(f64::NEG_INFINITY, f64::max);

    // latest date wins; on the same date the cheapest store is the current price
    let latest = points.iter().copied().max_by(|a, b| {
        a.extraction_date
            .cmp(&b.extraction_date)
            .then_with(|| b.cash_price.total_cmp(&a.cash_price))
    })?;

    Some(PriceStats {
        base_model: base_model.to_string(),
        samples: points.len(),
        min_price,
        max_price,
        avg_price: avg,
        std_dev,
        latest_price: latest.cash_price,
        latest_date: latest.extraction_date,
    })
}

/// Relative change from the first recorded price to the latest one, in percent.
pub fn price_change_percent(history: &[PricePoint]) -> Option<f64> {
    let first = history.iter().min_by_key(|p| p.extraction_date)?;
    let last = history.iter().max_by_key(|p| p.extraction_date)?;
    if first.cash_price <= 0.0 {
        return None;
    }
    let change = (last.cash_price - first.cash_price) / first.cash_price * 100.0;
    Some((change * 100.0).round() / 100.0)
}
