// Ranking and snapshot exports for the dashboard side.
use crate::model::{Category, MatchedRecord, NormalizedProduct, RawListing, ReportError, Store};
use crate::utils::to_kebab_case;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Formats a value the Brazilian way: `1234.5` -> `R$ 1.234,50`.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    model: &'a str,
    score: u32,
    cash_price: f64,
    cash_price_formatted: String,
    cost_benefit_ratio: f64,
    store: &'a str,
    brand: String,
    base_model: String,
    variant: String,
    manufacturer: String,
    link: &'a str,
    key: &'a str,
}

impl<'a> From<&'a MatchedRecord> for RankingRow<'a> {
    fn from(record: &'a MatchedRecord) -> Self {
        let product = &record.product;
        let (variant, manufacturer) = match product {
            NormalizedProduct::Cpu(cpu) => (cpu.variant.to_string(), String::new()),
            NormalizedProduct::Gpu(gpu) => (gpu.custom_model.clone(), gpu.manufacturer.to_string()),
        };
        Self {
            model: &record.benchmark.display_name,
            score: record.benchmark.score,
            cash_price: product.cash_price(),
            cash_price_formatted: format_brl(product.cash_price()),
            cost_benefit_ratio: record.cost_benefit_ratio,
            store: product.store().as_str(),
            brand: product.brand().to_string(),
            base_model: product.base_model().to_string(),
            variant,
            manufacturer,
            link: &product.listing().link,
            key: &record.key,
        }
    }
}

pub fn write_ranking<W: Write>(writer: W, records: &[&MatchedRecord]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(RankingRow::from(*record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `<dir>/<category>_ranking_<date>.csv` and returns its path.
pub fn save_ranking(
    dir: &Path,
    category: Category,
    date: NaiveDate,
    records: &[&MatchedRecord],
) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "{}_ranking_{}.csv",
        to_kebab_case(&category.to_string()),
        date.format("%Y-%m-%d")
    ));
    write_ranking(fs::File::create(&path)?, records)?;
    info!("Ranking saved: {}", path.display());
    Ok(path)
}

/// Keeps the listings exactly as scraped, one file per store, category and day.
pub fn save_raw_listings(
    dir: &Path,
    store: Store,
    category: Category,
    date: NaiveDate,
    listings: &[RawListing],
) -> Result<PathBuf, ReportError> {
    let folder = dir
        .join(to_kebab_case(store.as_str()))
        .join(format!("{}s", to_kebab_case(&category.to_string())));
    fs::create_dir_all(&folder)?;
    let path = folder.join(format!("{}.csv", date.format("%Y-%m-%d")));

    let mut wtr = csv::Writer::from_path(&path)?;
    for listing in listings {
        wtr.serialize(listing)?;
    }
    wtr.flush()?;
    Ok(path)
}
