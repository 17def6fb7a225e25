// Core structs: listings, normalized products, benchmark rows, matched records
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Text written in place of an unresolved attribute at the storage/report boundary.
pub const UNKNOWN_TEXT: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Store {
    Pichau,
    Kabum,
    Terabyte,
}

impl Store {
    pub const ALL: [Store; 3] = [Store::Pichau, Store::Kabum, Store::Terabyte];

    pub fn as_str(&self) -> &'static str {
        match self {
            Store::Pichau => "Pichau",
            Store::Kabum => "Kabum",
            Store::Terabyte => "Terabyte",
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Store {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Store::ALL
            .into_iter()
            .find(|store| store.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParserError::UnknownValue(format!("store '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Cpu,
    Gpu,
}

impl Category {
    /// Table name used by the storage sink.
    pub fn table(&self) -> &'static str {
        match self {
            Category::Cpu => "cpus",
            Category::Gpu => "gpus",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Cpu => f.write_str("CPU"),
            Category::Gpu => f.write_str("GPU"),
        }
    }
}

/// Closed set of product brands. Every brand-conditioned grammar matches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Brand {
    Amd,
    Nvidia,
    Intel,
}

impl Brand {
    /// Whether the brand sells products of `category`; NVIDIA makes no CPUs.
    pub fn makes(&self, category: Category) -> bool {
        !matches!((self, category), (Brand::Nvidia, Category::Cpu))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Amd => "AMD",
            Brand::Nvidia => "NVIDIA",
            Brand::Intel => "INTEL",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Brand {
    type Err = ParserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AMD" => Ok(Brand::Amd),
            "NVIDIA" => Ok(Brand::Nvidia),
            "INTEL" => Ok(Brand::Intel),
            other => Err(ParserError::UnknownValue(format!("brand '{}'", other))),
        }
    }
}

/// Result of an extractor: either a resolved value or the documented unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Attr<T> {
    Resolved(T),
    #[default]
    Unknown,
}

impl<T> Attr<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Attr::Resolved(_))
    }

    pub fn as_ref(&self) -> Attr<&T> {
        match self {
            Attr::Resolved(v) => Attr::Resolved(v),
            Attr::Unknown => Attr::Unknown,
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Attr::Resolved(v) => Some(v),
            Attr::Unknown => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Attr::Resolved(v) => Some(v),
            Attr::Unknown => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Attr<U> {
        match self {
            Attr::Resolved(v) => Attr::Resolved(f(v)),
            Attr::Unknown => Attr::Unknown,
        }
    }
}

impl<T> From<Option<T>> for Attr<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Attr::Unknown, Attr::Resolved)
    }
}

impl<T: fmt::Display> fmt::Display for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Resolved(v) => v.fmt(f),
            Attr::Unknown => f.write_str(UNKNOWN_TEXT),
        }
    }
}

impl Attr<String> {
    /// Reads a text column back; the boundary sentinel and empty text become `Unknown`.
    pub fn from_column(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() && v != UNKNOWN_TEXT => Attr::Resolved(v),
            _ => Attr::Unknown,
        }
    }
}

/// Base and turbo clock in GHz. Both or neither are extracted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSpeeds {
    pub base_ghz: f64,
    pub turbo_ghz: f64,
}

/// Listing as captured by a store scraper. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawListing {
    pub full_title: String,
    pub cash_price: Option<String>,
    pub installments: Option<u32>,
    pub installment_price: Option<f64>,
    pub link: String,
    pub store: Store,
    pub category: Category,
}

/// Fields shared by every in-stock product regardless of category.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub full_title: String,
    pub cash_price: f64,
    pub installments: Option<u32>,
    pub installment_price: Option<f64>,
    pub link: String,
    pub store: Store,
    pub extraction_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpuProduct {
    pub listing: Listing,
    pub brand: Attr<Brand>,
    pub socket: Attr<String>,
    pub base_model: Attr<String>,
    pub variant: Attr<String>,
    pub cores: Attr<u32>,
    pub threads: Attr<u32>,
    pub clock: Attr<ClockSpeeds>,
    pub cache: Attr<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpuProduct {
    pub listing: Listing,
    pub brand: Attr<Brand>,
    pub manufacturer: Attr<String>,
    pub base_model: Attr<String>,
    pub custom_model: String,
    pub vram_memory: Attr<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedProduct {
    Cpu(CpuProduct),
    Gpu(GpuProduct),
}

impl NormalizedProduct {
    pub fn category(&self) -> Category {
        match self {
            NormalizedProduct::Cpu(_) => Category::Cpu,
            NormalizedProduct::Gpu(_) => Category::Gpu,
        }
    }

    pub fn listing(&self) -> &Listing {
        match self {
            NormalizedProduct::Cpu(cpu) => &cpu.listing,
            NormalizedProduct::Gpu(gpu) => &gpu.listing,
        }
    }

    pub fn brand(&self) -> Attr<Brand> {
        match self {
            NormalizedProduct::Cpu(cpu) => cpu.brand,
            NormalizedProduct::Gpu(gpu) => gpu.brand,
        }
    }

    pub fn base_model(&self) -> &Attr<String> {
        match self {
            NormalizedProduct::Cpu(cpu) => &cpu.base_model,
            NormalizedProduct::Gpu(gpu) => &gpu.base_model,
        }
    }

    pub fn manufacturer(&self) -> Option<&str> {
        match self {
            NormalizedProduct::Cpu(_) => None,
            NormalizedProduct::Gpu(gpu) => gpu.manufacturer.resolved().map(String::as_str),
        }
    }

    pub fn cash_price(&self) -> f64 {
        self.listing().cash_price
    }

    pub fn store(&self) -> Store {
        self.listing().store
    }

    /// Name fed to the canonical key normalizer, `None` while the model is unresolved.
    pub fn key_source(&self) -> Option<String> {
        match self {
            NormalizedProduct::Cpu(cpu) => {
                let base = cpu.base_model.resolved()?;
                let mut parts: Vec<&str> = Vec::with_capacity(3);
                if let Some(brand) = cpu.brand.resolved() {
                    parts.push(brand.as_str());
                }
                if let Some(variant) = cpu.variant.resolved() {
                    parts.push(variant);
                }
                parts.push(base);
                Some(parts.join(" "))
            }
            NormalizedProduct::Gpu(gpu) => gpu.base_model.resolved().cloned(),
        }
    }
}

/// One benchmarked model. `display_name` is the chart label verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub display_name: String,
    pub score: u32,
}

/// Product joined to its benchmark with the cost-benefit ratio (price per point, lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedRecord {
    pub key: String,
    pub product: NormalizedProduct,
    pub benchmark: BenchmarkEntry,
    pub cost_benefit_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub extraction_date: NaiveDate,
    pub store: Store,
    pub cash_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub base_model: String,
    pub samples: usize,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub std_dev: f64,
    pub latest_price: f64,
    pub latest_date: NaiveDate,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    HttpError(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected status {0}")]
    InvalidResponse(u16),
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ScraperError::Timeout
        } else {
            ScraperError::HttpError(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("html parse error: {0}")]
    HtmlParseError(String),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("unknown value: {0}")]
    UnknownValue(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
