use crate::extract::attributes::{
    BrandDetector, extract_cache, extract_clock_speeds, extract_cores_threads, extract_socket,
    extract_vram,
};
use crate::extract::manufacturer::{ManufacturerStrategy, default_partners};
use crate::extract::resolver::{resolve_cpu, resolve_gpu};
use crate::model::{Category, CpuProduct, GpuProduct, Listing, NormalizedProduct, RawListing};
use crate::parser::price::parse_price;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Turns raw store listings into structured products.
#[derive(Debug, Clone)]
pub struct ProductNormalizer {
    brands: BrandDetector,
    partners: Vec<String>,
}

/// Batch result. Out-of-stock listings are counted, not returned.
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub products: Vec<NormalizedProduct>,
    pub out_of_stock: usize,
}

impl ProductNormalizer {
    pub fn new(brands: BrandDetector, partners: Vec<String>) -> Self {
        Self { brands, partners }
    }

    /// `None` when the listing has no parsable cash price.
    pub fn normalize(&self, raw: &RawListing, extraction_date: NaiveDate) -> Option<NormalizedProduct> {
        let cash_price = parse_price(raw.cash_price.as_deref())?;
        let title = raw.full_title.as_str();

        let listing = Listing {
            full_title: raw.full_title.clone(),
            cash_price,
            installments: raw.installments,
            installment_price: raw.installment_price,
            link: raw.link.clone(),
            store: raw.store,
            extraction_date,
        };
        let brand = self.brands.detect_for(title, raw.category);

        let product = match raw.category {
            Category::Cpu => {
                let model = resolve_cpu(title, brand);
                let (cores, threads) = extract_cores_threads(title);
                NormalizedProduct::Cpu(CpuProduct {
                    listing,
                    brand,
                    socket: extract_socket(title),
                    base_model: model.base_model,
                    variant: model.variant,
                    cores,
                    threads,
                    clock: extract_clock_speeds(title),
                    cache: extract_cache(title),
                })
            }
            Category::Gpu => {
                let model = resolve_gpu(title, brand);
                let strategy = ManufacturerStrategy::for_store(raw.store, &self.partners);
                NormalizedProduct::Gpu(GpuProduct {
                    listing,
                    brand,
                    manufacturer: strategy.extract(title),
                    base_model: model.base_model,
                    custom_model: model.custom_model,
                    vram_memory: extract_vram(title),
                })
            }
        };

        if !product.base_model().is_resolved() {
            debug!("Unresolved model for title: {}", title);
        }
        Some(product)
    }

    pub fn normalize_all(&self, raws: &[RawListing], extraction_date: NaiveDate) -> NormalizeOutcome {
        let mut outcome = NormalizeOutcome::default();
        for raw in raws {
            match self.normalize(raw, extraction_date) {
                Some(product) => outcome.products.push(product),
                None => outcome.out_of_stock += 1,
            }
        }
        info!(
            "Normalized {} listings: {} in stock, {} dropped as out of stock",
            raws.len(),
            outcome.products.len(),
            outcome.out_of_stock
        );
        outcome
    }
}

impl Default for ProductNormalizer {
    fn default() -> Self {
        Self::new(BrandDetector::default(), default_partners())
    }
}
