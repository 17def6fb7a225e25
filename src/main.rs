use hardware_sniper::analyzer::KeyNormalizer;
use hardware_sniper::analyzer::history::{price_change_percent, price_stats};
use hardware_sniper::analyzer::ranking::{RankingFilter, summarize, top_by_ratio, top_by_score};
use hardware_sniper::benchmarks::{load_benchmarks, save_benchmarks};
use hardware_sniper::config::{AppConfig, BenchmarkSourceConfig, SourceConfig, load_config};
use hardware_sniper::extract::attributes::BrandDetector;
use hardware_sniper::model::Category;
use hardware_sniper::normalizer::ProductNormalizer;
use hardware_sniper::parser::benchmark::parse_benchmark_page;
use hardware_sniper::parser::store::{Parser, StoreParser};
use hardware_sniper::pipeline::build_ranking;
use hardware_sniper::report::{format_brl, save_ranking, save_raw_listings};
use hardware_sniper::scraper::{Scraper, ScraperImpl};
use hardware_sniper::storage::SqliteStorage;
use hardware_sniper::utils::today;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};
use futures::future::join_all;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let scraper = match ScraperImpl::new(Duration::from_millis(config.request_delay_ms)) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let normalizer = ProductNormalizer::new(BrandDetector::default(), config.manufacturers.clone());
    let keys = KeyNormalizer::new(&config.cpu_stopwords);

    let storage = match SqliteStorage::new(&config.database_path) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };

    loop {
        info!("Starting run: {} listing pages", config.sources.len());

        for source in &config.benchmark_sources {
            refresh_benchmark(source, &scraper).await;
        }

        // Stores are independent, fetch them concurrently
        let tasks: Vec<_> = config
            .sources
            .iter()
            .map(|source| process_source(source, &scraper, &normalizer, storage.clone(), &config))
            .collect();
        join_all(tasks).await;

        for category in [Category::Cpu, Category::Gpu] {
            report_category(category, &keys, storage.clone(), &config).await;
        }

        let Some(interval) = config.check_interval_seconds else {
            info!("Run finished.");
            break;
        };
        info!("Waiting {}s for the next run...", interval);
        sleep(Duration::from_secs(interval)).await;
    }
}

/// Scrapes one listing page, normalizes it and appends new rows to the history.
async fn process_source(
    source: &SourceConfig,
    scraper: &ScraperImpl,
    normalizer: &ProductNormalizer,
    storage: Arc<Mutex<SqliteStorage>>,
    config: &AppConfig,
) {
    info!("Processing {} {}", source.store, source.category);

    let parser = match StoreParser::new(source.store, source.category) {
        Ok(p) => p,
        Err(e) => {
            warn!("Parser setup failed for {}: {}", source.store, e);
            return;
        }
    };

    let html = match scraper.fetch(&source.url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Scraper error for {} {}: {}", source.store, source.category, e);
            return;
        }
    };

    let listings = match parser.parse(&html) {
        Ok(l) => l,
        Err(e) => {
            warn!("Parse error for {} {}: {}", source.store, source.category, e);
            return;
        }
    };
    info!("{} {}: {} listings scraped", source.store, source.category, listings.len());

    let date = today();
    if let Some(raw_dir) = &config.raw_dir {
        if let Err(e) = save_raw_listings(raw_dir, source.store, source.category, date, &listings) {
            warn!("Raw snapshot not saved: {}", e);
        }
    }

    let outcome = normalizer.normalize_all(&listings, date);
    if let Err(e) = storage.lock().await.save_products(&outcome.products) {
        warn!("DB save error for {} {}: {}", source.store, source.category, e);
    }
}

/// Matches the latest snapshot against benchmarks and publishes the rankings.
async fn report_category(
    category: Category,
    keys: &KeyNormalizer,
    storage: Arc<Mutex<SqliteStorage>>,
    config: &AppConfig,
) {
    let products = match storage.lock().await.latest_snapshot(category) {
        Ok(p) => p,
        Err(e) => {
            warn!("Snapshot load failed for {}: {}", category, e);
            return;
        }
    };
    if products.is_empty() {
        info!("No {} products stored yet.", category);
        return;
    }

    let path = config.benchmarks.for_category(category);
    let benchmarks = match load_benchmarks(path) {
        Ok(b) => b,
        Err(e) => {
            warn!("Benchmarks unavailable for {} ({}): {}", category, path.display(), e);
            return;
        }
    };

    let ranking = build_ranking(&products, benchmarks, keys, category);
    info!(
        "{}: {} ranked models, {} unmatched listings, {} unresolved titles, {} benchmark rows excluded",
        category,
        ranking.records.len(),
        ranking.unmatched_catalog,
        ranking.unkeyed_catalog,
        ranking.excluded_benchmarks
    );

    let visible = RankingFilter::default().apply(&ranking.records);
    if let Some(summary) = summarize(&visible) {
        info!(
            "{}: {} models | max score {} | best price per point {}",
            category,
            summary.total,
            summary.max_score,
            format_brl(summary.best_ratio)
        );
    }

    info!("Top {} {} by score:", config.top_n, category);
    for record in top_by_score(&visible, config.top_n) {
        info!(
            "  {} | {} | {} @ {}",
            record.benchmark.display_name,
            record.benchmark.score,
            format_brl(record.product.cash_price()),
            record.product.store()
        );
    }

    let best_value = top_by_ratio(&visible, config.top_n);
    info!("Top {} {} by cost-benefit:", config.top_n, category);
    for record in &best_value {
        info!(
            "  {} | {} per point | {} @ {}",
            record.benchmark.display_name,
            format_brl(record.cost_benefit_ratio),
            format_brl(record.product.cash_price()),
            record.product.store()
        );
    }

    {
        let storage_guard = storage.lock().await;
        for record in &best_value {
            let Some(base_model) = record.product.base_model().resolved() else {
                continue;
            };
            match storage_guard.price_history(category, base_model) {
                Ok(history) => {
                    if let Some(stats) = price_stats(base_model, &history) {
                        info!(
                            "  history {}: min {} | avg {} | max {} | {} samples | change {:.2}%",
                            stats.base_model,
                            format_brl(stats.min_price),
                            format_brl(stats.avg_price),
                            format_brl(stats.max_price),
                            stats.samples,
                            price_change_percent(&history).unwrap_or(0.0)
                        );
                    }
                }
                Err(e) => warn!("History lookup failed for {}: {}", base_model, e),
            }
        }
    }

    if let Err(e) = save_ranking(&config.report_dir, category, today(), &best_value) {
        warn!("Ranking export failed for {}: {}", category, e);
    }
}

/// Re-scrapes a benchmark chart and overwrites its CSV.
async fn refresh_benchmark(source: &BenchmarkSourceConfig, scraper: &ScraperImpl) {
    info!("Refreshing {} benchmark from {}", source.category, source.url);
    let html = match scraper.fetch(&source.url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Benchmark fetch failed: {}", e);
            return;
        }
    };
    match parse_benchmark_page(&html, source.format, source.category) {
        Ok(entries) => {
            if let Err(e) = save_benchmarks(&source.output, source.category, &entries) {
                warn!("Benchmark save failed: {}", e);
            }
        }
        Err(e) => warn!("Benchmark parse failed for {}: {}", source.url, e),
    }
}
