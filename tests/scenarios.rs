use chrono::NaiveDate;
use hardware_sniper::analyzer::{KeyNormalizer, Matcher, compute_ratios, usable_benchmarks};
use hardware_sniper::model::{
    Attr, BenchmarkEntry, Brand, Category, NormalizedProduct, RawListing, Store,
};
use hardware_sniper::normalizer::ProductNormalizer;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn raw(title: &str, price: &str, store: Store, category: Category) -> RawListing {
    RawListing {
        full_title: title.to_string(),
        cash_price: Some(price.to_string()),
        installments: Some(10),
        installment_price: None,
        link: format!("https://example.com/{}", title.len()),
        store,
        category,
    }
}

fn bench(name: &str, score: u32) -> BenchmarkEntry {
    BenchmarkEntry {
        display_name: name.to_string(),
        score,
    }
}

fn resolved(s: &str) -> Attr<String> {
    Attr::Resolved(s.to_string())
}

#[test]
fn ryzen_title_resolves_model_variant_and_socket() {
    let product = ProductNormalizer::default()
        .normalize(
            &raw("AMD Ryzen 7 7700X Processador AM5", "R$ 1.899,90", Store::Kabum, Category::Cpu),
            date(),
        )
        .unwrap();

    let NormalizedProduct::Cpu(cpu) = product else {
        panic!("expected a CPU");
    };
    assert_eq!(cpu.brand, Attr::Resolved(Brand::Amd));
    assert_eq!(cpu.base_model, resolved("7700X"));
    assert_eq!(cpu.variant, resolved("RYZEN 7"));
    assert_eq!(cpu.socket, resolved("AM5"));
    assert_eq!(cpu.listing.cash_price, 1899.90);
}

#[test]
fn core_i_title_resolves_model_and_variant() {
    let product = ProductNormalizer::default()
        .normalize(&raw("Intel Core i5-13400F", "R$ 1.099,00", Store::Pichau, Category::Cpu), date())
        .unwrap();

    let NormalizedProduct::Cpu(cpu) = product else {
        panic!("expected a CPU");
    };
    assert_eq!(cpu.brand, Attr::Resolved(Brand::Intel));
    assert_eq!(cpu.base_model, resolved("13400F"));
    assert_eq!(cpu.variant, resolved("I5"));
}

#[test]
fn geforce_title_resolves_model_and_vram() {
    let product = ProductNormalizer::default()
        .normalize(
            &raw(
                "Placa de Video RTX 4070 Super Gigabyte Windforce OC 12GB",
                "R$ 4.299,99",
                Store::Terabyte,
                Category::Gpu,
            ),
            date(),
        )
        .unwrap();

    let NormalizedProduct::Gpu(gpu) = product else {
        panic!("expected a GPU");
    };
    assert_eq!(gpu.brand, Attr::Resolved(Brand::Nvidia));
    assert_eq!(gpu.base_model, resolved("RTX 4070 SUPER"));
    assert_eq!(gpu.vram_memory, resolved("12GB"));
}

#[test]
fn catalog_row_joins_chart_label_after_stopword_strip() {
    let keys = KeyNormalizer::default();
    let product = ProductNormalizer::default()
        .normalize(&raw("AMD RYZEN 7 7700X", "R$ 1.899,90", Store::Kabum, Category::Cpu), date())
        .unwrap();

    let outcome = Matcher::new(&keys, Category::Cpu)
        .match_products(&[product], &[bench("Ryzen 7 7700X", 31_000), bench("Ryzen 5 7600X", 27_000)]);

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].benchmark.display_name, "Ryzen 7 7700X");
    assert_eq!(outcome.records[0].key.as_str(), "7 7700x");
    assert_eq!(outcome.unmatched_catalog, 0);
}

#[test]
fn cheapest_listing_per_key_survives() {
    let keys = KeyNormalizer::default();
    let normalizer = ProductNormalizer::default();
    let listings = [
        raw("AMD Ryzen 7 7700X Processador AM5", "R$ 1.500,00", Store::Kabum, Category::Cpu),
        raw("Processador AMD Ryzen 7 7700X, AM5", "R$ 1.400,00", Store::Pichau, Category::Cpu),
    ];
    let outcome = normalizer.normalize_all(&listings, date());
    assert_eq!(outcome.products.len(), 2);

    let matched = Matcher::new(&keys, Category::Cpu)
        .match_products(&outcome.products, &[bench("Ryzen 7 7700X", 31_000)]);
    assert_eq!(matched.records.len(), 1);
    assert_eq!(matched.records[0].product.cash_price(), 1400.0);
    assert_eq!(matched.records[0].product.store(), Store::Pichau);
}

#[test]
fn zero_score_benchmark_never_reaches_the_ratio() {
    let keys = KeyNormalizer::default();
    let normalizer = ProductNormalizer::default();
    let listings = [
        raw("Placa de Video RTX 4060 Galax 8GB", "R$ 1.800,00", Store::Kabum, Category::Gpu),
        raw("Placa de Video RX 7600 Sapphire Pulse 8GB", "R$ 1.600,00", Store::Kabum, Category::Gpu),
    ];
    let products = normalizer.normalize_all(&listings, date()).products;

    let (benchmarks, excluded) = usable_benchmarks(vec![bench("RTX 4060", 0), bench("RX 7600", 80)]);
    assert_eq!(excluded, 1);

    let matched = Matcher::new(&keys, Category::Gpu).match_products(&products, &benchmarks);
    let rated = compute_ratios(matched.records);

    assert_eq!(rated.records.len(), 1);
    assert_eq!(rated.records[0].benchmark.display_name, "RX 7600");
    assert_eq!(rated.records[0].cost_benefit_ratio, 20.0);
    assert!(rated.records.iter().all(|r| r.cost_benefit_ratio.is_finite()));
}

#[test]
fn out_of_stock_and_unresolved_rows_are_accounted_for() {
    let keys = KeyNormalizer::default();
    let normalizer = ProductNormalizer::default();
    let mut sold_out = raw("Placa de Video RTX 4070 Zotac 12GB", "", Store::Kabum, Category::Gpu);
    sold_out.cash_price = None;
    let listings = [
        sold_out,
        raw("Placa de Video Quadro T400 4GB", "R$ 900,00", Store::Kabum, Category::Gpu),
        raw("Placa de Video RTX 3050 Asus 6GB", "R$ 1.100,00", Store::Kabum, Category::Gpu),
    ];

    let outcome = normalizer.normalize_all(&listings, date());
    assert_eq!(outcome.out_of_stock, 1);
    assert_eq!(outcome.products.len(), 2);

    let matched = Matcher::new(&keys, Category::Gpu)
        .match_products(&outcome.products, &[bench("RTX 4070", 120)]);
    assert!(matched.records.is_empty());
    assert_eq!(matched.unkeyed_catalog, 1);
    assert_eq!(matched.unmatched_catalog, 1);
}
