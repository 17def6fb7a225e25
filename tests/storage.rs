use chrono::NaiveDate;
use hardware_sniper::model::{
    Attr, Brand, Category, CpuProduct, GpuProduct, Listing, NormalizedProduct, RawListing, Store,
};
use hardware_sniper::normalizer::ProductNormalizer;
use hardware_sniper::storage::{SaveSummary, SqliteStorage};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
}

fn listing(title: &str, price: f64, store: Store, date: NaiveDate) -> Listing {
    Listing {
        full_title: title.to_string(),
        cash_price: price,
        installments: Some(12),
        installment_price: Some(price / 12.0),
        link: format!("https://{}.example/{}", store.as_str().to_lowercase(), price),
        store,
        extraction_date: date,
    }
}

fn gpu(base: &str, price: f64, store: Store, date: NaiveDate) -> NormalizedProduct {
    NormalizedProduct::Gpu(GpuProduct {
        listing: listing(&format!("Placa de Video {} 8GB", base), price, store, date),
        brand: Attr::Resolved(Brand::Nvidia),
        manufacturer: Attr::Unknown,
        base_model: Attr::Resolved(base.to_string()),
        custom_model: "Dual".to_string(),
        vram_memory: Attr::Resolved("8GB".to_string()),
    })
}

fn cpu(price: f64, store: Store, date: NaiveDate) -> NormalizedProduct {
    NormalizedProduct::Cpu(CpuProduct {
        listing: listing("AMD Ryzen 5 7600 AM5", price, store, date),
        brand: Attr::Resolved(Brand::Amd),
        socket: Attr::Resolved("AM5".to_string()),
        base_model: Attr::Resolved("7600".to_string()),
        variant: Attr::Resolved("RYZEN 5".to_string()),
        cores: Attr::Resolved(6),
        threads: Attr::Resolved(12),
        clock: Attr::Unknown,
        cache: Attr::Unknown,
    })
}

fn raw_gpu(title: &str) -> RawListing {
    RawListing {
        full_title: title.to_string(),
        cash_price: Some("R$ 999,00".to_string()),
        installments: None,
        installment_price: None,
        link: format!("https://www.terabyteshop.com.br/produto/{}", title.len()),
        store: Store::Terabyte,
        category: Category::Gpu,
    }
}

#[test]
fn same_day_same_price_is_stored_once() {
    let storage = SqliteStorage::new(":memory:").unwrap();
    let rows = vec![gpu("RTX 4060", 1799.0, Store::Kabum, day(1))];

    assert_eq!(
        storage.save_products(&rows).unwrap(),
        SaveSummary { inserted: 1, duplicates: 0 }
    );
    assert_eq!(
        storage.save_products(&rows).unwrap(),
        SaveSummary { inserted: 0, duplicates: 1 }
    );

    // a new price on the same day is history, not a duplicate
    let summary = storage
        .save_products(&[gpu("RTX 4060", 1749.0, Store::Kabum, day(1))])
        .unwrap();
    assert_eq!(summary.inserted, 1);
}

#[test]
fn snapshot_round_trips_products() {
    let storage = SqliteStorage::new(":memory:").unwrap();
    let saved = vec![cpu(1199.0, Store::Pichau, day(2)), gpu("RTX 4060", 1799.0, Store::Kabum, day(2))];
    storage.save_products(&saved).unwrap();

    let cpus = storage.latest_snapshot(Category::Cpu).unwrap();
    assert_eq!(cpus, vec![saved[0].clone()]);

    let gpus = storage.latest_snapshot(Category::Gpu).unwrap();
    assert_eq!(gpus, vec![saved[1].clone()]);
}

#[test]
fn snapshot_takes_each_store_latest_day() {
    let storage = SqliteStorage::new(":memory:").unwrap();
    storage
        .save_products(&[
            gpu("RTX 4060", 1900.0, Store::Kabum, day(1)),
            gpu("RTX 4060", 1850.0, Store::Kabum, day(3)),
            gpu("RTX 4060", 1800.0, Store::Pichau, day(2)),
        ])
        .unwrap();

    let snapshot = storage.latest_snapshot(Category::Gpu).unwrap();
    let mut seen: Vec<(Store, NaiveDate)> = snapshot
        .iter()
        .map(|p| (p.store(), p.listing().extraction_date))
        .collect();
    seen.sort();
    assert_eq!(seen, vec![(Store::Pichau, day(2)), (Store::Kabum, day(3))]);
}

#[test]
fn history_and_tracked_models() {
    let storage = SqliteStorage::new(":memory:").unwrap();
    let mut unresolved = gpu("x", 700.0, Store::Terabyte, day(1));
    if let NormalizedProduct::Gpu(g) = &mut unresolved {
        g.base_model = Attr::Unknown;
    }
    storage
        .save_products(&[
            gpu("RTX 4060", 1900.0, Store::Kabum, day(1)),
            gpu("RTX 4060", 1850.0, Store::Kabum, day(3)),
            gpu("RX 7600", 1500.0, Store::Terabyte, day(2)),
            unresolved,
        ])
        .unwrap();

    let history = storage.price_history(Category::Gpu, "RTX 4060").unwrap();
    let prices: Vec<f64> = history.iter().map(|p| p.cash_price).collect();
    assert_eq!(prices, vec![1900.0, 1850.0]);
    assert_eq!(history[0].extraction_date, day(1));

    assert_eq!(
        storage.tracked_models(Category::Gpu).unwrap(),
        vec!["RTX 4060".to_string(), "RX 7600".to_string()]
    );
    assert_eq!(
        storage.snapshot_dates(Category::Gpu).unwrap(),
        vec![day(1), day(2), day(3)]
    );
    assert!(storage.tracked_models(Category::Cpu).unwrap().is_empty());
}

#[test]
fn unresolved_models_never_collapse_into_one_row() {
    let storage = SqliteStorage::new(":memory:").unwrap();
    let normalizer = ProductNormalizer::default();
    let listings = [
        raw_gpu("Placa de Video PNY Quadro T1000 8GB"),
        raw_gpu("Placa de Video Quadro T400 4GB"),
    ];
    let products = normalizer.normalize_all(&listings, day(4)).products;
    assert!(products.iter().all(|p| !p.base_model().is_resolved()));

    let summary = storage.save_products(&products).unwrap();
    assert_eq!(summary, SaveSummary { inserted: 2, duplicates: 0 });

    let stored = storage.latest_snapshot(Category::Gpu).unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|p| *p.base_model() == Attr::Unknown));
    assert!(storage.tracked_models(Category::Gpu).unwrap().is_empty());
}

#[test]
fn listing_only_cpu_table_gains_extended_columns() {
    let path = std::env::temp_dir().join(format!("hardware-sniper-migrate-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE cpus (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                extraction_date TEXT NOT NULL,
                store TEXT NOT NULL,
                brand TEXT NOT NULL,
                socket TEXT NOT NULL,
                base_model TEXT,
                variant TEXT NOT NULL,
                cash_price REAL NOT NULL,
                installments INTEGER,
                installment_price REAL,
                full_title TEXT NOT NULL,
                link TEXT NOT NULL
            );",
        )
        .unwrap();
    }

    let storage = SqliteStorage::new(path.to_str().unwrap()).unwrap();
    let saved = cpu(1199.0, Store::Kabum, day(5));
    storage.save_products(&[saved.clone()]).unwrap();
    assert_eq!(storage.latest_snapshot(Category::Cpu).unwrap(), vec![saved]);

    drop(storage);
    std::fs::remove_file(&path).unwrap();
}
