use crate::model::{
    Attr, Brand, Category, ClockSpeeds, CpuProduct, GpuProduct, Listing, NormalizedProduct,
    PricePoint, Store, StorageError,
};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};
use std::str::FromStr;
use tracing::info;

const LISTING_COLUMNS: &str =
    "extraction_date, store, cash_price, installments, installment_price, full_title, link";

const EXTENDED_CPU_COLUMNS: [(&str, &str); 5] = [
    ("cores", "INTEGER"),
    ("threads", "INTEGER"),
    ("clock_speed_base", "REAL"),
    ("clock_speed_max", "REAL"),
    ("cache_mb", "TEXT"),
];

/// Rows written by one `save_products` call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SaveSummary {
    pub inserted: usize,
    pub duplicates: usize,
}

/// Append-only price history. A row is new unless the same
/// `(extraction_date, store, base_model, cash_price)` is already stored.
/// Unresolved models are stored as NULL, which the unique index never
/// treats as equal, so two unknown products never collapse into one row.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens the database (`:memory:` works) and applies migrations.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS cpus (
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
                link TEXT NOT NULL,
                cores INTEGER,
                threads INTEGER,
                clock_speed_base REAL,
                clock_speed_max REAL,
                cache_mb TEXT
            );
            CREATE UNIQUE INDEX IF NOT EXISTS cpus_dedup
                ON cpus (extraction_date, store, base_model, cash_price);

            CREATE TABLE IF NOT EXISTS gpus (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                extraction_date TEXT NOT NULL,
                store TEXT NOT NULL,
                brand TEXT NOT NULL,
                manufacturer TEXT,
                base_model TEXT,
                custom_model TEXT NOT NULL,
                vram_memory TEXT NOT NULL,
                cash_price REAL NOT NULL,
                installments INTEGER,
                installment_price REAL,
                full_title TEXT NOT NULL,
                link TEXT NOT NULL
            );
            CREATE UNIQUE INDEX IF NOT EXISTS gpus_dedup
                ON gpus (extraction_date, store, base_model, cash_price);
            ",
        )?;

        // a cpus table holding only the listing columns gains the extended attributes
        for (column, column_def) in EXTENDED_CPU_COLUMNS {
            Self::migrate_add_column_if_missing(&conn, "cpus", column, column_def)?;
        }

        Ok(Self { conn })
    }

    fn migrate_add_column_if_missing(
        conn: &Connection,
        table: &str,
        column: &str,
        column_def: &str,
    ) -> Result<(), StorageError> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let existing_columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        if !existing_columns.iter().any(|c| c == column) {
            let alter_sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def);
            conn.execute(&alter_sql, [])?;
        }

        Ok(())
    }

    /// Appends products in one transaction, skipping rows already stored.
    pub fn save_products(&self, products: &[NormalizedProduct]) -> Result<SaveSummary, StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        let mut summary = SaveSummary::default();

        for product in products {
            let changed = match product {
                NormalizedProduct::Cpu(cpu) => Self::insert_cpu(&tx, cpu)?,
                NormalizedProduct::Gpu(gpu) => Self::insert_gpu(&tx, gpu)?,
            };
            if changed > 0 {
                summary.inserted += 1;
            } else {
                summary.duplicates += 1;
            }
        }

        tx.commit()?;
        info!(
            "Saved products: {} new, {} already stored",
            summary.inserted, summary.duplicates
        );
        Ok(summary)
    }

    fn insert_cpu(conn: &Connection, cpu: &CpuProduct) -> Result<usize, StorageError> {
        let l = &cpu.listing;
        let clock = cpu.clock.resolved();
        let changed = conn.execute(
            "INSERT OR IGNORE INTO cpus (
                extraction_date, store, brand, socket, base_model, variant,
                cash_price, installments, installment_price, full_title, link,
                cores, threads, clock_speed_base, clock_speed_max, cache_mb
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
            params![
                l.extraction_date,
                l.store.as_str(),
                cpu.brand.to_string(),
                cpu.socket.to_string(),
                cpu.base_model.resolved(),
                cpu.variant.to_string(),
                l.cash_price,
                l.installments,
                l.installment_price,
                &l.full_title,
                &l.link,
                cpu.cores.resolved(),
                cpu.threads.resolved(),
                clock.map(|c| c.base_ghz),
                clock.map(|c| c.turbo_ghz),
                cpu.cache.resolved(),
            ],
        )?;
        Ok(changed)
    }

    fn insert_gpu(conn: &Connection, gpu: &GpuProduct) -> Result<usize, StorageError> {
        let l = &gpu.listing;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO gpus (
                extraction_date, store, brand, manufacturer, base_model, custom_model,
                vram_memory, cash_price, installments, installment_price, full_title, link
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                l.extraction_date,
                l.store.as_str(),
                gpu.brand.to_string(),
                gpu.manufacturer.to_string(),
                gpu.base_model.resolved(),
                &gpu.custom_model,
                gpu.vram_memory.to_string(),
                l.cash_price,
                l.installments,
                l.installment_price,
                &l.full_title,
                &l.link,
            ],
        )?;
        Ok(changed)
    }

    /// Each store's most recent extraction. A store that failed today keeps
    /// contributing its last good snapshot.
    pub fn latest_snapshot(&self, category: Category) -> Result<Vec<NormalizedProduct>, StorageError> {
        let table = category.table();
        let columns = match category {
            Category::Cpu => "brand, socket, base_model, variant, cores, threads, \
                              clock_speed_base, clock_speed_max, cache_mb",
            Category::Gpu => "brand, manufacturer, base_model, custom_model, vram_memory",
        };
        let sql = format!(
            "SELECT {LISTING_COLUMNS}, {columns} FROM {table}
             WHERE (store, extraction_date) IN (
                 SELECT store, MAX(extraction_date) FROM {table} GROUP BY store
             )
             ORDER BY id"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| match category {
            Category::Cpu => Self::map_cpu(row),
            Category::Gpu => Self::map_gpu(row),
        })?;

        let mut products = Vec::new();
        for product in rows {
            products.push(product?);
        }
        Ok(products)
    }

    /// Every stored price for a base model, oldest first.
    pub fn price_history(
        &self,
        category: Category,
        base_model: &str,
    ) -> Result<Vec<PricePoint>, StorageError> {
        let sql = format!(
            "SELECT extraction_date, store, cash_price FROM {}
             WHERE base_model = ?1 ORDER BY extraction_date ASC, store ASC, cash_price ASC",
            category.table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![base_model], |row| {
            Ok(PricePoint {
                extraction_date: row.get(0)?,
                store: Self::store_column(row, 1)?,
                cash_price: row.get(2)?,
            })
        })?;

        let mut points = Vec::new();
        for point in rows {
            points.push(point?);
        }
        Ok(points)
    }

    /// Distinct resolved base models ever stored for a category.
    pub fn tracked_models(&self, category: Category) -> Result<Vec<String>, StorageError> {
        let sql = format!(
            "SELECT DISTINCT base_model FROM {} WHERE base_model IS NOT NULL ORDER BY base_model",
            category.table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let models = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<_, _>>()?;
        Ok(models)
    }

    pub fn snapshot_dates(&self, category: Category) -> Result<Vec<NaiveDate>, StorageError> {
        let sql = format!(
            "SELECT DISTINCT extraction_date FROM {} ORDER BY extraction_date",
            category.table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let dates = stmt
            .query_map([], |row| row.get::<_, NaiveDate>(0))?
            .collect::<Result<_, _>>()?;
        Ok(dates)
    }

    fn store_column(row: &Row, idx: usize) -> Result<Store, rusqlite::Error> {
        let text: String = row.get(idx)?;
        Store::from_str(&text).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
    }

    fn brand_column(row: &Row, name: &str) -> Result<Attr<Brand>, rusqlite::Error> {
        let text: String = row.get(name)?;
        Ok(Brand::from_str(&text).ok().into())
    }

    fn text_column(row: &Row, name: &str) -> Result<Attr<String>, rusqlite::Error> {
        Ok(Attr::from_column(row.get(name)?))
    }

    fn map_listing(row: &Row) -> Result<Listing, rusqlite::Error> {
        Ok(Listing {
            extraction_date: row.get("extraction_date")?,
            store: Self::store_column(row, 1)?,
            cash_price: row.get("cash_price")?,
            installments: row.get("installments")?,
            installment_price: row.get("installment_price")?,
            full_title: row.get("full_title")?,
            link: row.get("link")?,
        })
    }

    fn map_cpu(row: &Row) -> Result<NormalizedProduct, rusqlite::Error> {
        let base: Option<f64> = row.get("clock_speed_base")?;
        let turbo: Option<f64> = row.get("clock_speed_max")?;
        let clock = match (base, turbo) {
            (Some(base_ghz), Some(turbo_ghz)) => Attr::Resolved(ClockSpeeds { base_ghz, turbo_ghz }),
            _ => Attr::Unknown,
        };

        Ok(NormalizedProduct::Cpu(CpuProduct {
            listing: Self::map_listing(row)?,
            brand: Self::brand_column(row, "brand")?,
            socket: Self::text_column(row, "socket")?,
            base_model: Self::text_column(row, "base_model")?,
            variant: Self::text_column(row, "variant")?,
            cores: row.get::<_, Option<u32>>("cores")?.into(),
            threads: row.get::<_, Option<u32>>("threads")?.into(),
            clock,
            cache: Self::text_column(row, "cache_mb")?,
        }))
    }

    fn map_gpu(row: &Row) -> Result<NormalizedProduct, rusqlite::Error> {
        Ok(NormalizedProduct::Gpu(GpuProduct {
            listing: Self::map_listing(row)?,
            brand: Self::brand_column(row, "brand")?,
            manufacturer: Self::text_column(row, "manufacturer")?,
            base_model: Self::text_column(row, "base_model")?,
            custom_model: row.get("custom_model")?,
            vram_memory: Self::text_column(row, "vram_memory")?,
        }))
    }
}
