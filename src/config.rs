use crate::analyzer::key::DEFAULT_CPU_STOPWORDS;
use crate::extract::manufacturer::default_partners;
use crate::model::{Category, ConfigError, Store};
use crate::parser::benchmark::BenchmarkFormat;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// One listing page to scrape.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub store: Store,
    pub category: Category,
    pub url: String,
}

/// A benchmark chart page and the CSV it refreshes.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkSourceConfig {
    pub category: Category,
    pub url: String,
    pub format: BenchmarkFormat,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkPaths {
    pub cpu: PathBuf,
    pub gpu: PathBuf,
}

impl BenchmarkPaths {
    pub fn for_category(&self, category: Category) -> &PathBuf {
        match category {
            Category::Cpu => &self.cpu,
            Category::Gpu => &self.gpu,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    pub sources: Vec<SourceConfig>,
    pub benchmarks: BenchmarkPaths,
    #[serde(default)]
    pub benchmark_sources: Vec<BenchmarkSourceConfig>,
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    #[serde(default)]
    pub raw_dir: Option<PathBuf>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_partners")]
    pub manufacturers: Vec<String>,
    #[serde(default = "default_stopwords")]
    pub cpu_stopwords: Vec<String>,
    #[serde(default)]
    pub check_interval_seconds: Option<u64>,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

fn default_database_path() -> String {
    "data.db".to_string()
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_top_n() -> usize {
    10
}

fn default_stopwords() -> Vec<String> {
    DEFAULT_CPU_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

fn default_request_delay_ms() -> u64 {
    1000
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
