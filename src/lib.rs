pub mod analyzer;
pub mod benchmarks;
pub mod config;
pub mod extract;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod scraper;
pub mod storage;
pub mod utils;
