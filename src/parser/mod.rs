// Parsers: price text, store listing pages, benchmark chart pages

pub mod price;
pub mod store;
pub mod benchmark;
