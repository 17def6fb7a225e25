pub mod attributes;
pub mod manufacturer;
pub mod resolver;
