pub mod sqlite;

pub use sqlite::{SaveSummary, SqliteStorage};
