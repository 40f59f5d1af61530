pub mod extract;
pub mod schema;

pub use extract::{extract_report, narrative_text, search_queries};
pub use schema::validate_report;
