pub mod cff;

pub use cff::{parse_citation, CitationRecord};
