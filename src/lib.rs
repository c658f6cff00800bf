//! autocite: Harvard reference generator for web pages
//!
//! Commands:
//! - cite: Generate Harvard references for a list of URLs

pub mod cite;
pub mod extract;
pub mod fetch;
pub mod page;
pub mod schema;

pub use cite::{cite_page, cite_urls, CiteConfig, CiteReport, CiteResult};
pub use fetch::{FetchConfig, FetchError, Fetcher};
pub use page::Page;
pub use schema::StructuredData;
