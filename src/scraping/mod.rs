//! Reading maker pages: the outbound fetch plus the permissive tag/attribute scanning
//! the content checks run on.

pub mod attributes;
pub mod fetch;
pub mod tags;

pub use attributes::{parse_attributes, ParsedTag};
pub use fetch::{FetchError, FetchedPage, PageFetcher};
pub use tags::{scan_tags, TagKind, TagScanner};
