pub mod error;
pub mod extract;
pub mod fetcher;
pub mod frontier;
pub mod resolver;
pub mod result;

pub use error::FetchError;
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use frontier::{CrawlMode, Frontier, ProgressCallback};
pub use result::{CrawlOutcome, PageMap};
