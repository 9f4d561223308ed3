pub mod crawl;
pub mod error;
pub mod input;
pub mod output;
pub mod render;
pub mod tree;

pub use crawl::{CrawlOptions, execute_crawl, extract_url_path, title_pages};
pub use error::SiteMapError;
pub use input::{load_page_list, read_page_list};
pub use output::OutputSink;
pub use render::{OutputMode, RenderOptions, render};
pub use tree::{SiteNode, SiteTree};
