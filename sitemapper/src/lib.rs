pub mod commands;
pub mod handlers;

pub use commands::command_argument_builder;
pub use handlers::{MapRequest, handle_map, init_logging, log_level};

// Re-export the pipeline pieces from sitemapper-core
pub use sitemapper_core::{
    CrawlOptions, OutputMode, RenderOptions, SiteTree, execute_crawl, render,
};
