use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use sitemapper_core::{
    CrawlOptions, OutputMode, OutputSink, RenderOptions, SiteTree, execute_crawl, render,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;
use url::Url;

/// Everything one invocation needs, pulled out of the parsed arguments.
pub struct MapRequest {
    pub base_url: String,
    pub crawl: CrawlOptions,
    pub render: RenderOptions,
    pub output: Option<PathBuf>,
    pub quiet: bool,
    pub verbosity: u8,
}

impl MapRequest {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        // clap guarantees presence of required and defaulted arguments
        let base_url = matches
            .get_one::<Url>("base_url")
            .map(Url::to_string)
            .unwrap_or_default();
        let input = matches.get_one::<PathBuf>("input").map(|p| expand_path(p));
        let output = matches.get_one::<PathBuf>("output").map(|p| expand_path(p));
        let max_urls = *matches.get_one::<usize>("max").unwrap_or(&500);
        let width = *matches.get_one::<usize>("width").unwrap_or(&60);
        let timeout_secs = *matches.get_one::<u64>("timeout").unwrap_or(&10);
        let quiet = matches.get_flag("quiet");
        let verbosity = matches.get_count("verbose");

        let mode = if matches.get_flag("pretty") {
            OutputMode::Pretty
        } else {
            OutputMode::Simple
        };

        Self {
            crawl: CrawlOptions {
                base_url: base_url.clone(),
                input,
                max_urls,
                mode,
                timeout_secs,
                show_progress: !quiet,
            },
            render: RenderOptions {
                mode,
                width,
                ..RenderOptions::default()
            },
            base_url,
            output,
            quiet,
            verbosity,
        }
    }
}

/// Expand a leading `~` in a user-supplied path
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

pub fn log_level(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Logs go to stderr; stdout is reserved for the site map.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Crawl (or load), build the tree, render it and write it out.
pub async fn handle_map(request: MapRequest) -> Result<()> {
    let mut sink = OutputSink::open(request.output.as_deref())?;
    let started = Instant::now();

    if !request.quiet {
        let source = match request.crawl.input {
            Some(ref input) => format!("from {}", input.display()),
            None => format!("up to {} URLs", request.crawl.max_urls),
        };
        eprintln!(
            "{} Mapping {} ({})",
            "→".blue(),
            request.base_url.bright_white(),
            source
        );
    }

    let outcome = execute_crawl(&request.crawl)
        .await
        .with_context(|| format!("Failed to map {}", request.base_url))?;

    let tree = SiteTree::build(&outcome.root_url, &outcome.root_title, &outcome.pages);
    let site_map = render(&tree, &request.render);

    sink.write(&site_map)?;

    if !request.quiet {
        eprintln!(
            "{} {} pages mapped in {:.1}s, written to {}",
            "✓".green().bold(),
            outcome.pages.len().to_string().cyan(),
            started.elapsed().as_secs_f64(),
            sink.describe().bright_white()
        );
    }

    Ok(())
}
