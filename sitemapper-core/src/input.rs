// Pre-supplied URL lists, as an alternative to crawling

use crate::error::{Result, SiteMapError};
use sitemapper_scanner::PageMap;
use sitemapper_scanner::resolver::{authority, canonicalize, normalize_index};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// Load a newline-delimited URL list, consuming at most `max_urls + 1` lines.
pub fn load_page_list(path: &Path, root_url: &str, max_urls: usize) -> Result<PageMap> {
    let input_error = |source| SiteMapError::Input {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(input_error)?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines().take(max_urls.saturating_add(1)) {
        lines.push(line.map_err(input_error)?);
    }

    debug!("Read {} lines from {}", lines.len(), path.display());
    read_page_list(lines, root_url)
}

/// Canonicalize listed URLs into a page map (titles unknown).
///
/// Blank lines are ignored. `.../index.html` collapses to `.../`. The root
/// itself, unparseable lines and other hosts are left out.
pub fn read_page_list<I, S>(lines: I, root_url: &str) -> Result<PageMap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root =
        Url::parse(root_url).map_err(|e| SiteMapError::InvalidUrl(format!("{}: {}", root_url, e)))?;
    canonicalize(&mut root);
    let domain = authority(&root);
    let root_url = root.to_string();
    let root_index = normalize_index(&root_url);

    let mut pages = PageMap::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let mut url = match Url::parse(line) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping invalid URL '{}': {}", line, e);
                continue;
            }
        };
        canonicalize(&mut url);

        if authority(&url) != domain {
            warn!("Skipping {} (outside {})", url, domain);
            continue;
        }

        let url = url.to_string();
        if url == root_url || url == root_index {
            continue;
        }

        pages.insert(url, None);
    }

    Ok(pages)
}
