//! Link resolution and URL canonicalization.
//!
//! Every URL that enters the frontier or the result map passes through here,
//! so a directory and its `index.html` always collapse to the same key.

use url::Url;

const INDEX_FILE: &str = "index.html";

/// Resolve `href` against `base` and return the canonical absolute URL.
///
/// Returns `None` for hrefs that can never name a page (`javascript:`,
/// `mailto:`, `tel:`, bare fragments) and for anything that fails to join.
pub fn resolve(href: &str, base: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with('#')
    {
        return None;
    }

    let base_url = Url::parse(base).ok()?;
    let mut resolved = base_url.join(href).ok()?;
    canonicalize(&mut resolved);

    Some(resolved.to_string())
}

/// Strip the fragment and fold a trailing `index.html` into its directory.
pub fn canonicalize(url: &mut Url) {
    url.set_fragment(None);
    normalize_index_in_place(url);
}

/// Parse and [`canonicalize`] a URL string; `None` when it does not parse.
pub fn canonical(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    canonicalize(&mut parsed);
    Some(parsed.to_string())
}

/// `http://x/a/index.html` -> `http://x/a/`. Anything else is returned as-is.
pub fn normalize_index(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            normalize_index_in_place(&mut parsed);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

fn normalize_index_in_place(url: &mut Url) {
    let path = url.path();
    if path.ends_with(&format!("/{INDEX_FILE}")) {
        let trimmed = path[..path.len() - INDEX_FILE.len()].to_string();
        url.set_path(&trimmed);
    }
}

/// `host[:port]` of a URL; the port only appears when it is not the scheme default.
pub fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// Same as [`authority`] for a URL string; `None` when it does not parse.
pub fn authority_of(url: &str) -> Option<String> {
    Url::parse(url).ok().map(|parsed| authority(&parsed))
}

/// The root URL with `index.html` appended to its directory.
pub fn with_index_file(root: &Url) -> String {
    let mut url = root.clone();
    url.set_fragment(None);
    url.set_query(None);
    let path = url.path().to_string();
    if path.ends_with('/') {
        url.set_path(&format!("{}{}", path, INDEX_FILE));
    } else {
        url.set_path(&format!("{}/{}", path, INDEX_FILE));
    }
    url.to_string()
}
