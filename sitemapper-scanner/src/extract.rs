use crate::resolver;
use deunicode::deunicode;
use scraper::{Html, Selector};

/// Pull the page title and every same-document link out of an HTML body.
///
/// Links are returned absolute and canonical, resolved against `base_url`
/// (the page's final URL after redirects). Document order is preserved and
/// duplicates are kept; the frontier does the deduplication.
pub fn extract(html: &str, base_url: &str) -> (Option<String>, Vec<String>) {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let title = document
        .select(&title_selector)
        .next()
        .map(|element| clean_title(&element.text().collect::<String>()))
        .filter(|title| !title.is_empty());

    let link_selector = Selector::parse("a[href]").unwrap();
    let links = document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolver::resolve(href, base_url))
        .collect();

    (title, links)
}

/// Collapse whitespace and transliterate to ASCII.
pub fn clean_title(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    deunicode(&collapsed)
}
