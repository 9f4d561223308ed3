use std::collections::HashMap;

/// Canonical URL -> page title, in the order pages were first recorded.
///
/// A `None` title means the page had no `<title>` when titles are being
/// collected, and simply "not tracked" when they are not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMap {
    entries: Vec<(String, Option<String>)>,
    index: HashMap<String, usize>,
}

impl PageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, url: String, title: Option<String>) -> bool {
        if self.index.contains_key(&url) {
            return false;
        }
        self.index.insert(url.clone(), self.entries.len());
        self.entries.push((url, title));
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// `Some(title)` when the URL is present, where `title` may itself be `None`.
    pub fn get(&self, url: &str) -> Option<Option<&str>> {
        self.index
            .get(url)
            .map(|&i| self.entries[i].1.as_deref())
    }

    /// Replace the title of an existing entry. No-op for unknown URLs.
    pub fn set_title(&mut self, url: &str, title: Option<String>) {
        if let Some(&i) = self.index.get(url) {
            self.entries[i].1 = title;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(url, title)| (url.as_str(), title.as_deref()))
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(url, _)| url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for PageMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut map = PageMap::new();
        for (url, title) in iter {
            map.insert(url, title);
        }
        map
    }
}

/// Everything a finished crawl hands back.
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    /// The root the crawl was bound to, canonicalized.
    pub root_url: String,
    pub pages: PageMap,
    /// Empty when the root page was never fetched successfully or had no title.
    pub root_title: String,
    pub visited_count: usize,
}
