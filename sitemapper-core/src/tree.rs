// Flat URL map -> nested site tree keyed by path segment

use sitemapper_scanner::PageMap;
use sitemapper_scanner::resolver::authority;
use url::Url;

/// Children of a folder, in the order their segments were first seen.
pub type Children = Vec<(String, SiteNode)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteNode {
    File {
        title: Option<String>,
    },
    Folder {
        title: Option<String>,
        children: Children,
    },
}

impl SiteNode {
    pub fn title(&self) -> Option<&str> {
        match self {
            SiteNode::File { title } | SiteNode::Folder { title, .. } => title.as_deref(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, SiteNode::Folder { .. })
    }

    /// Empty for files.
    pub fn children(&self) -> &[(String, SiteNode)] {
        match self {
            SiteNode::File { .. } => &[],
            SiteNode::Folder { children, .. } => children,
        }
    }

    pub fn child(&self, name: &str) -> Option<&SiteNode> {
        self.children()
            .iter()
            .find(|(segment, _)| segment == name)
            .map(|(_, node)| node)
    }
}

/// The root folder, bound to the site's root URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTree {
    /// Always ends in `/`.
    pub root_url: String,
    pub root_title: String,
    pub children: Children,
}

impl SiteTree {
    pub fn new(root_url: &str, root_title: &str) -> Self {
        Self {
            root_url: ensure_trailing_slash(root_url),
            root_title: root_title.to_string(),
            children: Vec::new(),
        }
    }

    /// Build the tree for every URL in `pages`, in map order.
    pub fn build(root_url: &str, root_title: &str, pages: &PageMap) -> Self {
        let mut tree = Self::new(root_url, root_title);
        for (url, title) in pages.iter() {
            tree.insert(url, title, pages);
        }
        tree
    }

    pub fn child(&self, name: &str) -> Option<&SiteNode> {
        self.children
            .iter()
            .find(|(segment, _)| segment == name)
            .map(|(_, node)| node)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn insert(&mut self, url: &str, title: Option<&str>, pages: &PageMap) {
        let Ok(parsed) = Url::parse(url) else {
            return;
        };
        let origin = format!("{}://{}/", parsed.scheme(), authority(&parsed));
        let path = parsed.path();
        let segments = normalize_path(path);

        let (folders, file) = if path.ends_with('/') {
            (segments.as_slice(), None)
        } else {
            match segments.split_last() {
                Some((last, init)) => (init, Some(last)),
                None => return,
            }
        };

        let mut children = &mut self.children;
        let mut joined = String::new();

        for folder in folders {
            joined.push_str(folder);
            joined.push('/');

            let folder_url = format!("{}{}", origin, joined);
            let idx = match children.iter().position(|(segment, _)| segment == folder) {
                Some(idx) => idx,
                None => {
                    children.push((
                        folder.clone(),
                        SiteNode::Folder {
                            title: lookup_title(pages, &folder_url),
                            children: Vec::new(),
                        },
                    ));
                    children.len() - 1
                }
            };

            children =
                promote_to_folder(&mut children[idx].1, || lookup_title(pages, &folder_url));
        }

        if let Some(file) = file
            && !children.iter().any(|(segment, _)| segment == file)
        {
            children.push((
                file.clone(),
                SiteNode::File {
                    title: title.map(str::to_string),
                },
            ));
        }
    }
}

/// Turn a file node into a folder in place. The folder's title comes from its
/// own `.../` URL, never from the file it replaced.
fn promote_to_folder(
    node: &mut SiteNode,
    folder_title: impl FnOnce() -> Option<String>,
) -> &mut Children {
    if !node.is_folder() {
        *node = SiteNode::Folder {
            title: folder_title(),
            children: Vec::new(),
        };
    }
    match node {
        SiteNode::Folder { children, .. } => children,
        SiteNode::File { .. } => unreachable!("node was promoted to a folder"),
    }
}

fn lookup_title(pages: &PageMap, url: &str) -> Option<String> {
    pages.get(url).flatten().map(str::to_string)
}

/// Split a URL path into segments, dropping empty and `.` segments and
/// resolving `..` against the segment before it.
pub fn normalize_path(path: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }
    segments
}

pub fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
