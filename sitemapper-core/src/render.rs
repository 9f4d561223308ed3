// Site tree -> text, in one of two fixed layouts

use crate::tree::{SiteNode, SiteTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Structure only: `- name:` lines indented four spaces per level.
    #[default]
    Simple,
    /// Titles aligned in a fixed-width column.
    Pretty,
}

impl OutputMode {
    pub fn wants_titles(&self) -> bool {
        matches!(self, OutputMode::Pretty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub mode: OutputMode,
    /// Column the `#` marker is aligned to (pretty mode only).
    pub width: usize,
    pub fill: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Simple,
            width: 60,
            fill: '_',
        }
    }
}

pub fn render(tree: &SiteTree, options: &RenderOptions) -> String {
    let mut out = String::new();
    match options.mode {
        OutputMode::Pretty => {
            push_line(
                &mut out,
                pretty_root_line(&tree.root_url, &tree.root_title, options.width, options.fill),
            );
            push_line(&mut out, "|".to_string());
            render_pretty_level(&mut out, &tree.children, 1, options);
        }
        OutputMode::Simple => {
            push_line(&mut out, simple_root_line(&tree.root_url));
            render_simple_level(&mut out, &tree.children, 1);
        }
    }
    out
}

fn render_pretty_level(
    out: &mut String,
    children: &[(String, SiteNode)],
    depth: usize,
    options: &RenderOptions,
) {
    for (name, node) in children {
        push_line(
            out,
            pretty_line(depth, name, node.is_folder(), node.title(), options.width, options.fill),
        );
        if node.is_folder() {
            render_pretty_level(out, node.children(), depth + 1, options);
        }
    }
    push_line(out, "|".to_string());
}

fn render_simple_level(out: &mut String, children: &[(String, SiteNode)], depth: usize) {
    for (name, node) in children {
        push_line(out, simple_line(depth, name, !node.children().is_empty()));
        render_simple_level(out, node.children(), depth + 1);
    }
}

fn push_line(out: &mut String, line: String) {
    out.push_str(&line);
    out.push('\n');
}

/// `|` + `3*depth - 1` spaces + `|- `.
pub fn pretty_prefix(depth: usize) -> String {
    format!("|{}|- ", " ".repeat((depth * 3).saturating_sub(1)))
}

/// A space, then enough fill characters to bring the line to `width`
/// columns. Never negative: long entries just get the single space.
pub fn pretty_fill(used: usize, width: usize, fill: char) -> String {
    let count = width.saturating_sub(used + 1);
    format!(" {}", fill.to_string().repeat(count))
}

fn title_tail(title: Option<&str>) -> String {
    match title {
        Some(title) if !title.is_empty() => format!("# {}", title),
        _ => "#".to_string(),
    }
}

pub fn pretty_line(
    depth: usize,
    name: &str,
    is_folder: bool,
    title: Option<&str>,
    width: usize,
    fill: char,
) -> String {
    let prefix = pretty_prefix(depth);
    let entry = if is_folder {
        format!("{}/", name)
    } else {
        name.to_string()
    };
    let used = prefix.chars().count() + entry.chars().count();
    format!(
        "{}{}{}{}",
        prefix,
        entry,
        pretty_fill(used, width, fill),
        title_tail(title)
    )
}

pub fn pretty_root_line(root_url: &str, root_title: &str, width: usize, fill: char) -> String {
    let root = crate::tree::ensure_trailing_slash(root_url);
    let used = root.chars().count();
    format!(
        "{}{}{}",
        root,
        pretty_fill(used, width, fill),
        title_tail(Some(root_title))
    )
}

pub fn simple_line(depth: usize, name: &str, has_children: bool) -> String {
    format!(
        "{}- {}{}",
        " ".repeat(depth * 4),
        name,
        if has_children { ":" } else { "" }
    )
}

pub fn simple_root_line(root_url: &str) -> String {
    format!("{}:", root_url.strip_suffix('/').unwrap_or(root_url))
}
