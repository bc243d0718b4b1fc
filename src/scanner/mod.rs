//! Scanner for pages already written to the output directory.
//!
//! The sitemap is built from what is on disk rather than from the catalog,
//! so pages from earlier runs (and comparison pages) are picked up too.

use crate::cli::OutputFormat;
use anyhow::Result;
use clap::ValueEnum;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Page file stem looked for in every route directory.
const PAGE_STEM: &str = "index";

/// Kind of page, derived from the first route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PageKind {
    Home,
    Broker,
    Comparison,
    Other,
}

/// A page found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePage {
    /// Site route, e.g. `/broker/xm`; `/` for the home page.
    pub route: String,
    pub kind: PageKind,
    pub path: PathBuf,
}

/// Walks a generated site directory.
pub struct SiteScanner {
    root: PathBuf,
}

impl SiteScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every `index.<ext>` page under the root, for any output format,
    /// sorted by route. A route with pages in several formats is listed
    /// once. A missing root yields no pages.
    pub fn pages(&self) -> Result<Vec<SitePage>> {
        if !self.root.is_dir() {
            debug!("Site directory {} does not exist", self.root.display());
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_page_file(entry.path()) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path());
            let route = route_for(relative);
            debug!("Found page {} at {}", route, entry.path().display());

            pages.push(SitePage {
                kind: kind_of(&route),
                route,
                path: entry.path().to_path_buf(),
            });
        }

        pages.sort_by(|a, b| a.route.cmp(&b.route).then_with(|| a.path.cmp(&b.path)));
        pages.dedup_by(|a, b| a.route == b.route);
        Ok(pages)
    }
}

fn is_page_file(path: &Path) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let ext = path.extension().and_then(|e| e.to_str());

    match (stem, ext) {
        (Some(PAGE_STEM), Some(ext)) => OutputFormat::value_variants()
            .iter()
            .any(|format| format.extension() == ext),
        _ => false,
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Route of a page file relative to the site root.
fn route_for(relative: &Path) -> String {
    let segments: Vec<String> = relative
        .parent()
        .map(|dir| {
            dir.components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().to_string()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    format!("/{}", segments.join("/"))
}

fn kind_of(route: &str) -> PageKind {
    match route.trim_start_matches('/').split('/').next() {
        Some("") => PageKind::Home,
        Some("broker") => PageKind::Broker,
        Some("compare") => PageKind::Comparison,
        _ => PageKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<html></html>").unwrap();
    }

    #[test]
    fn test_pages_sorted_with_routes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "broker/xm/index.html");
        touch(dir.path(), "broker/fxopen/index.html");
        touch(dir.path(), "compare/xm-vs-ic-markets/index.html");
        touch(dir.path(), "index.html");
        touch(dir.path(), "broker/xm/index.md");
        touch(dir.path(), ".cache/broker/index.html");

        let pages = SiteScanner::new(dir.path()).pages().unwrap();
        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(
            routes,
            vec!["/", "/broker/fxopen", "/broker/xm", "/compare/xm-vs-ic-markets"]
        );
        assert_eq!(pages[0].kind, PageKind::Home);
        assert_eq!(pages[1].kind, PageKind::Broker);
        assert_eq!(pages[3].kind, PageKind::Comparison);
    }

    #[test]
    fn test_markdown_and_json_sites() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "broker/xm/index.md");
        touch(dir.path(), "broker/fxopen/index.md");
        touch(dir.path(), "compare/xm-vs-fxopen/index.json");
        touch(dir.path(), "broker/xm/notes.md");
        touch(dir.path(), "broker/xm/index.txt");

        let pages = SiteScanner::new(dir.path()).pages().unwrap();
        let routes: Vec<&str> = pages.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(
            routes,
            vec!["/broker/fxopen", "/broker/xm", "/compare/xm-vs-fxopen"]
        );

        let xml = crate::sitemap::render_sitemap("https://x.example", &pages, "2024-01-01");
        assert_eq!(xml.matches("<url>").count(), 4);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let pages = SiteScanner::new(dir.path().join("nope")).pages().unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(kind_of("/"), PageKind::Home);
        assert_eq!(kind_of("/broker/xm"), PageKind::Broker);
        assert_eq!(kind_of("/compare/a-vs-b"), PageKind::Comparison);
        assert_eq!(kind_of("/about"), PageKind::Other);
    }
}
