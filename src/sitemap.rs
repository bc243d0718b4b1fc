//! XML sitemap generation.

use crate::scanner::{PageKind, SitePage};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the sitemap inside the output directory.
pub const SITEMAP_FILE: &str = "sitemap.xml";

fn change_frequency(kind: PageKind) -> (&'static str, &'static str) {
    match kind {
        PageKind::Home => ("daily", "1.0"),
        PageKind::Broker => ("weekly", "0.8"),
        PageKind::Comparison => ("monthly", "0.6"),
        PageKind::Other => ("monthly", "0.5"),
    }
}

/// Render the sitemap. The home page is always listed first; the rest
/// follow in route order.
pub fn render_sitemap(site_url: &str, pages: &[SitePage], lastmod: &str) -> String {
    let base = site_url.trim_end_matches('/');
    let mut entries: Vec<(&str, PageKind)> = vec![("/", PageKind::Home)];

    let mut rest: Vec<&SitePage> = pages.iter().filter(|p| p.kind != PageKind::Home).collect();
    rest.sort_by(|a, b| a.route.cmp(&b.route));
    rest.dedup_by(|a, b| a.route == b.route);
    entries.extend(rest.iter().map(|p| (p.route.as_str(), p.kind)));

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for (route, kind) in entries {
        let (changefreq, priority) = change_frequency(kind);
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}{}</loc>\n", escape_xml(base), escape_xml(route)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render the sitemap for `pages` and write it to `<out_dir>/sitemap.xml`.
pub fn write_sitemap(
    out_dir: &Path,
    site_url: &str,
    pages: &[SitePage],
    lastmod: &str,
) -> Result<PathBuf> {
    let path = out_dir.join(SITEMAP_FILE);
    let xml = render_sitemap(site_url, pages, lastmod);

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;
    std::fs::write(&path, xml)
        .with_context(|| format!("Failed to write sitemap: {}", path.display()))?;

    info!("Wrote sitemap with {} page(s) to {}", pages.len(), path.display());
    Ok(path)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(route: &str, kind: PageKind) -> SitePage {
        SitePage {
            route: route.to_string(),
            kind,
            path: PathBuf::from(format!("site{}/index.html", route)),
        }
    }

    #[test]
    fn test_render_sitemap_priorities() {
        let pages = vec![
            page("/compare/xm-vs-ic-markets", PageKind::Comparison),
            page("/broker/xm", PageKind::Broker),
            page("/", PageKind::Home),
        ];
        let xml = render_sitemap("https://brokeranalysis.com/", &pages, "2023-05-15");

        let home = xml.find("<loc>https://brokeranalysis.com/</loc>").unwrap();
        let broker = xml.find("<loc>https://brokeranalysis.com/broker/xm</loc>").unwrap();
        let compare = xml
            .find("<loc>https://brokeranalysis.com/compare/xm-vs-ic-markets</loc>")
            .unwrap();
        assert!(home < broker && broker < compare);

        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.contains("<changefreq>daily</changefreq>\n    <priority>1.0</priority>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>\n    <priority>0.8</priority>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>\n    <priority>0.6</priority>"));
        assert!(xml.contains("<lastmod>2023-05-15</lastmod>"));
    }

    #[test]
    fn test_home_listed_without_pages() {
        let xml = render_sitemap("https://brokeranalysis.com", &[], "2023-05-15");
        assert_eq!(xml.matches("<url>").count(), 1);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = vec![page("/broker/b", PageKind::Broker), page("/broker/a", PageKind::Broker)];
        let b = vec![page("/broker/a", PageKind::Broker), page("/broker/b", PageKind::Broker)];
        assert_eq!(
            render_sitemap("https://x.example", &a, "2024-01-01"),
            render_sitemap("https://x.example", &b, "2024-01-01")
        );
    }

    #[test]
    fn test_write_sitemap() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sitemap(dir.path(), "https://x.example", &[], "2024-01-01").unwrap();
        assert_eq!(path, dir.path().join(SITEMAP_FILE));
        assert!(std::fs::read_to_string(path).unwrap().contains("<urlset"));
    }
}
