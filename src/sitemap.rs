//! Sitemap generation.
//!
//! Lists the static pages (home, about, the post listing) followed by one
//! entry per post:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/hello</loc>
//!     <lastmod>2025-01-01T00:00:00.000Z</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.7</priority>
//!   </url>
//! </urlset>
//! ```

use url::Url;

use crate::date;
use crate::post::PostSummary;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Single URL entry in the sitemap
struct UrlEntry {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

/// Renders the sitemap for `posts`. `site_url` must end in `/` (as
/// [`crate::config::Config::site_url`] does). The post listing's `lastmod`
/// is the newest post date, or `static_last_modified` when there are no
/// posts. Fails if any post date doesn't normalize.
pub fn render(
    site_url: &Url,
    posts_path: &str,
    posts: &[PostSummary],
    static_last_modified: &str,
) -> date::Result<String> {
    let site = site_url.as_str().trim_end_matches('/');

    let listing_lastmod = match posts.iter().map(|p| p.meta.date.as_str()).max() {
        Some(newest) => date::normalize(newest)?,
        None => static_last_modified.to_owned(),
    };

    let mut urls = vec![
        UrlEntry {
            loc: format!("{}/", site),
            lastmod: static_last_modified.to_owned(),
            changefreq: "weekly",
            priority: "1.0",
        },
        UrlEntry {
            loc: format!("{}/about", site),
            lastmod: static_last_modified.to_owned(),
            changefreq: "monthly",
            priority: "0.8",
        },
        UrlEntry {
            loc: format!("{}/{}", site, posts_path),
            lastmod: listing_lastmod,
            changefreq: "daily",
            priority: "0.9",
        },
    ];

    for post in posts {
        urls.push(UrlEntry {
            loc: format!("{}/{}/{}", site, posts_path, post.slug),
            lastmod: date::normalize(&post.meta.date)?,
            changefreq: "monthly",
            priority: "0.7",
        });
    }

    Ok(into_xml(urls))
}

fn into_xml(urls: Vec<UrlEntry>) -> String {
    let mut xml = String::with_capacity(256 * (urls.len() + 1));

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{}">"#, SITEMAP_NS));
    xml.push('\n');

    for entry in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            escape_xml(&entry.lastmod)
        ));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
