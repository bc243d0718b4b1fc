//! Small HTML building helpers shared by the page renderers.

use crate::models::NOT_SPECIFIED;

/// Escape text content. Quotes and apostrophes are left alone, and `&` is
/// only escaped where it could start a character reference, so prose like
/// `"Raw" & "Standard"` survives verbatim.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' if chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphanumeric() || *next == '#') =>
            {
                out.push_str("&amp;")
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON-LD block. `</` is escaped so the payload cannot close the script tag.
pub fn json_ld(value: &serde_json::Value) -> String {
    let json = format!("{:#}", value).replace("</", "<\\/");
    format!("<script type=\"application/ld+json\">\n{}\n</script>\n", json)
}

/// Check / cross / dash indicator for a yes-no value.
pub fn yes_no_icon(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "<span class=\"indicator yes\" aria-label=\"Yes\">✓</span>",
        Some(false) => "<span class=\"indicator no\" aria-label=\"No\">✗</span>",
        None => "<span class=\"indicator unknown\" aria-label=\"Unknown\">-</span>",
    }
}

/// Five-star strip: one filled star per whole rating point.
pub fn stars(rating: f64) -> String {
    let filled = rating.floor().clamp(0.0, 5.0) as usize;
    format!(
        "<span class=\"stars\" aria-label=\"{:.1} out of 5\">{}{}</span>",
        rating,
        "★".repeat(filled),
        "☆".repeat(5 - filled)
    )
}

/// `<ul>` of escaped items, or a placeholder paragraph for an empty list.
pub fn list_or_placeholder(items: &[String], class: &str) -> String {
    if items.is_empty() {
        return format!("<p class=\"placeholder\">{}</p>\n", NOT_SPECIFIED);
    }

    let mut out = format!("<ul class=\"{}\">\n", escape_attr(class));
    for item in items {
        out.push_str(&format!("  <li>{}</li>\n", escape_text(item)));
    }
    out.push_str("</ul>\n");
    out
}

/// Two-column table row.
pub fn table_row(label: &str, value: &str) -> String {
    format!(
        "    <tr><th scope=\"row\">{}</th><td>{}</td></tr>\n",
        escape_text(label),
        escape_text(value)
    )
}

/// Outbound link to a broker's own website.
pub fn outbound_link(url: &str, text: &str) -> String {
    format!(
        "<a class=\"cta\" href=\"{}\" target=\"_blank\" rel=\"nofollow noopener noreferrer\">{}</a>",
        escape_attr(url),
        escape_text(text)
    )
}

/// Rating with one decimal, or `-` when unknown.
pub fn rating_cell(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}", v))
        .unwrap_or_else(|| "-".to_string())
}
