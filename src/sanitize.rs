//! Minimal allow-list markup filter for `custom_html` and `richtext`
//! content. Not a general HTML sandbox: unknown tags are dropped (their text
//! survives), script and style blocks are removed with their content, and
//! every attribute is stripped except a scheme-checked `href` on `<a>`.

use regex::Regex;
use std::sync::OnceLock;

/// Tags kept by the custom-markup filter.
const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "i", "em", "strong", "u", "p", "br", "span", "ul", "ol", "li", "h1", "h2", "h3",
];

/// Inline subset kept by the richtext filter.
const ALLOWED_INLINE_TAGS: &[&str] = &["a", "b", "i", "em", "strong", "u", "span", "br"];

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap()
    })
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").unwrap())
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<\s*(/?)\s*([a-zA-Z][a-zA-Z0-9]*)([^>]*)>").unwrap())
}

fn href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)href\s*=\s*["']([^"']*)["']"#).unwrap())
}

fn href_is_safe(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:")
}

fn filter_markup(input: &str, allowed: &[&str]) -> String {
    // Dangerous blocks and comments go first, content included
    let stripped = block_re().replace_all(input, "");
    let stripped = comment_re().replace_all(&stripped, "");

    let out = tag_re().replace_all(&stripped, |caps: &regex::Captures| {
        let closing = !caps[1].is_empty();
        let name = caps[2].to_ascii_lowercase();
        if !allowed.contains(&name.as_str()) {
            return String::new();
        }
        if closing {
            return format!("</{}>", name);
        }
        // Attributes are dropped wholesale; `<a>` keeps a checked href
        if name == "a" {
            if let Some(href) = href_re().captures(&caps[3]).map(|c| c[1].to_string()) {
                if href_is_safe(&href) {
                    return format!("<a href=\"{}\">", href);
                }
            }
            return "<a>".to_string();
        }
        format!("<{}>", name)
    });

    out.trim().to_string()
}

/// Filter custom markup down to the structural allow-list.
pub fn sanitize_html(input: &str) -> String {
    filter_markup(input, ALLOWED_TAGS)
}

/// Filter rich text down to the inline allow-list.
pub fn sanitize_inline(input: &str) -> String {
    filter_markup(input, ALLOWED_INLINE_TAGS)
}
