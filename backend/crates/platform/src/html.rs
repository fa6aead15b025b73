//! Minimal HTML Helpers
//!
//! The page surface returns small hand-built documents; there is no
//! template engine. These helpers keep escaping in one place.

/// Escape text for interpolation into HTML content or attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap body markup in a bare document shell
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>{}</body></html>",
        escape(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>alert('x&y')</script>"),
            "&lt;script&gt;alert(&#x27;x&amp;y&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_escapes_title() {
        let html = page("a<b", "<p>ok</p>");
        assert!(html.contains("<title>a&lt;b</title>"));
        assert!(html.contains("<p>ok</p>"));
    }
}
