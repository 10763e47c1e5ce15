//! Server-rendered page components. Each renders to an HTML fragment string; the
//! gateway stitches fragments into pages and serves the htmx/SSE round-trips.

mod faq;
mod word_reveal;

pub use faq::{FaqItem, FaqProps};
pub use word_reveal::{MountedReveal, WordReveal, REVEAL_DELAY, WORD_STAGGER};

/// Escapes text for HTML element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escaped() {
        let out = html_escape(r#"<script>"x" & y</script>"#);
        assert!(!out.contains("<script>"));
        assert_eq!(out, "&lt;script&gt;&quot;x&quot; &amp; y&lt;/script&gt;");
    }
}
