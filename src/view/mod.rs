use axum::response::Html;
use std::borrow::Cow;

pub mod boundary;
pub mod form;
pub mod listing;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
.input { width: 100%; box-sizing: border-box; border: 1px solid #6b7280; border-radius: 4px; padding: 4px 8px; font-size: 1.125rem; }
.mono { font-family: ui-monospace, monospace; }
.error { color: #dc2626; }
.actions { display: flex; justify-content: flex-end; gap: 1rem; }
.button { border: 0; border-radius: 4px; padding: 8px 16px; color: white; background: #3b82f6; }
.button:disabled { background: #93c5fd; }
.button.danger { background: #ef4444; }
.button.danger:disabled { background: #fca5a5; }
";

pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    ))
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    const SPECIAL: [char; 5] = ['<', '>', '&', '"', '\''];
    if !text.contains(SPECIAL) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    Cow::Owned(escaped)
}
