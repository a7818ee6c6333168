//! HTML pages.

use common::protocol::SessionData;

/// Render the index page for a signed-in user, or the sign-in prompt.
pub fn index(session: Option<&SessionData>) -> String {
    let body = match session {
        Some(s) => format!(
            "<p>Signed in as <strong>{}</strong>.</p>",
            escape_html(&s.user_name)
        ),
        None => r#"<p><a href="/oauth/github/start">Sign in with GitHub</a></p>"#.to_owned(),
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>OAuth Tutorial</title></head>\n<body>\n<h1>OAuth Tutorial</h1>\n{body}\n</body>\n</html>\n"
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
