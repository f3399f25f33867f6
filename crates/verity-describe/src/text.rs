//! Text helpers shared by the describer and the string differ.

/// Token substituted for a tab character.
pub const TAB_TOKEN: &str = "<<tab>>";
/// Token appended to a line terminated by `\r\n`.
pub const CRLF_TOKEN: &str = "<<CRLF>>";
/// Token appended to a line terminated by a bare `\n`.
pub const LF_TOKEN: &str = "<<LF>>";

/// Marker for text cut off by truncation.
pub const ELLIPSIS: &str = "...";

/// Replace every tab with [`TAB_TOKEN`].
pub fn render_tabs(text: &str) -> String {
    text.replace('\t', TAB_TOKEN)
}

/// Append a line ending token to every terminated line.
///
/// `"a\r\nb\n"` becomes `"a<<CRLF>>\nb<<LF>>\n"`.
pub fn render_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str(CRLF_TOKEN);
                out.push('\n');
            }
            '\n' => {
                out.push_str(LF_TOKEN);
                out.push('\n');
            }
            other => out.push(other),
        }
    }
    out
}

/// Keep at most `limit` characters of `text`, marking cut ends with `...`.
///
/// When `focus` is given the window starts a quarter of `limit` before it,
/// so the interesting part stays visible.
pub fn truncate_window(text: &str, limit: usize, focus: Option<usize>) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= limit {
        return text.to_string();
    }
    let start = focus
        .map(|f| f.saturating_sub(limit / 4))
        .unwrap_or(0)
        .min(chars.len() - limit);
    let end = start + limit;

    let mut out = String::with_capacity(limit + 2 * ELLIPSIS.len());
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push_str(ELLIPSIS);
    }
    out
}
