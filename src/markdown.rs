//! Markdown Preview Renderer
//!
//! pulldown-cmark with tables, strikethrough and task lists, plus:
//! - Syntax highlighting for fenced code (syntect)
//! - Raw HTML in the source shown as text
//! - Absolute http(s) links open in a new tab
//! - Links and images with other schemes (`javascript:`, `data:`) point at `#`

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Option<Theme>> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    THEME
        .get_or_init(|| ThemeSet::load_defaults().themes.remove("InspiredGitHub"))
        .as_ref()
}

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a long-text field for the preview pane
pub fn render_markdown(text: &str) -> String {
    let events = transform_events(Parser::new_ext(text, options()));
    let mut html = String::new();
    push_html(&mut html, events.into_iter());
    html
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    /// Link rendered by hand; children pass through until its end
    InExternalLink,
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }
                Event::Start(Tag::Link { link_type, dest_url, title, .. })
                    if link_type != LinkType::Email && is_external(&dest_url) =>
                {
                    events.push(Event::Html(CowStr::from(external_anchor(&dest_url, &title))));
                    state = State::InExternalLink;
                }
                Event::Start(Tag::Link { link_type, dest_url, title, id }) if !is_safe_url(&dest_url) => {
                    events.push(Event::Start(Tag::Link { link_type, dest_url: CowStr::from("#"), title, id }));
                }
                Event::Start(Tag::Image { link_type, dest_url, title, id }) if !is_safe_url(&dest_url) => {
                    events.push(Event::Start(Tag::Image { link_type, dest_url: CowStr::from("#"), title, id }));
                }
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },

            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },

            State::InExternalLink => match event {
                Event::End(TagEnd::Link) => {
                    events.push(Event::Html(CowStr::from("</a>")));
                    state = State::Normal;
                }
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },
        }
    }

    events
}

fn is_external(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Relative targets and http(s)/mailto/tel only. Browsers ignore
/// whitespace and control characters inside a scheme, so those are
/// stripped before looking at it.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    // A ':' after a path, query or fragment delimiter is not a scheme
    if cleaned[..colon].contains(['/', '?', '#']) {
        return true;
    }
    matches!(&cleaned[..colon], "http" | "https" | "mailto" | "tel")
}

fn external_anchor(url: &str, title: &str) -> String {
    let mut html = format!(r#"<a href="{}""#, escape_html(url));
    if !title.is_empty() {
        html.push_str(&format!(r#" title="{}""#, escape_html(title)));
    }
    html.push_str(r#" target="_blank" rel="noopener noreferrer">"#);
    html
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_markdown("# Title\n\nSome *text*");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>\n\nhi <b>there</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_external_links_open_new_tab() {
        let html = render_markdown("[site](https://example.com) and [local](/about)");
        assert!(html.contains(r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a>"#));
        assert!(html.contains(r#"<a href="/about">local</a>"#));
    }

    #[test]
    fn test_unsafe_link_schemes_neutralized() {
        let html = render_markdown("[x](javascript:alert(1)) [y](JavaScript:alert(2)) ![z](data:text/html,hi)");
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(!html.contains("data:"));
        assert!(html.contains(r##"<a href="#">x</a>"##));
        assert!(html.contains(r##"<img src="#""##));
    }

    #[test]
    fn test_safe_url_shapes() {
        assert!(is_safe_url("/about"));
        assert!(is_safe_url("notes/a:b"));
        assert!(is_safe_url("#top"));
        assert!(is_safe_url("mailto:me@example.com"));
        assert!(is_safe_url("HTTPS://example.com"));
        assert!(!is_safe_url("java\tscript:alert(1)"));
        assert!(!is_safe_url(" vbscript:msgbox"));
    }

    #[test]
    fn test_code_block_highlighted() {
        let html = render_markdown("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_extensions() {
        let html = render_markdown("~~old~~\n\n- [x] done\n\n| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("checkbox"));
        assert!(html.contains("<table>"));
    }
}
