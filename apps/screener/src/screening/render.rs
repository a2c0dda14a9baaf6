use pulldown_cmark::{html, Event, Options, Parser, Tag};

/// Renders a markdown report to HTML for the output pane.
///
/// Raw HTML in the source is emitted as escaped text. Links and images whose
/// destination is not http(s) or mailto keep only their text.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link(_, ref dest, _) | Tag::Image(_, ref dest, _))
        | Event::End(Tag::Link(_, ref dest, _) | Tag::Image(_, ref dest, _))
            if !is_safe_destination(dest) =>
        {
            None
        }
        other => Some(other),
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Relative destinations and http(s)/mailto URLs are safe to emit.
fn is_safe_destination(dest: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let cleaned: String = dest
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    match cleaned.find(':') {
        Some(colon) if !cleaned[..colon].contains(|c| matches!(c, '/' | '?' | '#')) => {
            matches!(&cleaned[..colon], "http" | "https" | "mailto")
        }
        _ => true,
    }
}
