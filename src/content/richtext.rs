//! Structured rich text as returned by the content repository, and its
//! conversion to HTML.
//!
//! Span offsets are character offsets into the node text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One block-level rich text element (paragraph, heading, list item, image...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextNode {
    #[serde(rename = "type")]
    pub kind: String,

    /// Text content; absent for images and embeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default)]
    pub spans: Vec<Span>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oembed: Option<Value>,
}

impl RichTextNode {
    /// Build a text node of the given type
    pub fn text(kind: &str, text: &str) -> Self {
        Self {
            kind: kind.to_string(),
            text: Some(text.to_string()),
            spans: Vec::new(),
            url: None,
            alt: None,
            oembed: None,
        }
    }

    /// Build a paragraph node
    pub fn paragraph(text: &str) -> Self {
        Self::text("paragraph", text)
    }
}

/// Inline formatting over a range of a node's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Join the text of all nodes, one line per node
pub fn as_text(nodes: &[RichTextNode]) -> String {
    nodes
        .iter()
        .filter_map(|n| n.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render rich text nodes to HTML
pub fn as_html(nodes: &[RichTextNode]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for node in nodes {
        let list = match node.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{}>", tag));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{}>", tag));
            }
            open_list = list;
        }

        html.push_str(&render_node(node));
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{}>", tag));
    }

    html
}

fn render_node(node: &RichTextNode) -> String {
    let inner = || render_spans(node.text.as_deref().unwrap_or(""), &node.spans);

    match node.kind.as_str() {
        "heading1" | "heading2" | "heading3" | "heading4" | "heading5" | "heading6" => {
            let level = &node.kind["heading".len()..];
            format!("<h{}>{}</h{}>", level, inner(), level)
        }
        "preformatted" => format!("<pre>{}</pre>", inner()),
        "list-item" | "o-list-item" => format!("<li>{}</li>", inner()),
        "image" => {
            let src = node.url.as_deref().unwrap_or("");
            let alt = node.alt.as_deref().unwrap_or("");
            format!(
                r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
                escape_html(src),
                escape_html(alt)
            )
        }
        "embed" => {
            let embed = node.oembed.as_ref();
            let url = embed
                .and_then(|e| e.get("embed_url"))
                .and_then(Value::as_str)
                .unwrap_or("");
            // Embed markup comes from the repository's oEmbed provider as-is
            let markup = embed
                .and_then(|e| e.get("html"))
                .and_then(Value::as_str)
                .unwrap_or("");
            format!(r#"<div data-oembed="{}">{}</div>"#, escape_html(url), markup)
        }
        _ => format!("<p>{}</p>", inner()),
    }
}

fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut open: Vec<&Span> = Vec::new();

    for i in 0..=chars.len() {
        // Close spans ending here, reopening any that were nested inside them
        while let Some(pos) = open.iter().rposition(|s| s.end <= i) {
            let reopen: Vec<&Span> = open.drain(pos + 1..).collect();
            for span in reopen.iter().rev() {
                out.push_str(close_tag(span));
            }
            if let Some(closed) = open.pop() {
                out.push_str(close_tag(closed));
            }
            for span in reopen {
                out.push_str(&open_tag(span));
                open.push(span);
            }
        }

        for span in spans.iter().filter(|s| s.start == i && s.end > i) {
            out.push_str(&open_tag(span));
            open.push(span);
        }

        match chars.get(i) {
            Some('\n') => out.push_str("<br />"),
            Some(c) => push_escaped(&mut out, *c),
            None => {}
        }
    }

    for span in open.iter().rev() {
        out.push_str(close_tag(span));
    }

    out
}

fn open_tag(span: &Span) -> String {
    match span.kind.as_str() {
        "strong" => "<strong>".to_string(),
        "em" => "<em>".to_string(),
        "hyperlink" => {
            let data = span.data.as_ref();
            let url = data
                .and_then(|d| d.get("url"))
                .and_then(Value::as_str)
                .unwrap_or("#");
            match data.and_then(|d| d.get("target")).and_then(Value::as_str) {
                Some(target) => format!(
                    r#"<a href="{}" target="{}" rel="noopener">"#,
                    escape_html(url),
                    escape_html(target)
                ),
                None => format!(r#"<a href="{}">"#, escape_html(url)),
            }
        }
        "label" => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.get("label"))
                .and_then(Value::as_str)
                .unwrap_or("");
            format!(r#"<span class="{}">"#, escape_html(label))
        }
        _ => "<span>".to_string(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match span.kind.as_str() {
        "strong" => "</strong>",
        "em" => "</em>",
        "hyperlink" => "</a>",
        _ => "</span>",
    }
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}

/// Escape text for use in HTML content or attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}
