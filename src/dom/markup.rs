// SPDX-License-Identifier: MPL-2.0
//! Markup fragment parsing and HTML serialization.
//!
//! Message payloads arrive as trusted HTML snippets. They are read with a
//! lenient `quick-xml` reader: mismatched end tags and valueless attributes
//! are allowed, HTML void elements are never left open, and HTML named
//! entities resolve to their characters. Once the reader rejects something,
//! the rest of the fragment is inserted as text.

use super::node::Node;
use super::DocumentId;
use quick_xml::escape::{escape, partial_escape, resolve_html5_entity, resolve_xml_entity};
use quick_xml::events::{BytesStart, Event as XmlEvent};
use quick_xml::Reader;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_xml_entity(entity).or_else(|| resolve_html5_entity(entity))
}

/// Parses `markup` into detached nodes owned by `document`.
pub(crate) fn parse_fragment(document: DocumentId, markup: &str) -> Vec<Node> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut roots: Vec<Node> = Vec::new();
    let mut open: Vec<Node> = Vec::new();

    loop {
        let offset = reader.buffer_position();
        match read_next(&mut reader, document, &mut roots, &mut open) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                tracing::warn!(%err, offset, "message markup could not be parsed, inserting the rest as text");
                let rest = unparsed_rest(markup, usize::try_from(offset).unwrap_or(markup.len()));
                if !rest.is_empty() {
                    attach(&mut roots, &open, &Node::text(document, rest));
                }
                break;
            }
        }
    }

    roots
}

/// The input from the `<` that opened the rejected markup onwards.
fn unparsed_rest(markup: &str, offset: usize) -> &str {
    // The reader may already have consumed that `<`.
    let end = offset.saturating_add(1).min(markup.len());
    let start = markup.as_bytes()[..end]
        .iter()
        .rposition(|&byte| byte == b'<')
        .unwrap_or(end);
    markup.get(start..).unwrap_or_default()
}

/// Reads one event into the tree. Returns `false` at the end of input.
fn read_next(
    reader: &mut Reader<&[u8]>,
    document: DocumentId,
    roots: &mut Vec<Node>,
    open: &mut Vec<Node>,
) -> Result<bool, quick_xml::Error> {
    match reader.read_event()? {
        XmlEvent::Start(start) => {
            let node = element_from(document, &start)?;
            attach(roots, open, &node);
            if !node.tag_name().is_some_and(|tag| is_void(&tag)) {
                open.push(node);
            }
        }
        XmlEvent::Empty(start) => {
            let node = element_from(document, &start)?;
            attach(roots, open, &node);
        }
        XmlEvent::End(end) => {
            let name = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
            if let Some(index) = open
                .iter()
                .rposition(|node| node.tag_name().as_deref() == Some(name.as_str()))
            {
                open.truncate(index);
            }
        }
        XmlEvent::Text(text) => {
            let content = text
                .unescape_with(resolve_entity)
                .map(|content| content.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
            if !content.is_empty() {
                attach(roots, open, &Node::text(document, &content));
            }
        }
        XmlEvent::CData(data) => {
            let content = String::from_utf8_lossy(&data).into_owned();
            attach(roots, open, &Node::text(document, &content));
        }
        XmlEvent::Eof => return Ok(false),
        _ => {}
    }
    Ok(true)
}

fn element_from(document: DocumentId, start: &BytesStart<'_>) -> Result<Node, quick_xml::Error> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let node = Node::element(document, &tag);
    for attribute in start.html_attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value_with(resolve_entity)?;
        node.set_attribute(&key, &value);
    }
    Ok(node)
}

fn attach(roots: &mut Vec<Node>, open: &[Node], node: &Node) {
    match open.last() {
        Some(parent) => parent.append_child(node),
        None => roots.push(node.clone()),
    }
}

/// Serializes `node` and its subtree as HTML.
pub(crate) fn write_node(node: &Node, out: &mut String) {
    node.with_element(|element| match element {
        Some((tag, attributes)) => {
            out.push('<');
            out.push_str(tag);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape(value.as_str()));
                out.push('"');
            }
            out.push('>');
            if is_void(tag) {
                return;
            }
            for child in node.child_nodes() {
                write_node(&child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        None => out.push_str(&partial_escape(node.text_content().as_str())),
    });
}

#[cfg(test)]
mod tests {
    use crate::dom::Document;

    #[test]
    fn parses_nested_elements_with_attributes() {
        let doc = Document::new();
        let host = doc.create_element("div");
        host.append_markup(r#"<strong class="title">Saved</strong> to <a href="/files?a=1&amp;b=2">disk</a>"#);

        let children = host.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].class_name(), "title");
        assert_eq!(children[1].attribute("href").as_deref(), Some("/files?a=1&b=2"));
        assert_eq!(host.text_content(), "Saved to disk");
    }

    #[test]
    fn void_elements_do_not_swallow_siblings() {
        let doc = Document::new();
        let host = doc.create_element("div");
        host.append_markup("line one<br>line two");

        assert_eq!(host.child_nodes().len(), 3);
        assert_eq!(host.inner_html(), "line one<br>line two");
    }

    #[test]
    fn plain_text_is_a_single_text_node() {
        let doc = Document::new();
        let host = doc.create_element("div");
        host.append_markup("Hello world");

        assert_eq!(host.child_nodes().len(), 1);
        assert_eq!(host.child_element_count(), 0);
        assert_eq!(host.text_content(), "Hello world");
    }

    #[test]
    fn mismatched_end_tag_closes_nearest_open_element() {
        let doc = Document::new();
        let host = doc.create_element("div");
        host.append_markup("<b><i>x</b>y");

        assert_eq!(host.inner_html(), "<b><i>x</i></b>y");
    }

    #[test]
    fn html_named_entities_resolve_to_characters() {
        let doc = Document::new();
        let host = doc.create_element("div");
        host.append_markup(r#"<b title="&copy; 2024">Hi</b>&nbsp;there &copy; &amp; co"#);

        let bold = host.children().into_iter().next().unwrap();
        assert_eq!(bold.attribute("title").as_deref(), Some("\u{a9} 2024"));
        assert_eq!(host.text_content(), "Hi\u{a0}there \u{a9} & co");
        assert_eq!(
            host.inner_html(),
            "<b title=\"\u{a9} 2024\">Hi</b>\u{a0}there \u{a9} &amp; co"
        );
    }

    #[test]
    fn stray_angle_bracket_keeps_the_markup_before_it() {
        let doc = Document::new();
        let host = doc.create_element("div");
        host.append_markup("<b>x</b> 5 < 6");

        assert_eq!(host.child_element_count(), 1);
        assert_eq!(host.text_content(), "x 5 < 6");
        assert_eq!(host.inner_html(), "<b>x</b> 5 &lt; 6");
    }

    #[test]
    fn serialization_escapes_text_and_attributes() {
        let doc = Document::new();
        let node = doc.create_element("p");
        node.set_attribute("title", "a \"quote\"");
        node.append_child(&doc.create_text_node("1 < 2 & 3"));

        assert_eq!(
            node.outer_html(),
            r#"<p title="a &quot;quote&quot;">1 &lt; 2 &amp; 3</p>"#
        );
    }
}
