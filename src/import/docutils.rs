//! docutils XML → [`Document`].

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::model::{Document, Node, NodeId, NodeKind};

/// Root element of every docutils XML file.
const ROOT_TAG: &str = "document";

/// An element that has been opened but not yet closed.
struct OpenElement {
    id: NodeId,
    tag: String,
}

/// Parse a docutils XML document.
///
/// Unknown elements become [`NodeKind::Other`] nodes carrying their tag
/// name, so renderers can report them by name. Whitespace-only text is kept
/// only inside elements that hold text.
pub fn parse_docutils_xml(content: &str) -> Result<Document> {
    let mut reader = Reader::from_str(content);
    let mut doc = Document::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let open = open_element(&mut doc, &stack, &e, &mut seen_root)?;
                stack.push(open);
            }
            Event::Empty(e) => {
                open_element(&mut doc, &stack, &e, &mut seen_root)?;
            }
            Event::End(e) => {
                let name = e.name();
                let tag = String::from_utf8_lossy(name.as_ref());
                match stack.pop() {
                    Some(open) if open.tag == tag => {}
                    Some(open) => {
                        return Err(Error::InvalidTree(format!(
                            "</{tag}> closes <{}>",
                            open.tag
                        )));
                    }
                    None => {
                        return Err(Error::InvalidTree(format!("unexpected </{tag}>")));
                    }
                }
            }
            Event::Text(e) => {
                if let Some(open) = stack.last() {
                    push_text(&mut doc, open.id, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::CData(e) => {
                if let Some(open) = stack.last() {
                    push_text(&mut doc, open.id, &String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::GeneralRef(e) => {
                if let Some(open) = stack.last() {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    match resolve_entity(&entity) {
                        Some(resolved) => push_text(&mut doc, open.id, &resolved),
                        None => {
                            log::debug!("unresolved entity &{entity};");
                            push_text(&mut doc, open.id, &format!("&{entity};"));
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::InvalidTree(format!("unclosed <{}>", open.tag)));
    }
    if !seen_root {
        return Err(Error::InvalidTree(format!("missing <{ROOT_TAG}> root")));
    }
    log::debug!("imported {} nodes", doc.node_count());
    Ok(doc)
}

/// Create the node for a start (or empty) tag and record its attributes.
fn open_element(
    doc: &mut Document,
    stack: &[OpenElement],
    e: &BytesStart<'_>,
    seen_root: &mut bool,
) -> Result<OpenElement> {
    let name = e.name();
    let tag = String::from_utf8_lossy(name.as_ref()).into_owned();

    let id = match stack.last() {
        Some(parent) => {
            let kind = NodeKind::from_name(&tag).unwrap_or(NodeKind::Other);
            let id = doc.add(parent.id, Node::new(kind));
            if kind == NodeKind::Other {
                doc.semantics.set_tagname(id, &tag);
            }
            id
        }
        None if *seen_root => {
            return Err(Error::InvalidTree(format!(
                "<{tag}> after the <{ROOT_TAG}> root"
            )));
        }
        None if tag != ROOT_TAG => {
            return Err(Error::InvalidTree(format!(
                "expected <{ROOT_TAG}> root, found <{tag}>"
            )));
        }
        None => {
            *seen_root = true;
            NodeId::ROOT
        }
    };

    for attr in e.attributes().flatten() {
        let key = attr.key.local_name();
        let key = String::from_utf8_lossy(key.as_ref());
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw).map_err(quick_xml::Error::from)?;
        if !doc.semantics.set_attr(id, &key, &value) {
            log::trace!("ignoring attribute {key} on <{tag}>");
        }
    }

    Ok(OpenElement { id, tag })
}

fn push_text(doc: &mut Document, parent: NodeId, text: &str) {
    if text.is_empty() {
        return;
    }
    let holds_text = doc.kind(parent).is_some_and(NodeKind::holds_text);
    if holds_text || !text.trim().is_empty() {
        doc.add_text(parent, text);
    }
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_and_attributes() {
        let doc = parse_docutils_xml(
            r#"<?xml version="1.0" encoding="utf-8"?>
<document source="guide.rst">
  <section ids="intro" names="intro">
    <title>Intro</title>
    <paragraph>See <reference refuri="https://example.com?a=1&amp;b=2">here</reference>.</paragraph>
    <literal_block classes="code python" xml:space="preserve">x = 1</literal_block>
  </section>
</document>"#,
        )
        .unwrap();

        assert_eq!(doc.semantics.source(NodeId::ROOT), Some("guide.rst"));
        let section = doc.children(NodeId::ROOT).next().unwrap();
        assert_eq!(doc.kind(section), Some(NodeKind::Section));

        let kinds: Vec<_> = doc
            .children(section)
            .filter_map(|id| doc.kind(id))
            .collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Title, NodeKind::Paragraph, NodeKind::LiteralBlock]
        );

        let para = doc.children(section).nth(1).unwrap();
        let link = doc.children(para).nth(1).unwrap();
        assert_eq!(
            doc.semantics.refuri(link),
            Some("https://example.com?a=1&b=2")
        );
        assert_eq!(doc.collect_text(para), "See here.");

        let block = doc.children(section).nth(2).unwrap();
        assert_eq!(doc.semantics.language(block), Some("python"));
    }

    #[test]
    fn test_entities_and_whitespace() {
        let doc = parse_docutils_xml(
            "<document>\n  <paragraph>a &lt; b &#x2014; <emphasis>c</emphasis> <strong>d</strong></paragraph>\n</document>",
        )
        .unwrap();
        // only the paragraph survives at the top level
        assert_eq!(doc.children(NodeId::ROOT).count(), 1);
        assert_eq!(doc.collect_text(NodeId::ROOT), "a < b \u{2014} c d");
    }

    #[test]
    fn test_unknown_element_keeps_tag_name() {
        let doc = parse_docutils_xml("<document><glossary><term>x</term></glossary></document>")
            .unwrap();
        let glossary = doc.children(NodeId::ROOT).next().unwrap();
        assert_eq!(doc.kind(glossary), Some(NodeKind::Other));
        assert_eq!(doc.kind_name(glossary), "glossary");
    }

    #[test]
    fn test_malformed_trees() {
        for input in [
            "<document><paragraph>x</document>",
            "<document><paragraph>x</paragraph>",
            "<section/>",
            "<document/><document/>",
            "",
        ] {
            let result = parse_docutils_xml(input);
            assert!(
                matches!(result, Err(Error::InvalidTree(_)) | Err(Error::Xml(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp").as_deref(), Some("&"));
        assert_eq!(resolve_entity("#65").as_deref(), Some("A"));
        assert_eq!(resolve_entity("#x41").as_deref(), Some("A"));
        assert_eq!(resolve_entity("nbsp"), None);
    }
}
