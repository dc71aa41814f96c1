use std::collections::HashMap;

use libxml::{
    parser::{Parser, ParserOptions},
    readonly::RoNode,
    tree::NodeType,
};
use log::debug;

use crate::error::{Result, RssError};

/// A single node of the parsed feed: either an element with a tag name,
/// attributes and ordered children, or a raw text leaf. Only elements are
/// searchable by tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }
}

impl Element {
    /// Index of the first child element tagged `tag`, or `None` if the
    /// element has no such child. Comparison is exact: case-sensitive, no
    /// namespace handling. Later duplicates are never returned.
    pub fn find_child(&self, tag: &str) -> Option<usize> {
        self.children.iter().position(|child| match child {
            XmlNode::Element(element) => element.tag == tag,
            XmlNode::Text(_) => false,
        })
    }

    /// Text content of this element: the text child at index 0, or the
    /// empty string for elements like `<title></title>` that have none.
    pub fn text(&self) -> &str {
        match self.children.first() {
            Some(XmlNode::Text(content)) => content,
            _ => "",
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Text content of the first child element tagged `tag`. Absence of the
    /// child is a contract violation for the callers that use this, so it
    /// surfaces as an error instead of a fallback.
    pub fn child_text(&self, tag: &str) -> Result<&str> {
        let index = self.find_child(tag).ok_or_else(|| RssError::MissingElement {
            parent: self.tag.clone(),
            tag: tag.to_string(),
        })?;

        // find_child only ever returns indices of element children
        Ok(self.children[index]
            .as_element()
            .map(Element::text)
            .unwrap_or_default())
    }
}

/// Parse feed text into an [`XmlNode`] tree. The libxml DOM is walked once
/// and dropped; the returned tree owns all of its data. Recovery mode stays
/// off: a feed that is not well-formed XML fails the whole conversion
/// instead of yielding a patched-up tree.
pub fn parse(xml: &str) -> Result<XmlNode> {
    let parser = Parser::default();
    let document = parser.parse_string_with_options(
        xml,
        ParserOptions {
            recover: false,
            no_error: true,
            no_warning: true,
            ..Default::default()
        },
    )?;

    let root = document
        .get_root_readonly()
        .ok_or_else(|| RssError::InvalidFeed("document has no root element".to_string()))?;

    Ok(convert(root))
}

fn convert(node: RoNode) -> XmlNode {
    let children = node
        .get_child_nodes()
        .into_iter()
        .filter_map(|child| match child.get_type() {
            Some(NodeType::ElementNode) => Some(convert(child)),
            Some(NodeType::TextNode) | Some(NodeType::CDataSectionNode) => {
                let content = child.get_content();
                // inter-element indentation is not part of the model
                if content.trim().is_empty() {
                    None
                } else {
                    Some(XmlNode::Text(content))
                }
            }
            _ => None,
        })
        .collect();

    XmlNode::Element(Element {
        tag: node.get_name(),
        attributes: node.get_properties(),
        children,
    })
}

/// Validation gate: accept only an `<rss version="2.0">` root, then hand out
/// its `<channel>` element. Everything downstream assumes this has run.
pub fn channel(root: &XmlNode) -> Result<&Element> {
    let rss = root
        .as_element()
        .ok_or_else(|| RssError::InvalidFeed("root is not an element".to_string()))?;

    if rss.tag != "rss" {
        return Err(RssError::InvalidFeed(format!(
            "expected <rss> root, found <{}>",
            rss.tag
        )));
    }

    match rss.attr("version") {
        Some("2.0") => (),
        Some(version) => {
            return Err(RssError::InvalidFeed(format!(
                "unsupported RSS version: {}",
                version
            )))
        }
        None => {
            return Err(RssError::InvalidFeed(
                "missing version attribute on <rss>".to_string(),
            ))
        }
    }

    debug!("Feed accepted as RSS 2.0");

    let index = rss
        .find_child("channel")
        .ok_or_else(|| RssError::InvalidFeed("feed has no <channel> element".to_string()))?;

    // find_child only ever returns indices of element children
    rss.children[index]
        .as_element()
        .ok_or_else(|| RssError::InvalidFeed("feed has no <channel> element".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, children: Vec<XmlNode>) -> XmlNode {
        XmlNode::Element(Element {
            tag: tag.to_string(),
            attributes: HashMap::new(),
            children,
        })
    }

    fn leaf(tag: &str, text: &str) -> XmlNode {
        element(tag, vec![XmlNode::Text(text.to_string())])
    }

    #[test]
    fn find_child_returns_first_match_only() {
        let node = element(
            "item",
            vec![
                leaf("title", "first"),
                leaf("link", "http://a"),
                leaf("title", "second"),
            ],
        );
        let item = node.as_element().unwrap();

        assert_eq!(item.find_child("title"), Some(0));
        assert_eq!(item.find_child("link"), Some(1));
    }

    #[test]
    fn find_child_reports_absence_as_none() {
        let node = element("item", vec![leaf("title", "hello")]);
        assert_eq!(node.as_element().unwrap().find_child("source"), None);
    }

    #[test]
    fn find_child_never_matches_text_children() {
        let node = element("item", vec![XmlNode::Text("source".to_string())]);
        assert_eq!(node.as_element().unwrap().find_child("source"), None);
    }

    #[test]
    fn text_of_empty_element_is_empty_string() {
        let node = element("title", vec![]);
        assert_eq!(node.as_element().unwrap().text(), "");
    }

    #[test]
    fn child_text_missing_child_is_an_error() {
        let node = element("channel", vec![]);
        let err = node.as_element().unwrap().child_text("title").unwrap_err();
        assert!(matches!(
            err,
            RssError::MissingElement { ref parent, ref tag } if parent == "channel" && tag == "title"
        ));
    }

    #[test]
    fn parse_builds_text_as_first_child() {
        let root = parse(
            r#"<rss version="2.0"><channel><title>Tech News</title></channel></rss>"#,
        )
        .unwrap();

        let channel = channel(&root).unwrap();
        assert_eq!(channel.child_text("title").unwrap(), "Tech News");
    }

    #[test]
    fn parse_skips_indentation_text_nodes() {
        let root = parse(
            "<rss version=\"2.0\">\n  <channel>\n    <title>T</title>\n  </channel>\n</rss>",
        )
        .unwrap();

        let channel = channel(&root).unwrap();
        assert_eq!(channel.find_child("title"), Some(0));
        assert_eq!(channel.children.len(), 1);
    }

    #[test]
    fn parse_keeps_attributes() {
        let root = parse(
            r#"<rss version="2.0"><channel><item><source url="http://s">CNN</source></item></channel></rss>"#,
        )
        .unwrap();

        let channel = channel(&root).unwrap();
        let item = channel.children[0].as_element().unwrap();
        let source = item.children[item.find_child("source").unwrap()]
            .as_element()
            .unwrap();
        assert_eq!(source.attr("url"), Some("http://s"));
        assert_eq!(source.text(), "CNN");
    }

    #[test]
    fn channel_rejects_wrong_root_tag() {
        let root = parse("<feed><channel/></feed>").unwrap();
        assert!(matches!(channel(&root), Err(RssError::InvalidFeed(_))));
    }

    #[test]
    fn channel_rejects_wrong_version() {
        let root = parse(r#"<rss version="0.91"><channel/></rss>"#).unwrap();
        assert!(matches!(channel(&root), Err(RssError::InvalidFeed(_))));
    }

    #[test]
    fn channel_rejects_missing_version() {
        let root = parse("<rss><channel/></rss>").unwrap();
        assert!(matches!(channel(&root), Err(RssError::InvalidFeed(_))));
    }

    #[test]
    fn unclosed_tags_are_a_parse_error_not_a_recovered_tree() {
        // libxml would happily recover this into <rss><channel/></rss>;
        // recovery is disabled so it must fail instead
        assert!(matches!(
            parse("<rss version=\"2.0\"><channel>"),
            Err(RssError::XmlParse(_))
        ));
    }

    #[test]
    fn non_xml_input_is_a_parse_error() {
        assert!(matches!(parse("not xml"), Err(RssError::XmlParse(_))));
    }
}
