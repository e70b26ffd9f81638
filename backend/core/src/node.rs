//! Telegraph content model.
//!
//! Telegraph page bodies are arrays of nodes. A node is either a bare string
//! or an element with a whitelisted tag, optional `href`/`src` attributes and
//! child nodes. Anything outside that model is rejected at construction time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TelegraphError;

/// Tags accepted by the Telegraph API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    A,
    Aside,
    B,
    Blockquote,
    Br,
    Code,
    Em,
    Figcaption,
    Figure,
    H3,
    H4,
    Hr,
    I,
    Iframe,
    Img,
    Li,
    Ol,
    P,
    Pre,
    S,
    Strong,
    U,
    Ul,
    Video,
}

impl Tag {
    pub const ALL: [Tag; 24] = [
        Tag::A,
        Tag::Aside,
        Tag::B,
        Tag::Blockquote,
        Tag::Br,
        Tag::Code,
        Tag::Em,
        Tag::Figcaption,
        Tag::Figure,
        Tag::H3,
        Tag::H4,
        Tag::Hr,
        Tag::I,
        Tag::Iframe,
        Tag::Img,
        Tag::Li,
        Tag::Ol,
        Tag::P,
        Tag::Pre,
        Tag::S,
        Tag::Strong,
        Tag::U,
        Tag::Ul,
        Tag::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::A => "a",
            Tag::Aside => "aside",
            Tag::B => "b",
            Tag::Blockquote => "blockquote",
            Tag::Br => "br",
            Tag::Code => "code",
            Tag::Em => "em",
            Tag::Figcaption => "figcaption",
            Tag::Figure => "figure",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::Hr => "hr",
            Tag::I => "i",
            Tag::Iframe => "iframe",
            Tag::Img => "img",
            Tag::Li => "li",
            Tag::Ol => "ol",
            Tag::P => "p",
            Tag::Pre => "pre",
            Tag::S => "s",
            Tag::Strong => "strong",
            Tag::U => "u",
            Tag::Ul => "ul",
            Tag::Video => "video",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = TelegraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| TelegraphError::UnsupportedTag(s.to_string()))
    }
}

/// The only attributes Telegraph keeps on an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl NodeAttrs {
    pub fn is_empty(&self) -> bool {
        self.href.is_none() && self.src.is_none()
    }
}

/// An element node: a tag with attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeElement {
    pub tag: Tag,
    #[serde(default, skip_serializing_if = "NodeAttrs::is_empty")]
    pub attrs: NodeAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl NodeElement {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: NodeAttrs::default(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.attrs.href = Some(href.into());
        self
    }
}

/// A Telegraph content node. Text leaves serialize as bare JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(NodeElement),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// An element whose only child is a text leaf.
    pub fn element_with_text(tag: Tag, text: impl Into<String>) -> Self {
        Node::Element(NodeElement::new(tag).with_child(Node::text(text)))
    }

    pub fn as_element(&self) -> Option<&NodeElement> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut NodeElement> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn tag(&self) -> Option<Tag> {
        self.as_element().map(|e| e.tag)
    }

    /// Concatenated text of this node and all descendants.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.children.iter().map(Node::plain_text).collect(),
        }
    }
}

impl From<NodeElement> for Node {
    fn from(element: NodeElement) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_whitelist() {
        for tag in Tag::ALL {
            assert_eq!(tag.as_str().parse::<Tag>().unwrap(), tag);
        }
        assert!(matches!("h1".parse::<Tag>(), Err(TelegraphError::UnsupportedTag(t)) if t == "h1"));
        assert!("div".parse::<Tag>().is_err());
        assert!("P".parse::<Tag>().is_err());
    }

    #[test]
    fn test_text_serializes_as_string() {
        let node = Node::text("hello");
        assert_eq!(serde_json::to_value(&node).unwrap(), json!("hello"));
    }

    #[test]
    fn test_element_omits_empty_fields() {
        let node: Node = NodeElement::new(Tag::Hr).into();
        assert_eq!(serde_json::to_value(&node).unwrap(), json!({ "tag": "hr" }));

        let para = Node::element_with_text(Tag::P, "body");
        assert_eq!(
            serde_json::to_value(&para).unwrap(),
            json!({ "tag": "p", "children": ["body"] })
        );
    }

    #[test]
    fn test_link_attrs() {
        let link: Node = NodeElement::new(Tag::A)
            .with_href("https://example.com")
            .with_child("site")
            .into();
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({ "tag": "a", "attrs": { "href": "https://example.com" }, "children": ["site"] })
        );
    }

    #[test]
    fn test_deserialize_api_content() {
        let raw = json!([
            { "tag": "p", "children": ["Hello, ", { "tag": "b", "children": ["world"] }] },
            { "tag": "img", "attrs": { "src": "/file/x.png" } }
        ]);
        let nodes: Vec<Node> = serde_json::from_value(raw).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].plain_text(), "Hello, world");
        assert_eq!(nodes[1].as_element().unwrap().attrs.src.as_deref(), Some("/file/x.png"));
    }

    #[test]
    fn test_deserialize_rejects_unknown_tag() {
        let raw = json!({ "tag": "h1", "children": ["x"] });
        assert!(serde_json::from_value::<NodeElement>(raw).is_err());
    }
}
