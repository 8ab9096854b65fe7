// ABOUTME: Markdown parsing module for the big-apple application
// ABOUTME: Converts comrak's arena AST into an owned tree of slide-relevant node kinds

use comrak::nodes::{AstNode, ListType, NodeLink, NodeList, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

/// Bullet style of a markdown list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListBullet {
    /// `*`, `-` or `+`
    Unordered(char),
    /// Numbered; markers are always printed with a `.`
    Ordered,
}

impl ListBullet {
    /// Marker for the fragment at `index` of the flattened list.
    ///
    /// Ordered lists advance once every two fragments, since a plain item
    /// flattens to its text followed by a paragraph break.
    pub fn marker(&self, index: usize) -> String {
        match self {
            ListBullet::Unordered(bullet) => bullet.to_string(),
            ListBullet::Ordered => format!("{}.", index / 2 + 1),
        }
    }
}

impl From<&NodeList> for ListBullet {
    fn from(list: &NodeList) -> Self {
        match list.list_type {
            ListType::Bullet => ListBullet::Unordered(char::from(list.bullet_char)),
            ListType::Ordered => ListBullet::Ordered,
        }
    }
}

/// The node kinds the slide walker understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading,
    SetextHeading,
    BlankLine,
    ThematicBreak,
    CodeSpan(String),
    RawText(String),
    LineBreak,
    InlineHtml(String),
    HtmlBlock(String),
    AutoLink { title: Option<String> },
    Link { title: Option<String> },
    List(ListBullet),
    ListItem,
    Paragraph,
    Emphasis,
    StrongEmphasis,
    FencedCode,
    Quote,
    /// Anything else the parser produced, by name.
    Other(String),
}

/// An owned markdown tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn leaf(kind: NodeKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn text(text: &str) -> Self {
        Self::leaf(NodeKind::RawText(text.to_string()))
    }
}

/// Parse markdown source into a `Document` node.
pub fn parse_markdown(source: &str) -> Node {
    let arena = Arena::new();
    let options = ComrakOptions::default();
    let root = parse_document(&arena, source, &options);
    convert(root)
}

fn convert<'a>(node: &'a AstNode<'a>) -> Node {
    let children = merge_text(node.children().map(convert).collect());
    let data = node.data.borrow();

    let kind = match &data.value {
        NodeValue::Document => NodeKind::Document,
        NodeValue::Heading(heading) if heading.setext => NodeKind::SetextHeading,
        NodeValue::Heading(_) => NodeKind::Heading,
        NodeValue::ThematicBreak => NodeKind::ThematicBreak,
        NodeValue::Paragraph => NodeKind::Paragraph,
        NodeValue::BlockQuote => NodeKind::Quote,
        NodeValue::List(list) => NodeKind::List(ListBullet::from(list)),
        NodeValue::Item(_) => NodeKind::ListItem,
        NodeValue::CodeBlock(block) if block.fenced => {
            return Node::new(NodeKind::FencedCode, vec![Node::text(&block.literal)]);
        }
        NodeValue::CodeBlock(_) => NodeKind::Other("code_block".to_string()),
        NodeValue::HtmlBlock(html) => NodeKind::HtmlBlock(html.literal.clone()),
        NodeValue::HtmlInline(html) => NodeKind::InlineHtml(html.clone()),
        NodeValue::Text(text) => NodeKind::RawText(text.clone()),
        NodeValue::SoftBreak | NodeValue::LineBreak => NodeKind::LineBreak,
        NodeValue::Code(code) => NodeKind::CodeSpan(code.literal.clone()),
        NodeValue::Emph => NodeKind::Emphasis,
        NodeValue::Strong => NodeKind::StrongEmphasis,
        NodeValue::Link(link) => link_kind(link, &children),
        NodeValue::Image(_) => NodeKind::Other("image".to_string()),
        other => NodeKind::Other(variant_name(other)),
    };

    Node::new(kind, children)
}

fn variant_name(value: &NodeValue) -> String {
    format!("{value:?}")
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect()
}

fn link_kind(link: &NodeLink, children: &[Node]) -> NodeKind {
    let title = Some(link.title.clone()).filter(|title| !title.is_empty());
    let is_autolink = match children {
        [Node {
            kind: NodeKind::RawText(text),
            ..
        }] => text == &link.url || link.url.strip_prefix("mailto:") == Some(text.as_str()),
        _ => false,
    };

    if is_autolink {
        NodeKind::AutoLink { title }
    } else {
        NodeKind::Link { title }
    }
}

/// Comrak may split one run of text into several text nodes; the walker
/// joins fragments with spaces, so they are merged back here.
fn merge_text(children: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for child in children {
        if let (
            Some(Node {
                kind: NodeKind::RawText(previous),
                ..
            }),
            NodeKind::RawText(text),
        ) = (merged.last_mut(), &child.kind)
        {
            previous.push_str(text);
            continue;
        }
        merged.push(child);
    }
    merged
}
