// ABOUTME: AST walker for the big-apple application
// ABOUTME: Flattens markdown nodes into text fragments and routes them into slides

use crate::markdown::{Node, NodeKind};
use crate::slide::{is_blank, Segmenter, Slide};
use log::warn;

/// Split a parsed document into slides on thematic breaks.
pub fn segment(document: &Node) -> Vec<Slide> {
    if document.children.is_empty() {
        warn!("No children found in the markdown content.");
    }

    let mut walker = Walker::default();
    // Fragments left over at the top level belong to no slide.
    walker.flatten(document, 0);
    walker.segmenter.finish()
}

#[derive(Debug, Default)]
struct Walker {
    segmenter: Segmenter,
}

impl Walker {
    /// Reduce the children of `parent` to text fragments.
    ///
    /// Headings, and block content found at depth 0, are written straight
    /// into the current slide; everything else is returned to the caller.
    fn flatten(&mut self, parent: &Node, depth: usize) -> Vec<String> {
        let mut fragments = Vec::new();

        for node in &parent.children {
            match &node.kind {
                NodeKind::SetextHeading | NodeKind::BlankLine => {}

                NodeKind::ThematicBreak => self.segmenter.close_slide(),

                NodeKind::CodeSpan(code) => fragments.push(format!("'{code}'")),

                NodeKind::RawText(text) => fragments.push(text.clone()),

                NodeKind::Heading => {
                    let heading = self.flatten(node, depth + 1);
                    self.segmenter.current_mut().heading.extend(heading);
                }

                NodeKind::LineBreak => fragments.push("\n".to_string()),

                NodeKind::InlineHtml(html) | NodeKind::HtmlBlock(html) => {
                    if let Some(text) = visible_html(html) {
                        fragments.push(text.to_string());
                    }
                }

                NodeKind::AutoLink { title } | NodeKind::Link { title } => {
                    if let Some(title) = title.as_deref().filter(|title| !title.is_empty()) {
                        fragments.push(title.to_string());
                    }
                    fragments.extend(self.flatten(node, depth + 1));
                }

                NodeKind::List(bullet) => {
                    let items = self.flatten(node, depth + 1);
                    let mut marked = Vec::with_capacity(items.len() * 2);
                    for (index, item) in items.iter().enumerate() {
                        let item = item.trim_matches(' ');
                        if item != "\n" {
                            marked.push(bullet.marker(index));
                        }
                        marked.push(item.to_string());
                    }
                    self.emit(marked, depth, &mut fragments);
                }

                NodeKind::Paragraph
                | NodeKind::Emphasis
                | NodeKind::StrongEmphasis
                | NodeKind::FencedCode
                | NodeKind::ListItem
                | NodeKind::Quote => {
                    let mut text = self.flatten(node, depth + 1);
                    if node.kind == NodeKind::Paragraph && !text.is_empty() {
                        text.push("\n".to_string());
                    }
                    self.emit(text, depth, &mut fragments);
                }

                NodeKind::Document | NodeKind::Other(_) => {
                    warn!("Unhandled node type: {:?}", node.kind);
                }
            }
        }

        fragments
    }

    fn emit(&mut self, text: Vec<String>, depth: usize, fragments: &mut Vec<String>) {
        if depth == 0 {
            self.segmenter
                .current_mut()
                .content
                .extend(text.into_iter().filter(|fragment| !is_blank(fragment)));
        } else {
            fragments.extend(text);
        }
    }
}

/// HTML payload worth showing on a slide: comments and bare tags are dropped.
fn visible_html(html: &str) -> Option<&str> {
    let html = html.trim();
    if html.starts_with("<!--") && html.ends_with("-->") {
        return None;
    }
    if html.starts_with('<') && html.ends_with('>') {
        return None;
    }
    Some(html)
}
