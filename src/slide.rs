// ABOUTME: Slide model for the big-apple application
// ABOUTME: Holds the segmenter state that splits a document into slides

use std::mem;

/// One slide of the deck, as flattened text fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    pub heading: Vec<String>,
    pub content: Vec<String>,
}

impl Slide {
    pub fn is_empty(&self) -> bool {
        self.heading.is_empty() && self.content.is_empty()
    }

    /// Heading lines with surrounding spaces stripped and blanks dropped.
    pub fn heading_lines(&self) -> Vec<&str> {
        self.heading
            .iter()
            .map(|heading| heading.trim_matches(' '))
            .filter(|heading| !heading.is_empty())
            .collect()
    }

    /// Body text with fragments joined by spaces; newline fragments keep
    /// their line breaks.
    pub fn joined_content(&self) -> String {
        join_fragments(&self.content)
    }
}

/// Join non-blank fragments with single spaces.
pub fn join_fragments(fragments: &[String]) -> String {
    fragments
        .iter()
        .filter(|fragment| !is_blank(fragment))
        .map(|fragment| fragment.trim_matches(' '))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A fragment is blank when nothing but spaces remain.
pub fn is_blank(fragment: &str) -> bool {
    fragment.trim_matches(' ').is_empty()
}

/// Tracks the slide under construction and the finished ones.
#[derive(Debug, Default)]
pub struct Segmenter {
    current: Slide,
    slides: Vec<Slide>,
}

impl Segmenter {
    pub fn current_mut(&mut self) -> &mut Slide {
        &mut self.current
    }

    /// Finish the current slide and start an empty one. Empty slides are
    /// dropped.
    pub fn close_slide(&mut self) {
        let slide = mem::take(&mut self.current);
        if !slide.is_empty() {
            self.slides.push(slide);
        }
    }

    /// Flush the last slide and hand back the deck in document order.
    pub fn finish(mut self) -> Vec<Slide> {
        self.close_slide();
        self.slides
    }
}

/// Console summary of a deck: headings, indented body paragraphs and a rule
/// after each slide.
pub fn outline(slides: &[Slide]) -> String {
    let mut out = String::new();
    for slide in slides {
        for heading in &slide.heading {
            out.push_str(heading);
            out.push('\n');
        }
        for paragraph in slide.joined_content().split('\n') {
            out.push_str("  ");
            out.push_str(paragraph.trim_matches(' '));
            out.push('\n');
        }
        out.push_str(&"-".repeat(40));
        out.push('\n');
    }
    out
}
