// ABOUTME: Slide layout for the big-apple application
// ABOUTME: Shared wrap and centering math consumed by both the image and listing renderers

use crate::slide::{join_fragments, Slide};
use log::debug;

/// Canvas size of an Apple II hi-res screen.
pub const CANVAS_WIDTH: u32 = 280;
pub const CANVAS_HEIGHT: u32 = 192;

/// Text columns on the terminal.
pub const SCREEN_COLUMNS: usize = 40;

/// Body text wraps two columns short of the screen, leaving room for the
/// leading space each body line is printed with.
pub const WRAP_WIDTH: usize = 38;

pub const GLYPH_ADVANCE: i32 = 7;
pub const LINE_HEIGHT: i32 = 8;

/// Left margin of body text, in pixels.
pub const BODY_MARGIN: i32 = 7;

/// A heading line placed on the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingLine {
    pub text: String,
    /// Leading spaces when printed on the terminal.
    pub indent: usize,
    pub x: i32,
    pub y: i32,
}

/// Positions for everything drawn on one slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLayout {
    pub headings: Vec<HeadingLine>,
    /// Wrapped body lines; an empty string is a blank separator line.
    pub body: Vec<String>,
    pub header_height: i32,
    pub body_height: i32,
    /// Blank lines (of 7 pixels each on the canvas) above the body.
    /// Negative when the body overflows the screen.
    pub padding_lines: i32,
}

impl SlideLayout {
    pub fn new(slide: &Slide) -> Self {
        let headings: Vec<HeadingLine> = slide
            .heading_lines()
            .into_iter()
            .enumerate()
            .map(|(index, text)| place_heading(text, index))
            .collect();

        let header_height = headings.last().map_or(0, |heading| heading.y);
        let body = wrap(&slide.content);
        let body_height = body.len() as i32 * LINE_HEIGHT;

        let space_avail = CANVAS_HEIGHT as i32 - (header_height + GLYPH_ADVANCE) - body_height;
        let padding_lines = space_avail.div_euclid(2).div_euclid(GLYPH_ADVANCE);

        debug!(
            "Layout: {} heading lines, {} body lines, {} padding lines",
            headings.len(),
            body.len(),
            padding_lines
        );

        Self {
            headings,
            body,
            header_height,
            body_height,
            padding_lines,
        }
    }

    /// Vertical offset of the body text layer, in pixels.
    pub fn body_offset(&self) -> i32 {
        self.padding_lines * GLYPH_ADVANCE
    }

    /// Pixel row of body line `index` within the text layer.
    pub fn body_line_y(index: usize) -> i32 {
        (index as i32 + 1) * LINE_HEIGHT
    }
}

fn place_heading(text: &str, index: usize) -> HeadingLine {
    let length = text.chars().count() as i32;
    let free_cells = SCREEN_COLUMNS as i32 - length;
    HeadingLine {
        text: text.to_string(),
        indent: free_cells.max(0) as usize / 2,
        x: (free_cells * GLYPH_ADVANCE).div_euclid(2),
        y: index as i32 * LINE_HEIGHT + GLYPH_ADVANCE,
    }
}

/// Wrap a slide's content fragments into display lines.
///
/// Newline fragments split the text into paragraphs, each wrapped on its
/// own. A paragraph that needs more than one line is followed by a blank
/// line.
pub fn wrap(fragments: &[String]) -> Vec<String> {
    let joined = join_fragments(fragments);

    let mut lines = Vec::new();
    for paragraph in joined.split('\n') {
        if paragraph.trim_matches(' ').is_empty() {
            continue;
        }
        let wrapped = wrap_paragraph(paragraph, WRAP_WIDTH);
        let multi_line = wrapped.len() > 1;
        lines.extend(wrapped.iter().map(|line| line.trim_matches(' ').to_string()));
        if multi_line {
            lines.push(String::new());
        }
    }
    lines
}

const TAB_STOP: usize = 8;

/// Greedy wrap by character count over alternating word and whitespace
/// chunks.
///
/// Whitespace inside a line is kept as written; only the run at a line
/// break is dropped. Words may break after a hyphen between letters, and a
/// word longer than `width` fills the rest of the current line before it is
/// cut, preferring its last hyphen that fits.
pub fn wrap_paragraph(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut chunks = split_chunks(&normalize_whitespace(text));
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<String> = Vec::new();
        let mut line_width = 0;

        if !lines.is_empty() && chunks.last().is_some_and(|chunk| is_space(chunk)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            let chunk_width = chunk.chars().count();
            if line_width + chunk_width > width {
                break;
            }
            line_width += chunk_width;
            line.extend(chunks.pop());
        }

        if chunks
            .last()
            .is_some_and(|chunk| chunk.chars().count() > width)
        {
            break_long_word(&mut chunks, &mut line, width - line_width);
        }

        if line.last().is_some_and(|chunk| is_space(chunk)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat());
        }
    }
    lines
}

/// Move as much of the oversized chunk on top of `chunks` as fits into
/// `line`, cutting after its last fitting hyphen when there is one.
fn break_long_word(chunks: &mut Vec<String>, line: &mut Vec<String>, space_left: usize) {
    let Some(chunk) = chunks.pop() else {
        return;
    };
    let chars: Vec<char> = chunk.chars().collect();

    let mut end = space_left.min(chars.len());
    if let Some(hyphen) = chars[..end].iter().rposition(|&ch| ch == '-') {
        if hyphen > 0 && chars[..hyphen].iter().any(|&ch| ch != '-') {
            end = hyphen + 1;
        }
    }

    // An empty head still stands in as the line's last chunk, so whitespace
    // before it survives the trailing-whitespace drop.
    let (head, tail) = chars.split_at(end);
    line.push(head.iter().collect());
    if !tail.is_empty() {
        chunks.push(tail.iter().collect());
    }
}

/// Expand tabs to the next tab stop and turn other ASCII whitespace into
/// plain spaces.
fn normalize_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let spaces = TAB_STOP - column % TAB_STOP;
                normalized.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                normalized.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                normalized.push(' ');
                column += 1;
            }
            _ => {
                normalized.push(ch);
                column += 1;
            }
        }
    }
    normalized
}

/// Split text into space runs and words, where a word also ends after a
/// hyphen joining letters and before an em-dash (`--`).
fn split_chunks(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = chunk_end(&chars, start);
        chunks.push(chars[start..end].iter().collect());
        start = end;
    }
    chunks
}

fn chunk_end(chars: &[char], start: usize) -> usize {
    if chars[start] == ' ' {
        return chars[start..]
            .iter()
            .position(|&ch| ch != ' ')
            .map_or(chars.len(), |run| start + run);
    }

    if start > 0 && is_word_punct(chars[start - 1]) {
        if let Some(end) = em_dash_end(chars, start) {
            return end;
        }
    }

    for end in start + 1..chars.len() {
        if chars[end] == ' ' {
            return end;
        }
        if chars[end] == '-' && hyphen_breaks(chars, end) {
            return end + 1;
        }
        if is_word_punct(chars[end - 1]) && em_dash_end(chars, end).is_some() {
            return end;
        }
    }
    chars.len()
}

/// End of a run of two or more dashes at `start` that leads into a word.
fn em_dash_end(chars: &[char], start: usize) -> Option<usize> {
    let dashes = chars[start..].iter().take_while(|&&ch| ch == '-').count();
    let end = start + dashes;
    (dashes >= 2 && chars.get(end).is_some_and(|&ch| is_word_char(ch))).then_some(end)
}

/// A hyphen breaks when two letters (or letter, hyphen, letter) come before
/// it and the same follows it.
fn hyphen_breaks(chars: &[char], hyphen: usize) -> bool {
    let letter = |index: Option<usize>| {
        index
            .and_then(|index| chars.get(index))
            .is_some_and(|&ch| is_letter(ch))
    };
    let dash = |index: Option<usize>| index.and_then(|index| chars.get(index)) == Some(&'-');
    let before = |offset: usize| hyphen.checked_sub(offset);
    let after = |offset: usize| Some(hyphen + offset);

    letter(before(1))
        && (letter(before(2)) || (dash(before(2)) && letter(before(3))))
        && letter(after(1))
        && (letter(after(2)) || (dash(after(2)) && letter(after(3))))
}

fn is_space(chunk: &str) -> bool {
    chunk.trim().is_empty()
}

fn is_letter(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_word_punct(ch: char) -> bool {
    is_word_char(ch) || matches!(ch, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}
