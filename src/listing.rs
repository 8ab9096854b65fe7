// ABOUTME: Applesoft BASIC listing module for the big-apple application
// ABOUTME: Emits numbered HOME/COLOR/PRINT/GET statements with quote-safe string literals

use crate::errors::{DeckError, Result};
use crate::layout::SlideLayout;
use log::info;
use std::fmt;
use std::fs;
use std::path::Path;

pub const HEADING_COLOR_CODE: u8 = 6;
pub const BODY_COLOR_CODE: u8 = 1;

/// Line numbers start here and advance by the same step.
pub const LINE_STEP: usize = 10;

/// Characters that cannot appear inside an Applesoft string literal and are
/// emitted as `CHR$` codes instead.
const ESCAPED_CHARS: [char; 2] = ['"', '#'];

/// One Applesoft statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Clear the screen.
    Home,
    Color(u8),
    /// `PRINT` with optional text; `None` prints an empty line.
    Print(Option<String>),
    /// Wait for a key press into the named variable.
    Get(String),
}

impl Statement {
    pub fn print(text: impl Into<String>) -> Self {
        Statement::Print(Some(text.into()))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Home => write!(f, "HOME"),
            Statement::Color(code) => write!(f, "COLOR = {}", code),
            Statement::Print(None) => write!(f, "PRINT"),
            Statement::Print(Some(text)) => write!(f, "PRINT {}", string_expression(text)),
            Statement::Get(variable) => write!(f, "GET {}", variable),
        }
    }
}

/// Encode `text` as an Applesoft string expression.
///
/// Runs of plain characters become quoted literals; quotes and `#` become
/// `CHR$` codes. The pieces are joined with `; `, which `PRINT` outputs
/// without separation.
pub fn string_expression(text: &str) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut literal = String::new();

    for ch in text.chars() {
        if ESCAPED_CHARS.contains(&ch) {
            if !literal.is_empty() {
                segments.push(format!("\"{}\"", literal));
                literal.clear();
            }
            segments.push(format!("CHR$({})", u32::from(ch)));
        } else {
            literal.push(ch);
        }
    }

    if !literal.is_empty() || segments.is_empty() {
        segments.push(format!("\"{}\"", literal));
    }
    segments.join("; ")
}

/// Statements that show one slide on the terminal.
pub fn emit(layout: &SlideLayout) -> Vec<Statement> {
    let mut statements = vec![Statement::Home, Statement::Color(HEADING_COLOR_CODE)];

    for heading in &layout.headings {
        statements.push(Statement::print(format!(
            "{}{}",
            " ".repeat(heading.indent),
            heading.text
        )));
    }

    statements.push(Statement::Color(BODY_COLOR_CODE));

    if !layout.body.is_empty() {
        let padding = layout.padding_lines.max(0) as usize;
        statements.extend(std::iter::repeat(Statement::Print(None)).take(padding));
        for line in &layout.body {
            if line.is_empty() {
                statements.push(Statement::print(""));
            } else {
                statements.push(Statement::print(format!(" {}", line)));
            }
        }
    }

    statements.push(Statement::Get("A$".to_string()));
    statements
}

/// A whole program, numbered continuously across slides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    statements: Vec<Statement>,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, statements: impl IntoIterator<Item = Statement>) {
        self.statements.extend(statements);
    }

    /// Program lines in the form `"<number>: <statement>"`.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.statements
            .iter()
            .enumerate()
            .map(|(index, statement)| format!("{:02}: {}", (index + 1) * LINE_STEP, statement))
    }

    pub fn to_program(&self) -> String {
        let mut program = String::new();
        for line in self.lines() {
            program.push_str(&line);
            program.push('\n');
        }
        program
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        info!(
            "Writing {} listing lines to {:?}",
            self.statements.len(),
            path
        );
        fs::write(path, self.to_program()).map_err(DeckError::FileReadError)
    }
}
