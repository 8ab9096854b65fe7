use super::*;
use crate::layout::{wrap_paragraph, WRAP_WIDTH};
use crate::listing::string_expression;
use crate::raster::{render_image, BODY_COLOR, HEADING_COLOR};
use image::RgbImage;
use std::io::Write;
use tempfile::NamedTempFile;

const SCENARIO: &str = "# Title\n\nHello world\n\n---\n\n# Next\n\n- a\n- b";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn slide(heading: &[&str], content: &[&str]) -> Slide {
    Slide {
        heading: strings(heading),
        content: strings(content),
    }
}

/// Evaluate a PRINT string expression the way Applesoft would.
fn evaluate_expression(expression: &str) -> String {
    let mut text = String::new();
    let mut rest = expression;
    while !rest.is_empty() {
        if let Some(literal) = rest.strip_prefix('"') {
            let end = literal.find('"').expect("unterminated literal");
            text.push_str(&literal[..end]);
            rest = &literal[end + 1..];
        } else if let Some(code) = rest.strip_prefix("CHR$(") {
            let end = code.find(')').expect("unterminated CHR$");
            let value: u32 = code[..end].parse().expect("numeric CHR$ code");
            text.push(char::from_u32(value).expect("valid character code"));
            rest = &code[end + 1..];
        } else {
            panic!("unexpected expression text: {}", rest);
        }
        rest = rest.strip_prefix("; ").unwrap_or(rest);
    }
    text
}

fn pixel_rows(image: &RgbImage, color: image::Rgb<u8>) -> Vec<u32> {
    image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel == color)
        .map(|(_, y, _)| y)
        .collect()
}

#[test]
fn test_scenario_segments_into_two_slides() {
    let slides = build_deck(SCENARIO);

    assert_eq!(
        slides,
        vec![
            slide(&["Title"], &["Hello world", "\n"]),
            slide(&["Next"], &["-", "a", "\n", "-", "b", "\n"]),
        ]
    );
}

#[test]
fn test_thematic_breaks_split_slides() {
    let markdown = "one\n\n---\n\ntwo\n\n---\n\nthree\n\n---\n\nfour";
    let slides = build_deck(markdown);

    assert_eq!(slides.len(), 4);
    assert_eq!(slides[3].content, strings(&["four", "\n"]));
}

#[test]
fn test_empty_slides_are_dropped() {
    let slides = build_deck("---\n\n---\n\n# Only\n\n---\n\n<!-- hidden -->\n");

    assert_eq!(slides, vec![slide(&["Only"], &[])]);
    assert!(slides.iter().all(|slide| !slide.is_empty()));
}

#[test]
fn test_empty_document_has_no_slides() {
    assert!(build_deck("").is_empty());
    assert!(segment(&Node::leaf(NodeKind::Document)).is_empty());
}

#[test]
fn test_setext_heading_is_ignored() {
    let slides = build_deck("Ignored\n=======\n\nBody");

    assert_eq!(slides, vec![slide(&[], &["Body", "\n"])]);
}

#[test]
fn test_code_span_is_quoted() {
    let slides = build_deck("Use `cargo` now");

    assert_eq!(slides[0].content, strings(&["Use ", "'cargo'", " now", "\n"]));
    assert_eq!(wrap(&slides[0].content), strings(&["Use 'cargo' now"]));
}

#[test]
fn test_html_tags_and_comments_are_dropped() {
    let slides = build_deck("a <b>bold</b> move <!-- aside -->");

    assert_eq!(wrap(&slides[0].content), strings(&["a bold move"]));
}

#[test]
fn test_link_title_precedes_link_text() {
    let slides = build_deck("[the docs](https://example.com \"Manual\")");

    assert_eq!(slides[0].content, strings(&["Manual", "the docs", "\n"]));
}

#[test]
fn test_autolink_emits_its_text() {
    let document = parse_markdown("<https://example.com>");
    let paragraph = &document.children[0];

    assert_eq!(
        paragraph.children[0].kind,
        NodeKind::AutoLink { title: None }
    );
    assert_eq!(
        segment(&document)[0].content,
        strings(&["https://example.com", "\n"])
    );
}

#[test]
fn test_line_breaks_split_paragraphs() {
    let slides = build_deck("line one\nline two");

    assert_eq!(
        slides[0].content,
        strings(&["line one", "\n", "line two", "\n"])
    );
    assert_eq!(wrap(&slides[0].content), strings(&["line one", "line two"]));
}

#[test]
fn test_fenced_code_keeps_its_lines() {
    let slides = build_deck("```\nlet a = 1;\nlet b = 2;\n```");

    assert_eq!(
        wrap(&slides[0].content),
        strings(&["let a = 1;", "let b = 2;"])
    );
}

#[test]
fn test_unordered_list_uses_bullet_character() {
    let slides = build_deck("* red\n* green\n* blue");

    assert_eq!(
        slides[0].content,
        strings(&["*", "red", "\n", "*", "green", "\n", "*", "blue", "\n"])
    );
}

#[test]
fn test_ordered_list_numbers_items() {
    let slides = build_deck("1. one\n2. two\n3. three");

    assert_eq!(
        slides[0].content,
        strings(&["1.", "one", "\n", "2.", "two", "\n", "3.", "three", "\n"])
    );
}

// Ordered markers come from halving the fragment index, so an item that
// flattens to more than one text fragment repeats its number and shifts the
// ones after it. Pinned as current behavior.
#[test]
fn test_ordered_list_index_halving_quirk() {
    let slides = build_deck("1. *a* b\n2. c");

    assert_eq!(
        slides[0].content,
        strings(&["1.", "a", "1.", "b", "\n", "2.", "c", "\n"])
    );
}

#[test]
fn test_list_marker_for_bullet() {
    assert_eq!(ListBullet::Unordered('+').marker(5), "+");
    assert_eq!(ListBullet::Ordered.marker(0), "1.");
    assert_eq!(ListBullet::Ordered.marker(3), "2.");
}

#[test]
fn test_unhandled_nodes_are_skipped() {
    let document = Node::new(
        NodeKind::Document,
        vec![
            Node::new(NodeKind::Heading, vec![Node::text("Hi")]),
            Node::leaf(NodeKind::BlankLine),
            Node::new(
                NodeKind::Other("table".to_string()),
                vec![Node::text("cells")],
            ),
            Node::new(
                NodeKind::Paragraph,
                vec![
                    Node::text("Body"),
                    Node::leaf(NodeKind::LineBreak),
                    Node::text("  "),
                ],
            ),
        ],
    );

    assert_eq!(segment(&document), vec![slide(&["Hi"], &["Body", "\n", "\n"])]);
}

#[test]
fn test_indented_code_is_unhandled() {
    let slides = build_deck("Text\n\n    indented code");

    assert_eq!(slides, vec![slide(&[], &["Text", "\n"])]);
}

#[test]
fn test_quote_contents_are_kept() {
    let slides = build_deck("> quoted **words**");

    assert_eq!(wrap(&slides[0].content), strings(&["quoted words"]));
}

#[test]
fn test_adjacent_text_nodes_are_merged() {
    let document = parse_markdown("don't [stop");
    let paragraph = &document.children[0];

    assert_eq!(paragraph.children, vec![Node::text("don't [stop")]);
}

#[test]
fn test_wrap_leaves_short_lines_unchanged() {
    let line = "A line that already fits the screen";
    assert_eq!(wrap_paragraph(line, WRAP_WIDTH), strings(&[line]));

    let wrapped = wrap_paragraph(line, WRAP_WIDTH);
    assert_eq!(wrap_paragraph(&wrapped[0], WRAP_WIDTH), wrapped);
}

#[test]
fn test_wrap_adds_blank_line_after_multi_line_paragraph() {
    let content = strings(&[
        "The quick brown fox jumps over the lazy dog again",
        "\n",
        "short",
        "\n",
    ]);

    assert_eq!(
        wrap(&content),
        strings(&[
            "The quick brown fox jumps over the",
            "lazy dog again",
            "",
            "short",
        ])
    );
}

#[test]
fn test_wrap_breaks_long_words() {
    let word = "x".repeat(80);
    let lines = wrap_paragraph(&word, WRAP_WIDTH);

    assert_eq!(lines, vec!["x".repeat(38), "x".repeat(38), "x".repeat(4)]);
}

#[test]
fn test_wrap_keeps_inner_whitespace() {
    assert_eq!(wrap_paragraph("x  =  1", WRAP_WIDTH), strings(&["x  =  1"]));
    assert_eq!(
        wrap(&strings(&["a\tb", "\n"])),
        strings(&["a       b"])
    );
}

#[test]
fn test_wrap_drops_whitespace_at_line_breaks() {
    let text = format!("{}    {}", "a".repeat(36), "b".repeat(5));

    assert_eq!(
        wrap_paragraph(&text, WRAP_WIDTH),
        vec!["a".repeat(36), "b".repeat(5)]
    );
}

#[test]
fn test_fenced_code_alignment_survives_layout() {
    let slides = build_deck("```\nlet  x  =  1;\nif a    { b }\n```\n");
    let layout = SlideLayout::new(&slides[0]);

    assert_eq!(layout.body, strings(&["let  x  =  1;", "if a    { b }"]));
}

#[test]
fn test_wrap_fills_line_before_breaking_long_word() {
    let text = format!("see {}", "a".repeat(40));

    assert_eq!(
        wrap_paragraph(&text, WRAP_WIDTH),
        vec![format!("see {}", "a".repeat(34)), "a".repeat(6)]
    );
}

#[test]
fn test_wrap_breaks_after_hyphen() {
    let text = "The quick brown fox jumps over a well-known lazy dog";

    assert_eq!(
        wrap_paragraph(text, WRAP_WIDTH),
        strings(&["The quick brown fox jumps over a well-", "known lazy dog"])
    );
}

#[test]
fn test_wrap_long_word_prefers_last_fitting_hyphen() {
    let text = format!("{}-{}", "1".repeat(20), "2".repeat(30));

    assert_eq!(
        wrap_paragraph(&text, WRAP_WIDTH),
        vec![format!("{}-", "1".repeat(20)), "2".repeat(30)]
    );
}

#[test]
fn test_wrap_does_not_break_numeric_ranges() {
    let text = format!("{} 10-20", "w".repeat(33));

    assert_eq!(
        wrap_paragraph(&text, WRAP_WIDTH),
        vec!["w".repeat(33), "10-20".to_string()]
    );
}

#[test]
fn test_wrap_skips_blank_paragraphs() {
    let content = strings(&["\n", "  ", "\n", "word", "\n"]);

    assert_eq!(wrap(&content), strings(&["word"]));
}

#[test]
fn test_layout_centers_heading_and_body() {
    let layout = SlideLayout::new(&slide(&["Title"], &["Hello world", "\n"]));

    assert_eq!(layout.headings.len(), 1);
    assert_eq!(layout.headings[0].indent, 17);
    assert_eq!(layout.headings[0].x, 122);
    assert_eq!(layout.headings[0].y, 7);
    assert_eq!(layout.header_height, 7);
    assert_eq!(layout.body, strings(&["Hello world"]));
    assert_eq!(layout.body_height, 8);
    // (192 - 14 - 8) / 2 / 7
    assert_eq!(layout.padding_lines, 12);
    assert_eq!(layout.body_offset(), 84);
}

#[test]
fn test_layout_without_heading() {
    let layout = SlideLayout::new(&slide(&[], &["Body", "\n"]));

    assert_eq!(layout.header_height, 0);
    // (192 - 7 - 8) / 2 / 7
    assert_eq!(layout.padding_lines, 12);
}

#[test]
fn test_layout_multiple_headings_and_long_heading() {
    let long = "H".repeat(44);
    let layout = SlideLayout::new(&slide(&["  First ", " ", &long], &[]));

    assert_eq!(layout.headings.len(), 2);
    assert_eq!(layout.headings[0].text, "First");
    assert_eq!(layout.headings[1].y, 15);
    assert_eq!(layout.headings[1].indent, 0);
    assert_eq!(layout.headings[1].x, -14);
    assert_eq!(layout.header_height, 15);
}

#[test]
fn test_layout_padding_goes_negative_on_overflow() {
    let mut content = Vec::new();
    for index in 0..30 {
        content.push(format!("line {}", index));
        content.push("\n".to_string());
    }
    let layout = SlideLayout::new(&Slide {
        heading: Vec::new(),
        content,
    });

    assert_eq!(layout.body_height, 240);
    // floor(floor(-55 / 2) / 7)
    assert_eq!(layout.padding_lines, -4);

    let statements = listing::emit(&layout);
    assert!(!statements.contains(&Statement::Print(None)));
}

#[test]
fn test_string_expression_plain_text() {
    assert_eq!(string_expression("HELLO"), "\"HELLO\"");
    assert_eq!(string_expression(""), "\"\"");
}

#[test]
fn test_string_expression_escapes_hash_and_quotes() {
    assert_eq!(
        string_expression("issue #4"),
        "\"issue \"; CHR$(35); \"4\""
    );
    assert_eq!(
        string_expression("say \"hi\""),
        "\"say \"; CHR$(34); \"hi\"; CHR$(34)"
    );
}

#[test]
fn test_string_expression_round_trips() {
    for text in [
        " a \"quoted\" #1; done",
        "#",
        "\"\"",
        "plain: text; here",
        "",
    ] {
        let expression = string_expression(text);
        assert_eq!(evaluate_expression(&expression), text);
        assert_eq!(string_expression(&evaluate_expression(&expression)), expression);
    }
}

#[test]
fn test_statement_display() {
    assert_eq!(Statement::Home.to_string(), "HOME");
    assert_eq!(Statement::Color(6).to_string(), "COLOR = 6");
    assert_eq!(Statement::Print(None).to_string(), "PRINT");
    assert_eq!(Statement::print(" #1").to_string(), "PRINT \" \"; CHR$(35); \"1\"");
    assert_eq!(Statement::Get("A$".to_string()).to_string(), "GET A$");
}

#[test]
fn test_emit_scenario_slide() {
    let layout = SlideLayout::new(&slide(&["Title"], &["Hello world", "\n"]));
    let statements = listing::emit(&layout);

    let mut expected = vec![
        Statement::Home,
        Statement::Color(6),
        Statement::print(format!("{}Title", " ".repeat(17))),
        Statement::Color(1),
    ];
    expected.extend(std::iter::repeat(Statement::Print(None)).take(12));
    expected.push(Statement::print(" Hello world"));
    expected.push(Statement::Get("A$".to_string()));

    assert_eq!(statements, expected);
}

#[test]
fn test_emit_blank_separator_and_empty_body() {
    let layout = SlideLayout::new(&slide(
        &[],
        &["The quick brown fox jumps over the lazy dog again", "\n"],
    ));
    let statements = listing::emit(&layout);
    assert!(statements.contains(&Statement::print("")));

    let heading_only = listing::emit(&SlideLayout::new(&slide(&["Only"], &[])));
    assert_eq!(heading_only.len(), 5);
    assert_eq!(heading_only[4], Statement::Get("A$".to_string()));
}

#[test]
fn test_listing_numbers_lines_by_ten() {
    let mut program = Listing::new();
    for slide in build_deck(SCENARIO) {
        program.extend(listing::emit(&SlideLayout::new(&slide)));
    }

    let lines: Vec<String> = program.lines().collect();
    assert_eq!(lines.len(), 36);
    assert_eq!(lines[0], "10: HOME");
    assert_eq!(lines[1], "20: COLOR = 6");
    assert_eq!(lines[16], "170: PRINT \" Hello world\"");
    assert_eq!(lines[35], "360: GET A$");
    assert!(program.to_program().ends_with("360: GET A$\n"));
}

#[test]
fn test_render_image_places_heading_and_body() {
    let layout = SlideLayout::new(&slide(&["Title"], &["Hello world", "\n"]));
    let image = render_image(&layout, &BitmapFont);

    assert_eq!(image.dimensions(), (280, 192));

    let red = pixel_rows(&image, HEADING_COLOR);
    assert!(!red.is_empty());
    assert!(red.iter().all(|y| (7..15).contains(y)));

    let white = pixel_rows(&image, BODY_COLOR);
    assert!(!white.is_empty());
    assert!(white.iter().all(|y| (92..100).contains(y)));
}

#[test]
fn test_render_image_body_does_not_erase_heading() {
    let mut content = Vec::new();
    for index in 0..20 {
        content.push(format!("line {}", index));
        content.push("\n".to_string());
    }
    let layout = SlideLayout::new(&Slide {
        heading: strings(&["Heading"]),
        content,
    });
    let image = render_image(&layout, &BitmapFont);

    assert!(!pixel_rows(&image, HEADING_COLOR).is_empty());
}

#[test]
fn test_render_slide_produces_both_outputs() {
    let rendered = render_slide(&slide(&["Next"], &["-", "a", "\n"]), &BitmapFont);

    assert_eq!(rendered.image.dimensions(), (280, 192));
    assert_eq!(rendered.statements[0], Statement::Home);
    assert!(rendered.statements.contains(&Statement::print(" - a")));
}

#[test]
fn test_load_font_missing_file_is_fatal() {
    let result = load_font(Some(std::path::Path::new("/nonexistent/PrintChar21.ttf")));

    assert!(matches!(result, Err(DeckError::PathNotFoundError(_))));
}

#[test]
fn test_load_font_rejects_non_font_data() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"definitely not a font")
        .expect("Failed to write to temp file");

    let result = TrueTypeFont::from_file(file.path());

    assert!(matches!(result, Err(DeckError::FontError(_))));
}

#[test]
fn test_render_config_overrides() {
    let config = Config::new();
    let render_config = config
        .get_render_config(None, Some("out/program.txt".into()), None, Some("deck".into()))
        .expect("valid render config");

    assert_eq!(render_config.output_dir, config.output_dir);
    assert_eq!(render_config.listing_path, std::path::PathBuf::from("out/program.txt"));
    assert_eq!(render_config.image_path(3), config.output_dir.join("deck_3.png"));
}

#[test]
fn test_render_config_rejects_empty_base_name() {
    let result = Config::new().get_render_config(None, None, None, Some("  ".into()));

    assert!(matches!(result, Err(DeckError::ConfigError(_))));
}

#[test]
fn test_outline_lists_headings_and_paragraphs() {
    let text = outline(&build_deck(SCENARIO));

    assert!(text.starts_with("Title\n  Hello world\n"));
    assert!(text.contains("Next\n  - a\n  - b\n"));
    assert_eq!(text.matches(&"-".repeat(40)).count(), 2);
}
