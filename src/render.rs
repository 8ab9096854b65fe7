// ABOUTME: Deck rendering pipeline for the big-apple application
// ABOUTME: Reads markdown, builds slides and writes one PNG per slide plus the BASIC listing

use crate::config::{DEFAULT_BASE_NAME, DEFAULT_LISTING, DEFAULT_OUTPUT_DIR};
use crate::errors::{DeckError, Result};
use crate::layout::SlideLayout;
use crate::listing::{self, Listing, Statement};
use crate::markdown::parse_markdown;
use crate::raster::{load_font, render_image, GlyphFont};
use crate::slide::Slide;
use crate::utils::{ensure_directory_exists, ensure_parent_directory_exists, validate_file_exists};
use crate::walker::segment;
use image::RgbImage;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for deck rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub listing_path: PathBuf,
    pub font_path: Option<PathBuf>,
    pub base_name: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            listing_path: PathBuf::from(DEFAULT_LISTING),
            font_path: None,
            base_name: DEFAULT_BASE_NAME.to_string(),
        }
    }
}

impl RenderConfig {
    /// Path of the image for the slide at `index`.
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.png", self.base_name, index))
    }
}

/// Both renderings of one slide.
#[derive(Debug, Clone)]
pub struct RenderedSlide {
    pub image: RgbImage,
    pub statements: Vec<Statement>,
}

/// What a deck run wrote to disk.
#[derive(Debug, Clone)]
pub struct DeckOutput {
    pub slide_count: usize,
    pub images: Vec<PathBuf>,
    pub listing: PathBuf,
}

/// Parse markdown source and split it into slides.
pub fn build_deck(markdown: &str) -> Vec<Slide> {
    segment(&parse_markdown(markdown))
}

/// Lay out one slide and render it both as an image and as BASIC statements.
pub fn render_slide(slide: &Slide, font: &dyn GlyphFont) -> RenderedSlide {
    let layout = SlideLayout::new(slide);
    RenderedSlide {
        image: render_image(&layout, font),
        statements: listing::emit(&layout),
    }
}

/// Generate slide images and the BASIC listing from a markdown file
pub fn generate_slides(markdown_path: &Path, config: &RenderConfig) -> Result<DeckOutput> {
    info!("Generating slides from markdown: {:?}", markdown_path);

    validate_file_exists(markdown_path)?;
    let markdown = fs::read_to_string(markdown_path).map_err(DeckError::FileReadError)?;

    let font = load_font(config.font_path.as_deref())?;
    let slides = build_deck(&markdown);
    info!("Found {} slides", slides.len());

    ensure_directory_exists(&config.output_dir)?;
    ensure_parent_directory_exists(&config.listing_path)?;

    let mut images = Vec::with_capacity(slides.len());
    let mut program = Listing::new();

    for (index, slide) in slides.iter().enumerate() {
        let rendered = render_slide(slide, font.as_ref());
        let image_path = config.image_path(index);

        info!("Rendering {:?}", image_path);
        rendered.image.save(&image_path)?;

        images.push(image_path);
        program.extend(rendered.statements);
    }

    program.write_to_file(&config.listing_path)?;

    Ok(DeckOutput {
        slide_count: slides.len(),
        images,
        listing: config.listing_path.clone(),
    })
}
