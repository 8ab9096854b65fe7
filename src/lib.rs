// ABOUTME: Library module for the big-apple program.
// ABOUTME: Turns markdown into slide images and an Applesoft BASIC listing.

// Reexport modules
pub mod config;
pub mod errors;
pub mod layout;
pub mod listing;
pub mod markdown;
pub mod raster;
pub mod render;
pub mod slide;
pub mod utils;
pub mod walker;

// Reexport common types and functions
pub use config::Config;
pub use errors::{DeckError, Result};
pub use layout::{wrap, SlideLayout};
pub use listing::{Listing, Statement};
pub use markdown::{parse_markdown, ListBullet, Node, NodeKind};
pub use raster::{load_font, BitmapFont, GlyphFont, TrueTypeFont};
pub use render::{build_deck, generate_slides, render_slide, DeckOutput, RenderConfig, RenderedSlide};
pub use slide::{outline, Slide};
pub use walker::segment;

#[cfg(test)]
mod tests;
