// ABOUTME: Configuration module for the big-apple application
// ABOUTME: Provides default paths and environment variable handling

use crate::errors::{DeckError, Result};
use crate::render::RenderConfig;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "slides.md";
pub const DEFAULT_OUTPUT_DIR: &str = "slides";
pub const DEFAULT_LISTING: &str = "applesoft_basic.txt";
pub const DEFAULT_BASE_NAME: &str = "slide";

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub listing_path: PathBuf,
    pub font_path: Option<PathBuf>,
    pub base_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            listing_path: PathBuf::from(DEFAULT_LISTING),
            font_path: None,
            base_name: DEFAULT_BASE_NAME.to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let path_var = |name: &str| env::var(name).ok().filter(|value| !value.is_empty());

        Self {
            input_path: path_var("SLIDES_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            output_dir: path_var("SLIDES_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            listing_path: path_var("SLIDES_LISTING")
                .map(PathBuf::from)
                .unwrap_or(defaults.listing_path),
            font_path: path_var("SLIDES_FONT").map(PathBuf::from),
            base_name: path_var("SLIDES_BASE_NAME").unwrap_or(defaults.base_name),
        }
    }

    /// Get a render configuration, letting explicit values override this config
    pub fn get_render_config(
        &self,
        output_dir: Option<PathBuf>,
        listing_path: Option<PathBuf>,
        font_path: Option<PathBuf>,
        base_name: Option<String>,
    ) -> Result<RenderConfig> {
        let base_name = base_name.unwrap_or_else(|| self.base_name.clone());
        if base_name.trim().is_empty() {
            return Err(DeckError::ConfigError(
                "Image base name must not be empty".to_string(),
            ));
        }

        Ok(RenderConfig {
            output_dir: output_dir.unwrap_or_else(|| self.output_dir.clone()),
            listing_path: listing_path.unwrap_or_else(|| self.listing_path.clone()),
            font_path: font_path.or_else(|| self.font_path.clone()),
            base_name,
        })
    }
}
