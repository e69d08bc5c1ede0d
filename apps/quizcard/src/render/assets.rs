//! Image assets: the required card texture and the optional glyphs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{imageops::FilterType, DynamicImage, RgbaImage};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::Difficulty;

pub const BRAND_SIZE: u32 = 100;
pub const BADGE_SIZE: u32 = 60;
pub const ARROW_SIZE: u32 = 60;
pub const FOOTER_GLYPH_SIZE: u32 = 70;

/// Where each asset lives under the asset root.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn background(&self) -> PathBuf {
        self.root.join("backgrounds").join("bg.png")
    }

    pub fn brand(&self) -> PathBuf {
        self.root.join("pythonlogo.png")
    }

    pub fn arrow(&self) -> PathBuf {
        self.root.join("rightarrow.png")
    }

    pub fn snake(&self) -> PathBuf {
        self.root.join("snake.png")
    }

    pub fn bulb(&self) -> PathBuf {
        self.root.join("lightbulb.png")
    }

    pub fn badge(&self, difficulty: Difficulty) -> PathBuf {
        let file = match difficulty {
            Difficulty::Easy => "green.png",
            Difficulty::Medium => "yellow.png",
            Difficulty::Hard => "red.png",
        };
        self.root.join(file)
    }
}

/// Decoded assets, with glyphs already resized to their drawn size.
#[derive(Debug, Clone)]
pub struct SlideAssets {
    pub background: DynamicImage,
    pub brand: Option<RgbaImage>,
    pub arrow: Option<RgbaImage>,
    pub snake: Option<RgbaImage>,
    pub bulb: Option<RgbaImage>,
    badges: HashMap<Difficulty, RgbaImage>,
}

impl SlideAssets {
    /// Loads everything. Only the background texture is required.
    pub fn load(paths: &AssetPaths) -> Result<Self, AppError> {
        let background_path = paths.background();
        if !background_path.exists() {
            return Err(AppError::MissingAsset(background_path));
        }
        let background = image::open(&background_path).map_err(|source| AppError::Image {
            path: background_path.clone(),
            source,
        })?;

        let badges = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .filter_map(|d| load_glyph(&paths.badge(d), BADGE_SIZE).map(|img| (d, img)))
            .collect();

        Ok(Self {
            background,
            brand: load_glyph(&paths.brand(), BRAND_SIZE),
            arrow: load_glyph(&paths.arrow(), ARROW_SIZE),
            snake: load_glyph(&paths.snake(), FOOTER_GLYPH_SIZE),
            bulb: load_glyph(&paths.bulb(), FOOTER_GLYPH_SIZE),
            badges,
        })
    }

    pub fn badge(&self, difficulty: Difficulty) -> Option<&RgbaImage> {
        self.badges.get(&difficulty)
    }
}

/// Opens and resizes an optional glyph. Absent or undecodable files yield
/// `None` and the element is left out of the slide.
fn load_glyph(path: &Path, size: u32) -> Option<RgbaImage> {
    if !path.exists() {
        debug!(path = %path.display(), "Optional glyph not found, skipping");
        return None;
    }
    match image::open(path) {
        Ok(img) => Some(img.resize_exact(size, size, FilterType::CatmullRom).to_rgba8()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Optional glyph could not be decoded, skipping");
            None
        }
    }
}
