//! Font roles and their ordered fallback chains.
//!
//! Each role tries its candidates in order and settles on the first file that
//! parses. When every candidate fails, the role gets the approximate face: a
//! static metric table that still wraps and centers correctly but draws
//! placeholder blocks instead of glyph outlines.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusttype::{point, Font, Scale};
use tracing::{debug, info, warn};

use crate::layout::{get_metrics, FontMetricTable, MetricFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Title,
    Section,
    Code,
    Answer,
    Footer,
}

impl FontRole {
    pub const ALL: [FontRole; 5] = [
        FontRole::Title,
        FontRole::Section,
        FontRole::Code,
        FontRole::Answer,
        FontRole::Footer,
    ];

    pub fn pixel_size(&self) -> f32 {
        match self {
            FontRole::Title => 80.0,
            FontRole::Section => 48.0,
            FontRole::Code => 44.0,
            FontRole::Answer => 46.0,
            FontRole::Footer => 52.0,
        }
    }

    pub fn family(&self) -> MetricFamily {
        match self {
            FontRole::Code | FontRole::Answer => MetricFamily::Mono,
            FontRole::Title | FontRole::Section | FontRole::Footer => MetricFamily::Sans,
        }
    }
}

/// Candidate font files for a family, most preferred first.
pub fn font_candidates(family: MetricFamily, assets_dir: &Path) -> Vec<PathBuf> {
    let (bundled, system): (&str, &[&str]) = match family {
        MetricFamily::Sans => (
            "sans.ttf",
            &[
                "/System/Library/Fonts/SFNS.ttf",
                "/Library/Fonts/Arial.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
            ],
        ),
        MetricFamily::Mono => (
            "mono.ttf",
            &[
                "/System/Library/Fonts/SFNSMono.ttf",
                "/Library/Fonts/Menlo.ttc",
                "/System/Library/Fonts/Menlo.ttc",
                "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
                "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
            ],
        ),
    };

    std::iter::once(assets_dir.join("fonts").join(bundled))
        .chain(system.iter().map(PathBuf::from))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Face
// ────────────────────────────────────────────────────────────────────────────

/// A font at a fixed pixel size.
#[derive(Clone)]
pub enum Face {
    TrueType { font: Font<'static>, scale: Scale },
    Approximate { table: &'static FontMetricTable, px: f32 },
}

impl Face {
    pub fn approximate(role: FontRole) -> Self {
        Face::Approximate {
            table: get_metrics(role.family()),
            px: role.pixel_size(),
        }
    }

    /// Horizontal advance of `text` in pixels, kerning included.
    pub fn text_width(&self, text: &str) -> f32 {
        match self {
            Face::TrueType { font, scale } => font
                .layout(text, *scale, point(0.0, 0.0))
                .last()
                .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0),
            Face::Approximate { table, px } => table.measure_str(text) * px,
        }
    }

    /// Distance from the top of the text box to the baseline.
    pub fn ascent(&self) -> f32 {
        match self {
            Face::TrueType { font, scale } => font.v_metrics(*scale).ascent,
            Face::Approximate { table, px } => table.ascent * px,
        }
    }
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::TrueType { scale, .. } => write!(f, "TrueType({}px)", scale.y),
            Face::Approximate { table, px } => write!(f, "Approximate({:?}, {px}px)", table.family),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font set
// ────────────────────────────────────────────────────────────────────────────

/// One resolved face per role, shared by both slides of a run.
#[derive(Debug, Clone)]
pub struct FontSet {
    faces: HashMap<FontRole, Face>,
}

impl FontSet {
    /// Resolves every role through its fallback chain. Never fails.
    pub fn load(assets_dir: &Path) -> Self {
        let mut parsed: HashMap<PathBuf, Option<Font<'static>>> = HashMap::new();
        let mut faces = HashMap::new();

        for role in FontRole::ALL {
            let candidates = font_candidates(role.family(), assets_dir);
            let found = candidates.iter().find_map(|path| {
                parsed
                    .entry(path.clone())
                    .or_insert_with(|| load_font_file(path))
                    .clone()
                    .map(|font| (path, font))
            });

            let face = match found {
                Some((path, font)) => {
                    info!(?role, path = %path.display(), "Font resolved");
                    Face::TrueType {
                        font,
                        scale: Scale::uniform(role.pixel_size()),
                    }
                }
                None => {
                    warn!(?role, "No font candidate could be loaded, using approximate face");
                    Face::approximate(role)
                }
            };
            faces.insert(role, face);
        }

        Self { faces }
    }

    /// All roles on the approximate face. Output depends on nothing installed
    /// on the machine.
    #[cfg(test)]
    pub fn approximate() -> Self {
        Self {
            faces: FontRole::ALL
                .into_iter()
                .map(|role| (role, Face::approximate(role)))
                .collect(),
        }
    }

    pub fn face(&self, role: FontRole) -> &Face {
        // `load` and `approximate` both insert every role.
        &self.faces[&role]
    }
}

fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Font candidate unavailable");
            return None;
        }
    };
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        warn!(path = %path.display(), "Font file could not be parsed");
    }
    font
}
