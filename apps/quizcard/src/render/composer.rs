//! Card composer: renders either slide of a pair onto a 1080×1920 canvas.
//!
//! Both kinds share the header, card, badge, day label and divider; they
//! differ only in the subtitle, the card's vertical offset, the body
//! sections and the footer, all selected by `SlideKind`.

use std::path::{Path, PathBuf};

use image::{imageops::FilterType, DynamicImage, Rgba, RgbImage};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::layout::{prepare_code, wrap_lines, wrap_text, CardMetrics, LayoutBlock};
use crate::models::{QuestionRecord, SequenceId, SlideKind};
use crate::render::assets::{SlideAssets, ARROW_SIZE, FOOTER_GLYPH_SIZE};
use crate::render::canvas::{self, rgb};
use crate::render::fonts::{FontRole, FontSet};

// ────────────────────────────────────────────────────────────────────────────
// Geometry and palette
// ────────────────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: u32 = 1080;
pub const CANVAS_HEIGHT: u32 = 1920;

const CARD_X: u32 = 40;
const CARD_WIDTH: u32 = 1000;
const CARD_PADDING: u32 = 50;
const CARD_RADIUS: u32 = 60;
/// Usable text width inside the card.
pub const TEXT_WIDTH: f32 = (CARD_WIDTH - 2 * CARD_PADDING) as f32;

const TITLE_POS: (f32, f32) = (60.0, 130.0);
const SUBTITLE_POS: (f32, f32) = (60.0, 300.0);
const BRAND_POS: (i64, i64) = (920, 110);

const DAY_LABEL_DROP: u32 = 8;
/// Badge row height; the divider sits at the bottom of it.
const HEADING_HEIGHT: u32 = 100;
const DIVIDER_THICKNESS: u32 = 2;
const DIVIDER_TO_BODY: u32 = 40;

const FOOTER_GAP: u32 = 80;
const ARROW_GAP: f32 = 20.0;
const FOOTER_GLYPH_LEAD: f32 = 80.0;
const FOOTER_LINE_SPACING: f32 = 90.0;

const WHITE: Rgba<u8> = rgb(0xffffff);
const BLACK: Rgba<u8> = rgb(0x000000);
const INK: Rgba<u8> = rgb(0x1f2937);
const ANSWER_GREEN: Rgba<u8> = rgb(0x22c55e);

const TITLE: &str = "Daily Python Questions";
const QUESTION_SUBTITLE: &str = "Practice makes Python. Here's your daily question:";
const ANSWER_SUBTITLE: &str = "Answer & Explanation";
const SWIPE_PROMPT: &str = "Swipe for answer and explanation";
const FOLLOW_PROMPTS: [&str; 2] = ["Want more Python gems?", "Follow for daily insights and tips"];

fn subtitle(kind: SlideKind) -> &'static str {
    match kind {
        SlideKind::Question => QUESTION_SUBTITLE,
        SlideKind::Answer => ANSWER_SUBTITLE,
    }
}

/// Top edge of the card. The answer slide's subtitle is one line, so its
/// card starts higher.
pub fn card_top(kind: SlideKind) -> u32 {
    match kind {
        SlideKind::Question => 520,
        SlideKind::Answer => 440,
    }
}

/// First row of the body, below the badge row and divider.
fn body_top(card_y: u32) -> u32 {
    card_y + CARD_PADDING + HEADING_HEIGHT + DIVIDER_TO_BODY
}

fn footer_top(card_y: u32, card_height: u32) -> u32 {
    card_y + card_height + FOOTER_GAP
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A group of body lines drawn after `gap_before` pixels of extra space.
#[derive(Debug, Clone)]
struct Section {
    blocks: Vec<LayoutBlock>,
    gap_before: u32,
}

/// A rendered slide, ready to be written.
#[derive(Debug, Clone)]
pub struct ComposedSlide {
    pub kind: SlideKind,
    pub sequence: SequenceId,
    pub card_height: u32,
    /// Wrapped lines drawn inside the card body.
    pub body_lines: usize,
    pub image: RgbImage,
}

impl ComposedSlide {
    pub fn output_path(&self, output_root: &Path) -> PathBuf {
        output_root
            .join(self.kind.directory())
            .join(self.kind.file_name(&self.sequence))
    }

    /// Writes the slide under `output_root`, creating its directory first.
    /// An existing file for the same sequence and kind is overwritten.
    pub fn save_under(&self, output_root: &Path) -> Result<PathBuf, AppError> {
        let path = self.output_path(output_root);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| AppError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        self.image.save(&path).map_err(|source| AppError::Write {
            path: path.clone(),
            source,
        })?;
        info!(kind = ?self.kind, path = %path.display(), "Slide written");
        Ok(path)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composer
// ────────────────────────────────────────────────────────────────────────────

pub struct SlideComposer<'a> {
    fonts: &'a FontSet,
    assets: &'a SlideAssets,
    metrics: CardMetrics,
}

impl<'a> SlideComposer<'a> {
    pub fn new(fonts: &'a FontSet, assets: &'a SlideAssets) -> Self {
        Self {
            fonts,
            assets,
            metrics: CardMetrics::default(),
        }
    }

    /// Card height `kind` would get for `record`, without rendering.
    #[cfg(test)]
    pub fn card_height(&self, record: &QuestionRecord, kind: SlideKind) -> u32 {
        let sections = self.body_sections(record, kind);
        self.height_of(&sections)
    }

    pub fn compose(
        &self,
        record: &QuestionRecord,
        sequence: SequenceId,
        kind: SlideKind,
    ) -> ComposedSlide {
        let sections = self.body_sections(record, kind);
        let card_height = self.height_of(&sections);
        let body_lines = sections.iter().map(|s| s.blocks.len()).sum();
        let card_y = card_top(kind);
        debug!(?kind, %sequence, card_height, body_lines, "Composing slide");

        let mut canvas = canvas::blank(CANVAS_WIDTH, CANVAS_HEIGHT, WHITE);
        self.draw_header(&mut canvas, kind);
        self.draw_card(&mut canvas, card_y, card_height);
        self.draw_heading(&mut canvas, record, &sequence, card_y);
        self.draw_body(&mut canvas, &sections, card_y);

        let footer_y = footer_top(card_y, card_height) as f32;
        match kind {
            SlideKind::Question => self.draw_swipe_footer(&mut canvas, footer_y),
            SlideKind::Answer => self.draw_follow_footer(&mut canvas, footer_y),
        }

        ComposedSlide {
            kind,
            sequence,
            card_height,
            body_lines,
            image: DynamicImage::ImageRgba8(canvas).to_rgb8(),
        }
    }

    fn height_of(&self, sections: &[Section]) -> u32 {
        let groups: Vec<&[LayoutBlock]> = sections.iter().map(|s| s.blocks.as_slice()).collect();
        self.metrics.estimate_height(&groups)
    }

    fn wrap_for(&self, role: FontRole, lines: &[String]) -> Vec<String> {
        let face = self.fonts.face(role);
        wrap_lines(lines, TEXT_WIDTH, |s| face.text_width(s))
    }

    fn body_sections(&self, record: &QuestionRecord, kind: SlideKind) -> Vec<Section> {
        let code = self.fonts.face(FontRole::Code);
        let question = Section {
            blocks: LayoutBlock::from_lines(
                self.wrap_for(FontRole::Code, &prepare_code(&record.question)),
                FontRole::Code,
                WHITE,
            ),
            gap_before: 0,
        };

        match kind {
            SlideKind::Question => {
                let options = record
                    .options
                    .iter()
                    .flat_map(|opt| wrap_text(opt, TEXT_WIDTH, |s| code.text_width(s)))
                    .collect();
                vec![
                    question,
                    Section {
                        blocks: LayoutBlock::from_lines(options, FontRole::Code, WHITE),
                        gap_before: 30,
                    },
                ]
            }
            SlideKind::Answer => {
                let answer_line = format!("Answer: {}", record.resolved_answer());
                let answer = self.wrap_for(FontRole::Answer, &[answer_line]);
                let explanation = self.wrap_for(FontRole::Code, &[record.explanation.clone()]);
                vec![
                    question,
                    Section {
                        blocks: LayoutBlock::from_lines(answer, FontRole::Answer, ANSWER_GREEN),
                        gap_before: 20,
                    },
                    Section {
                        blocks: LayoutBlock::from_lines(explanation, FontRole::Code, WHITE),
                        gap_before: 10,
                    },
                ]
            }
        }
    }

    fn draw_header(&self, canvas: &mut image::RgbaImage, kind: SlideKind) {
        let title = self.fonts.face(FontRole::Title);
        canvas::draw_text(canvas, title, TITLE_POS.0, TITLE_POS.1, TITLE, BLACK);

        let section = self.fonts.face(FontRole::Section);
        canvas::draw_text(canvas, section, SUBTITLE_POS.0, SUBTITLE_POS.1, subtitle(kind), INK);

        if let Some(brand) = &self.assets.brand {
            canvas::overlay(canvas, brand, BRAND_POS.0, BRAND_POS.1);
        }
    }

    fn draw_card(&self, canvas: &mut image::RgbaImage, card_y: u32, card_height: u32) {
        let mut card = self
            .assets
            .background
            .resize_exact(CARD_WIDTH, card_height, FilterType::CatmullRom)
            .to_rgba8();
        canvas::round_corners(&mut card, CARD_RADIUS);
        canvas::overlay(canvas, &card, CARD_X as i64, card_y as i64);
    }

    /// Badge, centered day label and divider at the top of the card.
    fn draw_heading(
        &self,
        canvas: &mut image::RgbaImage,
        record: &QuestionRecord,
        sequence: &SequenceId,
        card_y: u32,
    ) {
        let inner_x = CARD_X + CARD_PADDING;
        let inner_y = card_y + CARD_PADDING;

        if let Some(badge) = self.assets.badge(record.difficulty) {
            canvas::overlay(canvas, badge, inner_x as i64, inner_y as i64);
        }

        let title = self.fonts.face(FontRole::Title);
        let label = sequence.label();
        let label_w = title.text_width(&label);
        let label_x = (CARD_X as f32 + (CARD_WIDTH as f32 - label_w) / 2.0).floor();
        canvas::draw_text(
            canvas,
            title,
            label_x,
            (inner_y + DAY_LABEL_DROP) as f32,
            &label,
            WHITE,
        );

        let divider_y = inner_y + HEADING_HEIGHT;
        canvas::draw_hline(
            canvas,
            inner_x as i32,
            (CARD_X + CARD_WIDTH - CARD_PADDING) as i32,
            divider_y as i32,
            DIVIDER_THICKNESS,
            WHITE,
        );
    }

    fn draw_body(&self, canvas: &mut image::RgbaImage, sections: &[Section], card_y: u32) {
        let x = (CARD_X + CARD_PADDING) as f32;
        let mut y = body_top(card_y);

        for section in sections {
            y += section.gap_before;
            for block in &section.blocks {
                let face = self.fonts.face(block.role);
                canvas::draw_text(canvas, face, x, y as f32, &block.text, block.color);
                y += self.metrics.line_height;
            }
        }
    }

    /// Prompt centered together with the arrow glyph that follows it.
    fn draw_swipe_footer(&self, canvas: &mut image::RgbaImage, y: f32) {
        let face = self.fonts.face(FontRole::Footer);
        let text_w = face.text_width(SWIPE_PROMPT);
        let x = ((CANVAS_WIDTH as f32 - text_w - ARROW_SIZE as f32 - ARROW_GAP) / 2.0).floor();
        canvas::draw_text(canvas, face, x, y, SWIPE_PROMPT, INK);

        if let Some(arrow) = &self.assets.arrow {
            let arrow_x = x + text_w + ARROW_GAP;
            let arrow_y = y + face.ascent() / 2.0 - ARROW_SIZE as f32 / 2.0;
            canvas::overlay(canvas, arrow, arrow_x as i64, arrow_y as i64);
        }
    }

    /// Two centered follow prompts, each led by its glyph.
    fn draw_follow_footer(&self, canvas: &mut image::RgbaImage, mut y: f32) {
        let face = self.fonts.face(FontRole::Footer);
        let glyphs = [&self.assets.snake, &self.assets.bulb];

        for (text, glyph) in FOLLOW_PROMPTS.iter().zip(glyphs) {
            let text_w = face.text_width(text);
            let text_x = ((CANVAS_WIDTH as f32 - text_w) / 2.0).floor();
            if let Some(glyph) = glyph {
                let glyph_x = text_x - FOOTER_GLYPH_LEAD;
                let glyph_y = y + face.ascent() / 2.0 - FOOTER_GLYPH_SIZE as f32 / 2.0;
                canvas::overlay(canvas, glyph, glyph_x as i64, glyph_y as i64);
            }
            canvas::draw_text(canvas, face, text_x, y, text, INK);
            y += FOOTER_LINE_SPACING;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use crate::render::assets::{AssetPaths, BADGE_SIZE};
    use image::RgbaImage;

    const TEXTURE: Rgba<u8> = Rgba([10, 20, 30, 255]);

    fn write_png(path: &Path, w: u32, h: u32, color: Rgba<u8>) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(w, h, color).save(path).unwrap();
    }

    fn make_assets(dir: &Path) -> SlideAssets {
        let paths = AssetPaths::new(dir);
        write_png(&paths.background(), 64, 64, TEXTURE);
        SlideAssets::load(&paths).unwrap()
    }

    fn make_record(question_lines: usize) -> QuestionRecord {
        let question = (0..question_lines)
            .map(|i| format!("x{i} = {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        QuestionRecord {
            difficulty: Difficulty::Medium,
            question,
            options: [
                "A) 1".to_string(),
                "B) 2".to_string(),
                "C) 3".to_string(),
                "D) Error".to_string(),
            ],
            answer: "B".to_string(),
            explanation: "Only the last assignment counts.".to_string(),
        }
    }

    fn expected_height(lines: u32) -> u32 {
        (200 + lines * 60 + 150).max(950)
    }

    #[test]
    fn test_text_width_budget_is_card_minus_padding() {
        assert_eq!(TEXT_WIDTH, 900.0);
    }

    #[test]
    fn test_card_height_short_record_hits_minimum() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);
        let record = make_record(3);

        // 3 question + 4 option lines; 3 question + 1 answer + 1 explanation.
        assert_eq!(composer.card_height(&record, SlideKind::Question), expected_height(7));
        assert_eq!(composer.card_height(&record, SlideKind::Answer), expected_height(5));
        assert_eq!(composer.card_height(&record, SlideKind::Question), 950);
    }

    #[test]
    fn test_card_height_grows_with_question_length() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);
        let record = make_record(10);

        assert_eq!(composer.card_height(&record, SlideKind::Question), expected_height(14));
        assert_eq!(composer.card_height(&record, SlideKind::Answer), expected_height(12));
        assert_eq!(composer.card_height(&record, SlideKind::Question), 1190);
    }

    #[test]
    fn test_long_explanation_wraps_into_card_height() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);
        let mut record = make_record(10);
        // 34 mono chars fit in 900 px at 44 px; this needs several lines.
        record.explanation = "word ".repeat(40);

        let slide = composer.compose(&record, SequenceId::daily(1), SlideKind::Answer);
        assert!(slide.body_lines > 12, "explanation should wrap, got {}", slide.body_lines);
        assert_eq!(slide.card_height, expected_height(slide.body_lines as u32));
    }

    /// Bottom edge of the last body line, laid out the way `draw_body` does.
    fn body_bottom(composer: &SlideComposer, record: &QuestionRecord, kind: SlideKind) -> u32 {
        let sections = composer.body_sections(record, kind);
        let gaps: u32 = sections.iter().map(|s| s.gap_before).sum();
        let lines: u32 = sections.iter().map(|s| s.blocks.len() as u32).sum();
        body_top(card_top(kind)) + gaps + lines * composer.metrics.line_height
    }

    #[test]
    fn test_body_and_footer_never_overlap_card_edge() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);

        let mut long = make_record(18);
        long.explanation = "word ".repeat(60);
        long.options[3] = format!("D) {}", "long ".repeat(30));

        for record in [make_record(1), make_record(3), long] {
            for kind in SlideKind::ALL {
                let card_y = card_top(kind);
                let card_height = composer.card_height(&record, kind);
                let card_bottom = card_y + card_height;
                let bottom = body_bottom(&composer, &record, kind);
                assert!(
                    bottom <= card_bottom,
                    "{kind:?}: body ends at {bottom}, card ends at {card_bottom}"
                );
                assert!(
                    footer_top(card_y, card_height) > card_bottom,
                    "{kind:?}: footer must start below the card"
                );
            }
        }
    }

    #[test]
    fn test_compose_produces_full_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);

        let slide = composer.compose(&make_record(3), SequenceId::with_post(1, 1), SlideKind::Question);
        assert_eq!(slide.image.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(slide.body_lines, 7);
    }

    #[test]
    fn test_card_texture_and_rounded_corner() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);
        let slide = composer.compose(&make_record(3), SequenceId::daily(1), SlideKind::Question);

        let card_y = card_top(SlideKind::Question);
        let bottom = card_y + slide.card_height;
        // Inside the card, below the body and away from any text.
        let inside = slide.image.get_pixel(CARD_X + 20, bottom - 80);
        assert_eq!(inside.0, [10, 20, 30]);
        // Just inside the card's bounding box at the top-left corner.
        let corner = slide.image.get_pixel(CARD_X + 3, card_y + 3);
        assert_eq!(corner.0, [255, 255, 255], "corner should be masked off");
    }

    #[test]
    fn test_badge_drawn_for_difficulty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::new(dir.path());
        write_png(&paths.background(), 64, 64, TEXTURE);
        write_png(&paths.badge(Difficulty::Medium), 8, 8, Rgba([250, 200, 0, 255]));
        let assets = SlideAssets::load(&paths).unwrap();
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);

        let slide = composer.compose(&make_record(3), SequenceId::daily(2), SlideKind::Answer);
        let card_y = card_top(SlideKind::Answer);
        let half = BADGE_SIZE / 2;
        let pixel = slide
            .image
            .get_pixel(CARD_X + CARD_PADDING + half, card_y + CARD_PADDING + half);
        assert_eq!(pixel.0, [250, 200, 0]);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);
        let record = make_record(4);
        let seq = SequenceId::with_post(3, 2);

        for kind in SlideKind::ALL {
            let first = composer.compose(&record, seq, kind);
            let second = composer.compose(&record, seq, kind);
            assert!(first.image == second.image, "{kind:?} slide differs between renders");
        }
    }

    #[test]
    fn test_question_and_answer_slides_differ() {
        let dir = tempfile::tempdir().unwrap();
        let assets = make_assets(dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);
        let record = make_record(3);
        let seq = SequenceId::daily(1);

        let q = composer.compose(&record, seq, SlideKind::Question);
        let a = composer.compose(&record, seq, SlideKind::Answer);
        assert!(q.image != a.image);
    }

    #[test]
    fn test_save_under_writes_expected_paths() {
        let assets_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let assets = make_assets(assets_dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);
        let record = make_record(3);
        let seq = SequenceId::with_post(5, 2);

        let q = composer
            .compose(&record, seq, SlideKind::Question)
            .save_under(out_dir.path())
            .unwrap();
        let a = composer
            .compose(&record, seq, SlideKind::Answer)
            .save_under(out_dir.path())
            .unwrap();

        assert_eq!(q, out_dir.path().join("slides/day_5_post_2.png"));
        assert_eq!(a, out_dir.path().join("answers/day_5_post_2_answer.png"));
        let reopened = image::open(&q).unwrap();
        assert_eq!(reopened.width(), CANVAS_WIDTH);
        assert_eq!(reopened.height(), CANVAS_HEIGHT);
    }

    #[test]
    fn test_save_under_unwritable_root_fails() {
        let assets_dir = tempfile::tempdir().unwrap();
        let assets = make_assets(assets_dir.path());
        let fonts = FontSet::approximate();
        let composer = SlideComposer::new(&fonts, &assets);

        // A regular file where the output directory should be.
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let err = composer
            .compose(&make_record(3), SequenceId::daily(1), SlideKind::Question)
            .save_under(blocker.path())
            .unwrap_err();
        assert!(matches!(err, AppError::CreateDir { .. }), "got {err:?}");
    }
}
