//! Card sizing from wrapped line counts.

use image::Rgba;

use crate::render::fonts::FontRole;

/// One wrapped line bound to the face and colour it is drawn with.
/// Rebuilt for every render; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBlock {
    pub text: String,
    pub role: FontRole,
    pub color: Rgba<u8>,
}

impl LayoutBlock {
    pub fn from_lines(lines: Vec<String>, role: FontRole, color: Rgba<u8>) -> Vec<LayoutBlock> {
        lines
            .into_iter()
            .map(|text| LayoutBlock { text, role, color })
            .collect()
    }
}

/// Height model for the rounded card.
///
/// `height = max(minimum_height, base_offset + lines * line_height + trailing_padding)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMetrics {
    pub minimum_height: u32,
    /// Room for the badge row, day label and divider above the body.
    pub base_offset: u32,
    pub line_height: u32,
    pub trailing_padding: u32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            minimum_height: 950,
            base_offset: 200,
            line_height: 60,
            trailing_padding: 150,
        }
    }
}

impl CardMetrics {
    pub fn height_for_lines(&self, total_lines: usize) -> u32 {
        let lines = u32::try_from(total_lines).unwrap_or(u32::MAX);
        let content = self
            .base_offset
            .saturating_add(lines.saturating_mul(self.line_height))
            .saturating_add(self.trailing_padding);
        content.max(self.minimum_height)
    }

    /// Card height for every block group the card body will draw.
    pub fn estimate_height(&self, groups: &[&[LayoutBlock]]) -> u32 {
        let total: usize = groups.iter().map(|g| g.len()).sum();
        self.height_for_lines(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(n: usize) -> Vec<LayoutBlock> {
        LayoutBlock::from_lines(
            vec!["x".to_string(); n],
            FontRole::Code,
            Rgba([255, 255, 255, 255]),
        )
    }

    #[test]
    fn test_small_content_uses_minimum() {
        let metrics = CardMetrics::default();
        assert_eq!(metrics.height_for_lines(0), 950);
        assert_eq!(metrics.height_for_lines(10), 950);
    }

    #[test]
    fn test_large_content_grows_by_line_height() {
        let metrics = CardMetrics::default();
        // 200 + 12 * 60 + 150 = 1070
        assert_eq!(metrics.height_for_lines(12), 1070);
        assert_eq!(metrics.height_for_lines(13), 1130);
    }

    #[test]
    fn test_height_is_monotonic_and_bounded_below() {
        let metrics = CardMetrics::default();
        let mut previous = 0;
        for lines in 0..60 {
            let h = metrics.height_for_lines(lines);
            assert!(h >= metrics.minimum_height, "{lines} lines -> {h}");
            assert!(h >= previous, "height shrank at {lines} lines");
            previous = h;
        }
    }

    #[test]
    fn test_estimate_height_sums_groups() {
        let metrics = CardMetrics::default();
        let question = blocks(7);
        let options = blocks(6);
        assert_eq!(
            metrics.estimate_height(&[&question, &options]),
            metrics.height_for_lines(13)
        );
    }

    #[test]
    fn test_huge_line_count_saturates() {
        let metrics = CardMetrics::default();
        assert_eq!(metrics.height_for_lines(usize::MAX), u32::MAX);
    }
}
