// Text layout: wrapping variable-length text into the card's width budget
// and sizing the card from the result.

pub mod card;
pub mod code;
pub mod font_metrics;
pub mod wrap;

pub use card::{CardMetrics, LayoutBlock};
pub use code::prepare_code;
pub use font_metrics::{get_metrics, FontMetricTable, MetricFamily};
pub use wrap::{wrap_lines, wrap_text};
