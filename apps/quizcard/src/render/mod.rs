// Slide rendering: fonts, assets, compositing primitives and the composer.

pub mod assets;
pub mod canvas;
pub mod composer;
pub mod fonts;

pub use assets::{AssetPaths, SlideAssets};
pub use composer::SlideComposer;
pub use fonts::FontSet;
