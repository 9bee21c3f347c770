//! Scrolling text layouts
//!
//! Font seam, per-layout glyph cache and the circular and toroidal marquees
//! built on a shared angular walk.

pub mod angular;
pub mod circular;
pub mod font;
pub mod glyph_cache;
pub mod toroidal;

pub use angular::{root_transform, AngularText, ChordAngle, RingCursor};
pub use circular::CircularTextLayout;
pub use font::{
    FontBoundingBox, FontData, FontMetrics, GlyphOutline, GlyphSource, TextGeometryParams,
};
pub use glyph_cache::{GlyphCache, GlyphMetrics};
pub use toroidal::{TorusShape, ToroidalTextLayout};
