//! Font seam for the text layouts
//!
//! Font file parsing and outline tessellation live outside this crate. The
//! layouts only need what [`GlyphSource`] supplies: global metrics, the
//! space advance, and a renderable mesh per printable glyph.
//!
//! [`FontData`] is a serde-loadable typeface description (the same shape as a
//! typeface JSON export: resolution, bounding box, underline thickness and
//! per-glyph advance) that satisfies the seam with extruded block glyphs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{BevelParams, Config, FontParams};
use crate::foundation::math::Vec3;
use crate::geometry::Mesh;

/// Global font metrics in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Font units per glyph size unit
    pub resolution: f32,
    /// Bottom of the font bounding box
    pub y_min: f32,
    /// Top of the font bounding box
    pub y_max: f32,
    /// Underline thickness
    pub underline_thickness: f32,
}

impl FontMetrics {
    /// Model units per font unit at glyph `size`
    pub fn glyph_scale(&self, size: f32) -> f32 {
        size / self.resolution
    }

    /// Line height at glyph `size`, bounding box plus underline
    pub fn line_height(&self, size: f32) -> f32 {
        (self.y_max - self.y_min + self.underline_thickness) * self.glyph_scale(size)
    }
}

/// Parameters handed to the glyph outline builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGeometryParams {
    /// Glyph size
    pub size: f32,
    /// Extrusion depth
    pub height: f32,
    /// Curve tessellation segments
    pub curve_segments: u32,
    /// Bevel outline growth
    pub bevel_size: f32,
    /// Bevel depth growth
    pub bevel_thickness: f32,
    /// Bevel segment count
    pub bevel_segments: u32,
    /// Whether the bevel is applied
    pub bevel_enabled: bool,
}

impl TextGeometryParams {
    /// Combine font and bevel settings
    pub fn new(font: &FontParams, bevel: &BevelParams) -> Self {
        let bevel_enabled = bevel.enabled();
        if !bevel_enabled && (bevel.size != 0.0 || bevel.thickness != 0.0 || bevel.segments != 0) {
            log::warn!("Bevel disabled: size, thickness and segments must all be non-zero");
        }
        Self {
            size: font.size,
            height: font.height,
            curve_segments: font.curve_segments,
            bevel_size: bevel.size,
            bevel_thickness: bevel.thickness,
            bevel_segments: bevel.segments,
            bevel_enabled,
        }
    }
}

/// Source of glyph metrics and meshes
pub trait GlyphSource {
    /// Global metrics
    fn metrics(&self) -> FontMetrics;

    /// Horizontal advance of `ch` in font units, `None` if the font lacks it
    fn advance(&self, ch: char) -> Option<f32>;

    /// Renderable mesh of `ch` in model units, `None` if it has no outline
    fn glyph_mesh(&self, ch: char, params: &TextGeometryParams) -> Option<Mesh>;
}

/// Vertical font bounds in font units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontBoundingBox {
    /// Bottom
    pub y_min: f32,
    /// Top
    pub y_max: f32,
}

/// One glyph entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphOutline {
    /// Horizontal advance
    pub ha: f32,
    /// Left edge of the outline
    pub x_min: f32,
    /// Right edge of the outline; equal to `x_min` for blank glyphs
    pub x_max: f32,
}

impl GlyphOutline {
    fn is_blank(&self) -> bool {
        self.x_max <= self.x_min
    }
}

/// Typeface description with block outlines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontData {
    /// Font units per glyph size unit
    pub resolution: f32,
    /// Vertical bounds
    pub bounding_box: FontBoundingBox,
    /// Underline thickness
    pub underline_thickness: f32,
    /// Top of capital letters; block glyphs span from the baseline to here
    pub cap_height: f32,
    /// Glyph entries
    pub glyphs: BTreeMap<char, GlyphOutline>,
}

impl Default for FontData {
    fn default() -> Self {
        Self::block_font()
    }
}

impl Config for FontData {}

impl FontData {
    /// Empty typeface
    pub fn new(
        resolution: f32,
        y_min: f32,
        y_max: f32,
        underline_thickness: f32,
        cap_height: f32,
    ) -> Self {
        Self {
            resolution,
            bounding_box: FontBoundingBox { y_min, y_max },
            underline_thickness,
            cap_height,
            glyphs: BTreeMap::new(),
        }
    }

    /// Add or replace a glyph
    pub fn with_glyph(mut self, ch: char, ha: f32, x_min: f32, x_max: f32) -> Self {
        self.glyphs.insert(ch, GlyphOutline { ha, x_min, x_max });
        self
    }

    /// Built-in proportional face covering printable ASCII
    pub fn block_font() -> Self {
        let mut font = Self::new(1000.0, -300.0, 1050.0, 50.0, 720.0);
        font = font.with_glyph(' ', 280.0, 0.0, 0.0);
        for code in 33u8..=126 {
            let ch = char::from(code);
            let (ha, x_min, x_max) = match ch {
                '!' | '\'' | ',' | '.' | ':' | ';' | '|' | 'i' | 'j' | 'l' | 'I' => {
                    (280.0, 80.0, 200.0)
                }
                'f' | 'r' | 't' | '(' | ')' | '[' | ']' | '{' | '}' | '`' | '"' => {
                    (400.0, 60.0, 340.0)
                }
                'M' | 'W' | 'm' | 'w' | '@' | '%' => (900.0, 60.0, 840.0),
                _ => (650.0, 60.0, 590.0),
            };
            font = font.with_glyph(ch, ha, x_min, x_max);
        }
        font
    }
}

impl GlyphSource for FontData {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            resolution: self.resolution,
            y_min: self.bounding_box.y_min,
            y_max: self.bounding_box.y_max,
            underline_thickness: self.underline_thickness,
        }
    }

    fn advance(&self, ch: char) -> Option<f32> {
        self.glyphs.get(&ch).map(|glyph| glyph.ha)
    }

    fn glyph_mesh(&self, ch: char, params: &TextGeometryParams) -> Option<Mesh> {
        let glyph = self.glyphs.get(&ch).filter(|glyph| !glyph.is_blank())?;
        let scale = params.size / self.resolution;
        let mut min = Vec3::new(glyph.x_min * scale, 0.0, 0.0);
        let mut max = Vec3::new(glyph.x_max * scale, self.cap_height * scale, params.height);
        if params.bevel_enabled {
            let grow = Vec3::new(params.bevel_size, params.bevel_size, params.bevel_thickness);
            min -= grow;
            max += grow;
        }
        Some(Mesh::cuboid(min, max))
    }
}
