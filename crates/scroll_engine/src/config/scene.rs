//! Scene, marquee and background configuration
//!
//! Defaults give a marquee of radius 3 with letter spacing 1.1, scrolling
//! one radian every 2000 ms around the ring and every 4000 ms around the tube.

use serde::{Deserialize, Serialize};

use super::Config;
use crate::error::{BuildError, BuildResult};
use crate::geometry::FacetMode;

fn require_positive(name: &str, value: f32) -> BuildResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::InvalidConfig(format!("{name} must be positive, got {value}")))
    }
}

/// Glyph sizing and spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontParams {
    /// Uniform display scale applied to every glyph instance
    pub scale: f32,
    /// Glyph size in model units before `scale`
    pub size: f32,
    /// Extrusion depth of glyph meshes
    pub height: f32,
    /// Multiplier on every glyph's angular width
    pub letter_spacing: f32,
    /// Curve tessellation segments handed to the outline builder
    pub curve_segments: u32,
}

impl Default for FontParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            size: 1.0,
            height: 0.6,
            letter_spacing: 1.1,
            curve_segments: 4,
        }
    }
}

impl FontParams {
    /// Set display scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set letter spacing multiplier
    pub fn with_letter_spacing(mut self, letter_spacing: f32) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Set glyph size and extrusion depth
    pub fn with_size(mut self, size: f32, height: f32) -> Self {
        self.size = size;
        self.height = height;
        self
    }

    /// Validate ranges
    pub fn validate(&self) -> BuildResult<()> {
        require_positive("font scale", self.scale)?;
        require_positive("font size", self.size)?;
        require_positive("letter spacing", self.letter_spacing)?;
        if !(self.height.is_finite() && self.height >= 0.0) {
            return Err(BuildError::InvalidConfig(format!(
                "font height must not be negative, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

/// Glyph bevel; disabled as a whole when any parameter is zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BevelParams {
    /// Outline growth
    pub size: f32,
    /// Depth growth on both faces
    pub thickness: f32,
    /// Bevel segment count
    pub segments: u32,
}

impl Default for BevelParams {
    fn default() -> Self {
        Self {
            size: 0.04,
            thickness: 0.04,
            segments: 1,
        }
    }
}

impl BevelParams {
    /// Flat, unbevelled glyphs
    pub fn disabled() -> Self {
        Self {
            size: 0.0,
            thickness: 0.0,
            segments: 0,
        }
    }

    /// Whether the bevel is applied
    pub fn enabled(&self) -> bool {
        self.size != 0.0 && self.thickness != 0.0 && self.segments != 0
    }
}

/// Circular marquee settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollerConfig {
    /// Text laid out around the ring
    pub text: String,
    /// Placement radius
    pub radius: f32,
    /// Time units per radian of scroll
    pub speed: f32,
    /// Glyph sizing
    pub font: FontParams,
    /// Glyph bevel
    pub bevel: BevelParams,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            text: "SCROLL ENGINE ".to_string(),
            radius: 3.0,
            speed: 2000.0,
            font: FontParams::default(),
            bevel: BevelParams::default(),
        }
    }
}

impl ScrollerConfig {
    /// Create a configuration for `text` with defaults elsewhere
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set placement radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set scroll speed
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Set font parameters
    pub fn with_font(mut self, font: FontParams) -> Self {
        self.font = font;
        self
    }

    /// Set bevel parameters
    pub fn with_bevel(mut self, bevel: BevelParams) -> Self {
        self.bevel = bevel;
        self
    }

    /// Validate ranges
    pub fn validate(&self) -> BuildResult<()> {
        require_positive("radius", self.radius)?;
        require_positive("speed", self.speed)?;
        self.font.validate()
    }
}

/// Toroidal marquee settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusConfig {
    /// Tube radius
    pub radius_torus: f32,
    /// Full loops around the tube per revolution of the ring
    pub twists: f32,
    /// Time units per radian around the tube
    pub speed_torus: f32,
    /// Ring settings shared with the circular marquee
    pub scroller: ScrollerConfig,
}

impl Default for TorusConfig {
    fn default() -> Self {
        Self {
            radius_torus: 0.5,
            twists: 2.0,
            speed_torus: 4000.0,
            scroller: ScrollerConfig::default(),
        }
    }
}

impl TorusConfig {
    /// Create a configuration for `text` with defaults elsewhere
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            scroller: ScrollerConfig::new(text),
            ..Default::default()
        }
    }

    /// Set ring radius, tube radius and twist count
    pub fn with_radius(mut self, radius: f32, radius_torus: f32, twists: f32) -> Self {
        self.scroller.radius = radius;
        self.radius_torus = radius_torus;
        self.twists = twists;
        self
    }

    /// Set ring and tube speeds
    pub fn with_speed(mut self, speed: f32, speed_torus: f32) -> Self {
        self.scroller.speed = speed;
        self.speed_torus = speed_torus;
        self
    }

    /// Validate ranges
    pub fn validate(&self) -> BuildResult<()> {
        self.scroller.validate()?;
        require_positive("torus speed", self.speed_torus)?;
        if !(self.radius_torus.is_finite() && self.radius_torus >= 0.0) {
            return Err(BuildError::InvalidConfig(format!(
                "torus radius must not be negative, got {}",
                self.radius_torus
            )));
        }
        if !(self.twists.is_finite() && self.twists >= 0.0) {
            return Err(BuildError::InvalidConfig(format!(
                "twists must not be negative, got {}",
                self.twists
            )));
        }
        Ok(())
    }
}

/// Per-axis period divisors of the background spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Time units per radian about X
    pub x: f32,
    /// Time units per radian about Y
    pub y: f32,
    /// Time units per radian about Z
    pub z: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            x: 12_000.0,
            y: 9_000.0,
            z: 15_000.0,
        }
    }
}

impl SpinConfig {
    /// Validate ranges
    pub fn validate(&self) -> BuildResult<()> {
        require_positive("spin x", self.x)?;
        require_positive("spin y", self.y)?;
        require_positive("spin z", self.z)
    }
}

/// Spiked background settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Radius of the driving icosahedron
    pub radius: f32,
    /// Icosahedron subdivision level
    pub detail: u32,
    /// Instanced or one mesh per facet
    pub mode: FacetMode,
    /// Spin period divisors
    pub spin: SpinConfig,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            detail: 1,
            mode: FacetMode::Instanced,
            spin: SpinConfig::default(),
        }
    }
}

impl BackgroundConfig {
    /// Validate ranges
    pub fn validate(&self) -> BuildResult<()> {
        require_positive("background radius", self.radius)?;
        self.spin.validate()
    }
}

/// Everything needed to build a [`crate::scene::Scene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Optional spiked background
    pub background: Option<BackgroundConfig>,
    /// Circular marquees
    pub scrollers: Vec<ScrollerConfig>,
    /// Toroidal marquees
    pub tori: Vec<TorusConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Some(BackgroundConfig::default()),
            scrollers: vec![ScrollerConfig::default()],
            tori: vec![TorusConfig::new("TWISTED AROUND THE TUBE ").with_radius(4.5, 0.5, 2.0)],
        }
    }
}

impl SceneConfig {
    /// Validate every part
    pub fn validate(&self) -> BuildResult<()> {
        if let Some(background) = &self.background {
            background.validate()?;
        }
        for scroller in &self.scrollers {
            scroller.validate()?;
        }
        for torus in &self.tori {
            torus.validate()?;
        }
        Ok(())
    }
}

impl Config for SceneConfig {}
