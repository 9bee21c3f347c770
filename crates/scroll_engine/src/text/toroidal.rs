//! Toroidal marquee
//!
//! The circular marquee wrapped around a torus tube. A second angle sweeps
//! each glyph around the tube cross-section, paced by its own speed and
//! stepped by a fixed amount per character, so the text winds `twists` times
//! around the tube per revolution of the ring.

use crate::config::TorusConfig;
use crate::error::BuildResult;
use crate::foundation::math::{constants::TAU, EulerOrder, Mat4, Transform, Vec3};
use crate::geometry::Mesh;
use crate::render::InstancePool;

use super::angular::{root_transform, AngularText, RingCursor};
use super::font::GlyphSource;
use super::glyph_cache::GlyphMetrics;

/// Ring and tube dimensions needed to pose one glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusShape {
    /// Ring radius
    pub radius: f32,
    /// Tube radius
    pub radius_torus: f32,
    /// Largest letter slant
    pub letter_slant_max: f32,
    /// Display scale
    pub scale: f32,
}

impl TorusShape {
    /// Slant at tube angle `torus_angle`, within `[-2 * max, 0]`
    pub fn slant(&self, torus_angle: f32) -> f32 {
        torus_angle.sin() * self.letter_slant_max - self.letter_slant_max
    }

    /// Pose of a glyph at remaining ring angle `angle` and tube angle `torus_angle`
    pub fn glyph_transform(&self, angle: f32, torus_angle: f32) -> Transform {
        let rot = TAU - angle;
        let torus_x = self.radius_torus * torus_angle.cos();
        let torus_y = self.radius_torus * torus_angle.sin();
        let tilt = -torus_angle;
        Transform::new(
            Vec3::new(
                (self.radius + torus_x) * rot.sin(),
                torus_y,
                (self.radius + torus_x) * rot.cos(),
            ),
            ToroidalTextLayout::ROTATION_ORDER
                .quaternion(Vec3::new(tilt, rot, self.slant(torus_angle))),
            Vec3::repeat(self.scale),
        )
    }
}

/// Text scrolling around a ring and winding around a tube
#[derive(Debug, Clone)]
pub struct ToroidalTextLayout {
    text: AngularText,
    shape: TorusShape,
    speed: f32,
    speed_torus: f32,
    angle_step_torus: f32,
}

impl ToroidalTextLayout {
    /// Composition order of the per-glyph rotation: yaw, then tilt, then slant
    pub const ROTATION_ORDER: EulerOrder = EulerOrder::Yxz;

    /// Measure the text and derive the tube constants
    pub fn new(config: &TorusConfig, source: &dyn GlyphSource) -> BuildResult<Self> {
        config.validate()?;
        let text = AngularText::build(&config.scroller, source)?;
        let radius = config.scroller.radius;
        let angle_step_torus = config.twists * TAU / 360.0;
        // 2 * atan(2 * rT / (2πR / twists)), rearranged to allow zero twists
        let letter_slant_max =
            2.0 * (2.0 * config.radius_torus * config.twists / (TAU * radius)).atan();
        log::debug!("Torus step {angle_step_torus:.5} rad, slant max {letter_slant_max:.5} rad");
        Ok(Self {
            text,
            shape: TorusShape {
                radius,
                radius_torus: config.radius_torus,
                letter_slant_max,
                scale: config.scroller.font.scale,
            },
            speed: config.scroller.speed,
            speed_torus: config.speed_torus,
            angle_step_torus,
        })
    }

    /// Tube angle advanced per character
    pub fn angle_step_torus(&self) -> f32 {
        self.angle_step_torus
    }

    /// Largest letter slant
    pub fn letter_slant_max(&self) -> f32 {
        self.shape.letter_slant_max
    }

    /// Ring and tube dimensions
    pub fn shape(&self) -> TorusShape {
        self.shape
    }

    /// Place every visible glyph for `time`
    pub fn render(&mut self, time: f64) {
        let angle = self.text.fold(time / f64::from(self.speed));
        let torus_angle = (angle * self.speed / self.speed_torus) % TAU;
        let shape = self.shape;
        let cursor = RingCursor::new(angle).with_torus(torus_angle, self.angle_step_torus);
        self.text.draw(cursor, |cursor| {
            shape.glyph_transform(cursor.angle(), cursor.torus_angle())
        });
        log::trace!("Toroidal marquee '{}' posed at t={time}", self.text.text());
    }

    /// Angular period of the text
    pub fn angle_total(&self) -> f32 {
        self.text.angle_total()
    }

    /// Cached metrics of `ch`
    pub fn glyph(&self, ch: char) -> Option<&GlyphMetrics> {
        self.text.glyphs().get(ch)
    }

    /// Shared text core
    pub fn text(&self) -> &AngularText {
        &self.text
    }

    /// Parent transform of the ring
    pub fn root_transform(&self) -> Transform {
        root_transform()
    }

    /// Visible `(character, model matrix)` pairs of the last frame
    pub fn visible_instances(&self) -> Vec<(char, Mat4)> {
        self.text.visible_instances()
    }

    /// Glyph meshes, named like their pools
    pub fn meshes(&self) -> Vec<(&str, &Mesh)> {
        self.text.meshes()
    }

    /// Glyph pools
    pub fn pools(&self) -> Vec<&InstancePool> {
        self.text.pools()
    }

    /// Glyph pools, mutably
    pub fn pools_mut(&mut self) -> Vec<&mut InstancePool> {
        self.text.pools_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BevelParams, FontParams};
    use crate::foundation::math::constants::PI;
    use crate::text::FontData;
    use approx::assert_relative_eq;

    fn config(text: &str) -> TorusConfig {
        let mut config = TorusConfig::new(text)
            .with_radius(3.0, 0.5, 2.0)
            .with_speed(2000.0, 4000.0);
        config.scroller.font = FontParams::default().with_letter_spacing(1.0);
        config.scroller.bevel = BevelParams::disabled();
        config
    }

    fn layout(text: &str) -> ToroidalTextLayout {
        ToroidalTextLayout::new(&config(text), &FontData::block_font()).expect("layout")
    }

    #[test]
    fn test_derived_constants() {
        let layout = layout("TORUS ");
        assert_relative_eq!(layout.angle_step_torus(), 2.0 * PI / 180.0, epsilon = 1e-7);
        let expected = 2.0 * (2.0 * 0.5 / (TAU * 3.0 / 2.0)).atan();
        assert_relative_eq!(layout.letter_slant_max(), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_twists_is_flat() {
        let config = config("FLAT").with_radius(3.0, 0.5, 0.0);
        let layout = ToroidalTextLayout::new(&config, &FontData::block_font()).expect("layout");
        assert_eq!(layout.angle_step_torus(), 0.0);
        assert_eq!(layout.letter_slant_max(), 0.0);
    }

    #[test]
    fn test_slant_range() {
        let shape = layout("X").shape();
        let max = shape.letter_slant_max;
        for step in 0..=64 {
            let slant = shape.slant(-TAU + step as f32 * TAU / 32.0);
            assert!(slant <= 1e-6 && slant >= -2.0 * max - 1e-6, "slant {slant}");
        }
        assert_relative_eq!(shape.slant(PI / 2.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(shape.slant(-PI / 2.0), -2.0 * max, epsilon = 1e-6);
    }

    #[test]
    fn test_glyph_transform_on_tube_surface() {
        let shape = layout("X").shape();
        for torus_angle in [0.0, 0.7, -2.1, 3.0] {
            let transform = shape.glyph_transform(1.3, torus_angle);
            let position = transform.position;
            let ring_offset = Vec3::new(position.x, 0.0, position.z).norm() - shape.radius;
            let tube_offset = ring_offset.hypot(position.y);
            assert_relative_eq!(tube_offset, shape.radius_torus, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_rotation_yaws_before_tilting() {
        let shape = layout("X").shape();
        let transform = shape.glyph_transform(TAU - PI / 2.0, 0.0);
        let expected = EulerOrder::Yxz.quaternion(Vec3::new(0.0, PI / 2.0, shape.slant(0.0)));
        assert_relative_eq!(transform.rotation, expected, epsilon = 1e-6);
        let swapped = EulerOrder::Xyz.quaternion(Vec3::new(-0.5, PI / 2.0, shape.slant(0.5)));
        let tilted = shape.glyph_transform(TAU - PI / 2.0, 0.5);
        assert!(tilted.rotation.angle_to(&swapped) > 1e-3);
    }

    #[test]
    fn test_render_output_is_finite_and_bounded() {
        let mut layout = layout("TWISTED AROUND ");
        for time in [0.0, 1.0, 2500.0, 77_777.0, 3.0e6] {
            layout.render(time);
            let visible = layout.visible_instances();
            assert!(!visible.is_empty());
            for (_, matrix) in visible {
                assert!(matrix.iter().all(|v| v.is_finite()));
            }
            for pool in layout.pools() {
                assert!(pool.active_count() <= pool.capacity());
            }
        }
    }

    #[test]
    fn test_consecutive_glyphs_step_around_tube() {
        let mut layout = layout("II");
        layout.render(0.0);
        let mut heights: Vec<f32> = layout
            .visible_instances()
            .iter()
            .map(|(_, m)| m[(1, 3)])
            .collect();
        heights.sort_by(f32::total_cmp);
        heights.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
        assert!(heights.len() > 1);
        assert!(heights.iter().all(|y| y.abs() <= 0.5 + 1e-5));
    }
}
