//! Circular marquee
//!
//! Glyphs stand upright on a horizontal ring of radius `R`, each turned to
//! face outward, scrolling by one radian every `speed` time units.

use crate::config::ScrollerConfig;
use crate::error::BuildResult;
use crate::foundation::math::{constants::TAU, EulerOrder, Mat4, Transform, Vec3};
use crate::geometry::Mesh;
use crate::render::InstancePool;

use super::angular::{root_transform, AngularText, RingCursor};
use super::font::GlyphSource;
use super::glyph_cache::GlyphMetrics;

/// Text scrolling around a ring
#[derive(Debug, Clone)]
pub struct CircularTextLayout {
    text: AngularText,
    radius: f32,
    speed: f32,
    scale: f32,
}

impl CircularTextLayout {
    /// Composition order of the per-glyph rotation
    pub const ROTATION_ORDER: EulerOrder = EulerOrder::Xyz;

    /// Measure the text and allocate one pool per distinct printable glyph
    pub fn new(config: &ScrollerConfig, source: &dyn GlyphSource) -> BuildResult<Self> {
        let text = AngularText::build(config, source)?;
        Ok(Self {
            text,
            radius: config.radius,
            speed: config.speed,
            scale: config.font.scale,
        })
    }

    /// Pose of a glyph centred at remaining ring angle `angle`
    pub fn glyph_transform(radius: f32, scale: f32, angle: f32) -> Transform {
        let rot = TAU - angle;
        Transform::new(
            Vec3::new(radius * rot.sin(), 0.0, radius * rot.cos()),
            Self::ROTATION_ORDER.quaternion(Vec3::new(0.0, rot, 0.0)),
            Vec3::repeat(scale),
        )
    }

    /// Place every visible glyph for `time`
    pub fn render(&mut self, time: f64) {
        let angle = self.text.fold(time / f64::from(self.speed));
        let (radius, scale) = (self.radius, self.scale);
        self.text.draw(RingCursor::new(angle), |cursor| {
            Self::glyph_transform(radius, scale, cursor.angle())
        });
        log::trace!("Circular marquee '{}' posed at t={time}", self.text.text());
    }

    /// Angular period of the text
    pub fn angle_total(&self) -> f32 {
        self.text.angle_total()
    }

    /// Placement radius
    pub fn radius(&self) -> f32 {
        self.radius
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
    use crate::text::FontData;
    use approx::assert_relative_eq;

    fn font() -> FontData {
        FontData::new(1.0, -0.2, 1.0, 0.05, 0.7)
            .with_glyph(' ', 0.25, 0.0, 0.0)
            .with_glyph('A', 0.5, 0.0, 0.4)
            .with_glyph('B', 0.4, 0.0, 0.3)
    }

    fn layout(text: &str) -> CircularTextLayout {
        let config = ScrollerConfig::new(text)
            .with_radius(3.0)
            .with_speed(2000.0)
            .with_font(FontParams::default().with_letter_spacing(1.0))
            .with_bevel(BevelParams::disabled());
        CircularTextLayout::new(&config, &font()).expect("layout")
    }

    fn translation(matrix: &Mat4) -> Vec3 {
        Vec3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
    }

    #[test]
    fn test_ab_widths() {
        let layout = layout("AB");
        let a = layout.glyph('A').expect("A").angular_width;
        let b = layout.glyph('B').expect("B").angular_width;
        assert_relative_eq!(a, 2.0 * (0.4f32 / 6.0).asin(), epsilon = 1e-6);
        assert_relative_eq!(b, 2.0 * (0.3f32 / 6.0).asin(), epsilon = 1e-6);
        assert_relative_eq!(layout.angle_total(), a + b, epsilon = 1e-6);
    }

    #[test]
    fn test_glyph_transform_faces_outward() {
        let transform = CircularTextLayout::glyph_transform(3.0, 1.0, TAU);
        assert_relative_eq!(transform.position, Vec3::new(0.0, 0.0, 3.0), epsilon = 1e-5);

        let quarter = CircularTextLayout::glyph_transform(3.0, 2.0, TAU - TAU / 4.0);
        assert_relative_eq!(quarter.position, Vec3::new(3.0, 0.0, 0.0), epsilon = 1e-5);
        let forward = quarter.rotation * Vec3::z();
        assert_relative_eq!(forward, Vec3::x(), epsilon = 1e-5);
        assert_eq!(quarter.scale, Vec3::repeat(2.0));
    }

    #[test]
    fn test_first_frame_fills_the_ring() {
        let mut layout = layout("AB");
        layout.render(0.0);
        let a = layout.glyph('A').expect("A").angular_width;
        let b = layout.glyph('B').expect("B").angular_width;
        let step = (a + b) / 2.0;
        let visible = layout.visible_instances().len();
        assert!(visible as f32 + 1.0 >= (TAU / step).floor(), "only {visible} glyphs visible");
    }

    #[test]
    fn test_instances_stay_on_ring() {
        let mut layout = layout("AB A");
        for time in [0.0, 17.0, 999.5, 123_456.0, 5.0e6] {
            layout.render(time);
            for (_, matrix) in layout.visible_instances() {
                assert!(matrix.iter().all(|v| v.is_finite()));
                let position = translation(&matrix);
                assert_relative_eq!(position.y, 0.0);
                assert_relative_eq!(position.norm(), 3.0, epsilon = 1e-4);
            }
            for pool in layout.pools() {
                assert!(pool.active_count() <= pool.capacity());
            }
        }
    }

    #[test]
    fn test_spaces_are_not_drawn() {
        let mut layout = layout("A  ");
        layout.render(250.0);
        assert!(layout.visible_instances().iter().all(|(ch, _)| *ch == 'A'));
        assert!(layout.glyph(' ').is_some_and(|g| !g.is_renderable()));
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut first = layout("AB");
        let mut second = layout("AB");
        first.render(4321.0);
        second.render(1.0);
        second.render(4321.0);
        assert_eq!(first.visible_instances(), second.visible_instances());
    }

    #[test]
    fn test_render_repeats_after_one_text_period() {
        let mut layout = layout("AB");
        let time = 1234.0;
        layout.render(time);
        let before = layout.visible_instances();
        layout.render(time + f64::from(layout.angle_total()) * 2000.0);
        let after = layout.visible_instances();

        assert_eq!(before.len(), after.len());
        for (ch, matrix) in &before {
            let position = translation(matrix);
            assert!(after
                .iter()
                .any(|(other, m)| other == ch && (translation(m) - position).norm() < 1e-2));
        }
    }

    #[test]
    fn test_long_text_repeats_every_period() {
        let config = ScrollerConfig::new("AB".repeat(9))
            .with_radius(1.0)
            .with_speed(2000.0)
            .with_font(FontParams::default().with_letter_spacing(1.0))
            .with_bevel(BevelParams::disabled());
        let mut layout = CircularTextLayout::new(&config, &font()).expect("layout");
        assert!(layout.angle_total() >= TAU);

        // A glyph landing exactly on the seam at angle 0 may or may not be drawn.
        let off_seam = |layout: &CircularTextLayout| -> Vec<(char, Vec3)> {
            layout
                .visible_instances()
                .iter()
                .map(|(ch, m)| (*ch, translation(m)))
                .filter(|(_, p)| !(p.x.abs() < 1e-3 && p.z > 0.0))
                .collect()
        };

        layout.render(0.0);
        let reference = off_seam(&layout);
        assert!(!reference.is_empty());
        for k in 1..4u32 {
            layout.render(f64::from(k) * f64::from(layout.angle_total()) * 2000.0);
            let frame = off_seam(&layout);
            assert_eq!(frame.len(), reference.len(), "k={k}");
            for (ch, position) in &reference {
                assert!(frame.iter().any(|(other, p)| other == ch && (p - position).norm() < 1e-2));
            }
        }
    }

    #[test]
    fn test_late_frames_match_early_frames() {
        let mut layout = layout("AB");
        let cycle = f64::from(layout.text().period()) * 2000.0;
        layout.render(500.0);
        let early = layout.visible_instances();
        layout.render(500.0 + 40_000.0 * cycle);
        let late = layout.visible_instances();

        assert_eq!(early.len(), late.len());
        for ((ch, a), (other, b)) in early.iter().zip(&late) {
            assert_eq!(ch, other);
            assert!((translation(a) - translation(b)).norm() < 1e-3);
        }
    }
}
