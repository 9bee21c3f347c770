//! Angular text core shared by the circular and toroidal layouts
//!
//! Glyphs are centred on their slot: stepping from one glyph to the next
//! moves by half the current glyph's angular width plus half the next one's,
//! so spacing lives between adjacent half-widths. The text repeats with
//! period `angle_total` around the ring.

use crate::config::ScrollerConfig;
use crate::error::{BuildError, BuildResult};
use crate::foundation::math::{
    constants::{PI, TAU},
    Mat4, Quat, Transform, Vec3,
};
use crate::geometry::Mesh;
use crate::render::capacity_for_angle;
use crate::render::InstancePool;

use super::font::{GlyphSource, TextGeometryParams};
use super::glyph_cache::{GlyphCache, GlyphMetrics};

/// Parent transform of a text ring: half a turn about Y, so the first glyph
/// faces the viewer
pub fn root_transform() -> Transform {
    Transform::from_position_rotation(Vec3::zeros(), Quat::from_axis_angle(&Vec3::y_axis(), PI))
}

/// Converts linear glyph widths into ring angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordAngle {
    /// Placement radius
    pub radius: f32,
    /// Display scale
    pub scale: f32,
    /// Letter spacing multiplier
    pub letter_spacing: f32,
}

impl ChordAngle {
    /// `2 * asin(width * scale / (2 * radius)) * letter_spacing`
    ///
    /// Fails with [`BuildError::GlyphTooWide`] when the chord argument
    /// leaves `[-1, 1]`.
    pub fn angle(&self, ch: char, width: f32) -> BuildResult<f32> {
        let chord = width * self.scale / (2.0 * self.radius);
        if !(-1.0..=1.0).contains(&chord) {
            return Err(BuildError::GlyphTooWide {
                ch,
                radius: self.radius,
                chord,
            });
        }
        Ok(2.0 * chord.asin() * self.letter_spacing)
    }
}

/// Glyph sequence with cached metrics and its angular period
#[derive(Debug, Clone)]
pub struct AngularText {
    text: String,
    cache: GlyphCache,
    sequence: Vec<usize>,
    angle_total: f32,
    line_height: f32,
}

impl AngularText {
    /// Measure every distinct character of `config.text` and sum the period
    pub fn build(config: &ScrollerConfig, source: &dyn GlyphSource) -> BuildResult<Self> {
        config.validate()?;
        if config.text.chars().all(|ch| ch == ' ') {
            return Err(BuildError::EmptyAngularPeriod);
        }

        let metrics = source.metrics();
        let params = TextGeometryParams::new(&config.font, &config.bevel);
        let glyph_scale = metrics.glyph_scale(config.font.size);
        let line_height = metrics.line_height(config.font.size);
        let converter = ChordAngle {
            radius: config.radius,
            scale: config.font.scale,
            letter_spacing: config.font.letter_spacing,
        };

        let mut cache = GlyphCache::new();
        let space_advance = source.advance(' ').ok_or(BuildError::MissingGlyphMetric(' '))?;
        let space_width = space_advance * glyph_scale;
        let space_angle = converter.angle(' ', space_width)?;
        // Every step of the ring walk must make progress.
        if !(space_angle > 0.0) {
            return Err(BuildError::DegenerateGlyph { ch: ' ' });
        }
        cache.insert(GlyphMetrics {
            ch: ' ',
            width: space_width,
            angular_width: space_angle,
            mesh: None,
            pool: None,
        });

        let mut sequence = Vec::with_capacity(config.text.len());
        let mut angle_total = 0.0;
        for ch in config.text.chars() {
            let slot = match cache.slot(ch) {
                Some(slot) => slot,
                None => {
                    let metrics = Self::measure(ch, source, &params, line_height, &converter)?;
                    cache.insert(metrics)
                }
            };
            angle_total += cache.entry(slot).angular_width;
            sequence.push(slot);
        }

        if !(angle_total > 0.0) {
            return Err(BuildError::EmptyAngularPeriod);
        }

        log::info!(
            "Laid out {} glyphs ({} distinct), angular period {:.4} rad",
            sequence.len(),
            cache.len(),
            angle_total
        );

        Ok(Self {
            text: config.text.clone(),
            cache,
            sequence,
            angle_total,
            line_height,
        })
    }

    fn measure(
        ch: char,
        source: &dyn GlyphSource,
        params: &TextGeometryParams,
        line_height: f32,
        converter: &ChordAngle,
    ) -> BuildResult<GlyphMetrics> {
        let mut mesh = source
            .glyph_mesh(ch, params)
            .ok_or(BuildError::MissingGlyphMetric(ch))?;
        let width = mesh.bounding_box().map_or(0.0, |bounds| bounds.width());
        if !(width > 0.0) {
            return Err(BuildError::DegenerateGlyph { ch });
        }
        let angular_width = converter.angle(ch, width)?;
        mesh.translate(Vec3::new(-0.5 * width, -0.25 * line_height, 0.0));
        let capacity = capacity_for_angle(angular_width);
        log::debug!(
            "Glyph '{ch}': width {width:.4}, angle {angular_width:.4} rad, {capacity} slots"
        );
        Ok(GlyphMetrics {
            ch,
            width,
            angular_width,
            mesh: Some(mesh),
            pool: Some(InstancePool::new(ch.to_string(), capacity)),
        })
    }

    /// Source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Always false; empty text fails to build
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Sum of angular widths over the sequence
    pub fn angle_total(&self) -> f32 {
        self.angle_total
    }

    /// Line height used to centre glyph meshes
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Glyph cache
    pub fn glyphs(&self) -> &GlyphCache {
        &self.cache
    }

    /// Angular width of the character at sequence position `index`
    pub fn angular_width_at(&self, index: usize) -> f32 {
        self.cache.entry(self.sequence[index]).angular_width
    }

    /// Character at sequence position `index`
    pub fn char_at(&self, index: usize) -> char {
        self.cache.entry(self.sequence[index]).ch
    }

    /// Smallest multiple of `angle_total` exceeding `2π`
    pub fn period(&self) -> f32 {
        (TAU / self.angle_total).floor() * self.angle_total + self.angle_total
    }

    /// Fold a scroll angle into `[period, 2 * period)`
    ///
    /// The seek phase then always starts above `2π`, so every frame shows a
    /// full ring, including the very first one. The reduction runs in `f64`
    /// so large elapsed times keep sub-frame resolution.
    pub fn fold(&self, angle: f64) -> f32 {
        let period = f64::from(self.period());
        (angle.rem_euclid(period) + period) as f32
    }

    /// Seek, reset every pool, then place glyphs until the ring is full
    ///
    /// `pose` maps the cursor of each renderable glyph to its transform.
    pub(crate) fn draw(
        &mut self,
        mut cursor: RingCursor,
        mut pose: impl FnMut(&RingCursor) -> Transform,
    ) {
        cursor.seek(self);
        self.cache.reset_pools();
        while cursor.angle() > 0.0 {
            let slot = self.sequence[cursor.index()];
            if let Some(pool) = self.cache.entry_mut(slot).pool.as_mut() {
                pool.push(&pose(&cursor).to_matrix());
            }
            cursor.advance(self);
        }
    }

    /// Visible `(character, model matrix)` pairs of the last frame
    pub fn visible_instances(&self) -> Vec<(char, Mat4)> {
        self.cache
            .iter()
            .filter_map(|glyph| glyph.pool.as_ref().map(|pool| (glyph.ch, pool)))
            .flat_map(|(ch, pool)| {
                pool.active_instances()
                    .iter()
                    .map(move |data| (ch, data.matrix()))
            })
            .collect()
    }

    /// Centred mesh of every renderable glyph, named like its pool
    pub fn meshes(&self) -> Vec<(&str, &Mesh)> {
        self.cache
            .iter()
            .filter_map(|glyph| glyph.pool.as_ref().zip(glyph.mesh.as_ref()))
            .map(|(pool, mesh)| (pool.name(), mesh))
            .collect()
    }

    /// Glyph pools
    pub fn pools(&self) -> Vec<&InstancePool> {
        self.cache.pools()
    }

    /// Glyph pools, mutably
    pub fn pools_mut(&mut self) -> Vec<&mut InstancePool> {
        self.cache.pools_mut()
    }
}

/// Position of the angular walk over the cyclic glyph sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingCursor {
    index: usize,
    angle: f32,
    torus_angle: f32,
    torus_step: f32,
}

impl RingCursor {
    /// Start at the first glyph with `angle` still to walk
    pub fn new(angle: f32) -> Self {
        Self {
            index: 0,
            angle,
            torus_angle: 0.0,
            torus_step: 0.0,
        }
    }

    /// Also track a tube angle that drops by `step` per glyph
    pub fn with_torus(mut self, torus_angle: f32, step: f32) -> Self {
        self.torus_angle = torus_angle;
        self.torus_step = step;
        self
    }

    /// Sequence position of the current glyph
    pub fn index(&self) -> usize {
        self.index
    }

    /// Remaining ring angle
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Current tube angle
    pub fn torus_angle(&self) -> f32 {
        self.torus_angle
    }

    /// Step to the next glyph
    pub fn advance(&mut self, text: &AngularText) {
        self.angle -= text.angular_width_at(self.index) / 2.0;
        self.index = (self.index + 1) % text.len();
        self.angle -= text.angular_width_at(self.index) / 2.0;
        self.torus_angle -= self.torus_step;
    }

    /// Walk forward until the remaining angle fits in one revolution
    pub fn seek(&mut self, text: &AngularText) {
        while self.angle > TAU {
            self.advance(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BevelParams, FontParams};
    use crate::foundation::math::Point3;
    use crate::text::FontData;
    use approx::assert_relative_eq;

    fn font() -> FontData {
        FontData::new(1.0, -0.2, 1.0, 0.05, 0.7)
            .with_glyph(' ', 0.25, 0.0, 0.0)
            .with_glyph('A', 0.5, 0.0, 0.4)
            .with_glyph('B', 0.4, 0.0, 0.3)
    }

    fn config(text: &str) -> ScrollerConfig {
        ScrollerConfig::new(text)
            .with_radius(3.0)
            .with_font(FontParams::default().with_letter_spacing(1.0))
            .with_bevel(BevelParams::disabled())
    }

    #[test]
    fn test_root_transform_turns_half_way() {
        let point = root_transform().transform_point(Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(point.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(point.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_chord_angle() {
        let converter = ChordAngle { radius: 3.0, scale: 1.0, letter_spacing: 1.0 };
        assert_relative_eq!(converter.angle('A', 0.4).expect("angle"), 2.0 * (0.4f32 / 6.0).asin());
        let spaced = ChordAngle { letter_spacing: 1.1, ..converter };
        assert_relative_eq!(spaced.angle('A', 0.4).expect("angle"), 2.2 * (0.4f32 / 6.0).asin());
        assert!(matches!(converter.angle('W', 6.5), Err(BuildError::GlyphTooWide { ch: 'W', .. })));
    }

    #[test]
    fn test_angle_total_sums_repeats_in_order() {
        let text = AngularText::build(&config("ABA B"), &font()).expect("text");
        let a = 2.0 * (0.4f32 / 6.0).asin();
        let b = 2.0 * (0.3f32 / 6.0).asin();
        let space = 2.0 * (0.25f32 / 6.0).asin();
        assert_relative_eq!(text.angle_total(), a + b + a + space + b, epsilon = 1e-6);
        assert_eq!(text.glyphs().len(), 3);
        assert_eq!(text.pools().len(), 2);
        assert_eq!(text.len(), 5);
        assert_eq!(text.char_at(3), ' ');
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let first = AngularText::build(&config("ABBA"), &font()).expect("text");
        let second = AngularText::build(&config("ABBA"), &font()).expect("text");
        assert_eq!(first.angle_total(), second.angle_total());
    }

    #[test]
    fn test_glyph_mesh_is_centred() {
        let text = AngularText::build(&config("A"), &font()).expect("text");
        let glyph = text.glyphs().get('A').expect("glyph");
        let bounds = glyph.mesh.as_ref().and_then(|m| m.bounding_box()).expect("bounds");
        assert_relative_eq!(bounds.min.x, -0.2, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.x, 0.2, epsilon = 1e-6);
        assert_relative_eq!(bounds.min.y, -0.25 * text.line_height(), epsilon = 1e-6);
    }

    #[test]
    fn test_pool_capacity_from_angular_width() {
        let text = AngularText::build(&config("AB"), &font()).expect("text");
        for glyph in text.glyphs().iter().filter(|g| g.is_renderable()) {
            let pool = glyph.pool.as_ref().expect("pool");
            assert_eq!(pool.capacity(), (TAU / glyph.angular_width).ceil() as usize);
        }
    }

    #[test]
    fn test_build_errors() {
        for text in ["   ", ""] {
            assert_eq!(
                AngularText::build(&config(text), &font()).err(),
                Some(BuildError::EmptyAngularPeriod)
            );
        }
        assert_eq!(
            AngularText::build(&config("AC"), &font()).err(),
            Some(BuildError::MissingGlyphMetric('C'))
        );

        let no_space = FontData::new(1.0, -0.2, 1.0, 0.05, 0.7).with_glyph('A', 0.5, 0.0, 0.4);
        assert_eq!(
            AngularText::build(&config("A"), &no_space).err(),
            Some(BuildError::MissingGlyphMetric(' '))
        );

        let negative_space = FontData::new(1.0, -0.2, 1.0, 0.05, 0.7)
            .with_glyph(' ', -0.2, 0.0, 0.0)
            .with_glyph('A', 0.5, 0.0, 0.4);
        assert_eq!(
            AngularText::build(&config("A "), &negative_space).err(),
            Some(BuildError::DegenerateGlyph { ch: ' ' })
        );

        let zero_space = FontData::new(1.0, -0.2, 1.0, 0.05, 0.7)
            .with_glyph(' ', 0.0, 0.0, 0.0)
            .with_glyph('A', 0.5, 0.0, 0.4);
        assert_eq!(
            AngularText::build(&config("A"), &zero_space).err(),
            Some(BuildError::DegenerateGlyph { ch: ' ' })
        );

        let too_wide = config("A").with_radius(0.1);
        assert!(matches!(
            AngularText::build(&too_wide, &font()),
            Err(BuildError::GlyphTooWide { ch: ' ', .. })
        ));
    }

    #[test]
    fn test_period_is_smallest_multiple_above_tau() {
        let text = AngularText::build(&config("AB"), &font()).expect("text");
        let period = text.period();
        let multiple = period / text.angle_total();
        assert_relative_eq!(multiple, multiple.round(), epsilon = 1e-3);
        assert!(period > TAU);
        assert!(period - text.angle_total() <= TAU);
    }

    #[test]
    fn test_fold_lands_in_second_period() {
        let text = AngularText::build(&config("AB"), &font()).expect("text");
        let period = text.period();
        let wide = f64::from(period);
        for angle in [0.0, 1.0, wide, 5.0 * wide + 0.3, 1234.5, 3.0e9] {
            let folded = text.fold(angle);
            assert!(folded >= period && folded <= 2.0 * period, "{angle} -> {folded}");
        }
    }

    #[test]
    fn test_cursor_walk_wraps_and_tracks_torus_angle() {
        let text = AngularText::build(&config("AB"), &font()).expect("text");
        let mut cursor = RingCursor::new(10.0).with_torus(1.0, 0.25);
        cursor.advance(&text);
        assert_eq!(cursor.index(), 1);
        cursor.advance(&text);
        assert_eq!(cursor.index(), 0);
        assert_relative_eq!(cursor.angle(), 10.0 - text.angle_total(), epsilon = 1e-5);
        assert_relative_eq!(cursor.torus_angle(), 0.5, epsilon = 1e-6);

        cursor.seek(&text);
        assert!(cursor.angle() <= TAU);
        assert!(cursor.angle() > TAU - text.angle_total());
    }
}
