//! Per-layout glyph metrics cache
//!
//! Each layout owns one cache. Repeated characters share a single entry, so
//! a glyph's angular width, mesh and instance pool exist exactly once.

use std::collections::HashMap;

use crate::geometry::Mesh;
use crate::render::InstancePool;

/// Shape metrics and instance pool of one distinct character
#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    /// Character
    pub ch: char,
    /// Width in model units (before display scale)
    pub width: f32,
    /// Angle the glyph occupies on the ring, spacing included
    pub angular_width: f32,
    /// Centred mesh; `None` for space
    pub mesh: Option<Mesh>,
    /// Instance slots; `None` for space
    pub pool: Option<InstancePool>,
}

impl GlyphMetrics {
    /// Whether the glyph is drawn
    pub fn is_renderable(&self) -> bool {
        self.pool.is_some()
    }
}

/// Character-keyed store of [`GlyphMetrics`]
#[derive(Debug, Clone, Default)]
pub struct GlyphCache {
    entries: Vec<GlyphMetrics>,
    slots: HashMap<char, usize>,
}

impl GlyphCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of `ch`, if cached
    pub fn slot(&self, ch: char) -> Option<usize> {
        self.slots.get(&ch).copied()
    }

    /// Metrics of `ch`, if cached
    pub fn get(&self, ch: char) -> Option<&GlyphMetrics> {
        self.slot(ch).map(|slot| &self.entries[slot])
    }

    /// Metrics at `slot`
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not returned by this cache.
    pub fn entry(&self, slot: usize) -> &GlyphMetrics {
        &self.entries[slot]
    }

    /// Mutable metrics at `slot`
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not returned by this cache.
    pub fn entry_mut(&mut self, slot: usize) -> &mut GlyphMetrics {
        &mut self.entries[slot]
    }

    /// Insert metrics, returning the new slot
    ///
    /// # Panics
    ///
    /// Panics if the character is already cached.
    pub fn insert(&mut self, metrics: GlyphMetrics) -> usize {
        assert!(!self.slots.contains_key(&metrics.ch), "glyph '{}' cached twice", metrics.ch);
        let slot = self.entries.len();
        self.slots.insert(metrics.ch, slot);
        self.entries.push(metrics);
        slot
    }

    /// Number of distinct characters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached metrics in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GlyphMetrics> {
        self.entries.iter()
    }

    /// Hide every pool and zero its active count
    pub fn reset_pools(&mut self) {
        for pool in self.entries.iter_mut().filter_map(|e| e.pool.as_mut()) {
            pool.reset();
        }
    }

    /// Pools of renderable glyphs
    pub fn pools(&self) -> Vec<&InstancePool> {
        self.entries.iter().filter_map(|e| e.pool.as_ref()).collect()
    }

    /// Pools of renderable glyphs, mutably
    pub fn pools_mut(&mut self) -> Vec<&mut InstancePool> {
        self.entries.iter_mut().filter_map(|e| e.pool.as_mut()).collect()
    }
}
