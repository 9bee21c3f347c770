//! Background plus any number of marquees, rendered as one frame

use super::Animated;
use crate::config::SceneConfig;
use crate::error::BuildResult;
use crate::geometry::{Mesh, SpikedBackground};
use crate::render::{collect_uploads, InstancePool, UploadBatch};
use crate::text::{CircularTextLayout, GlyphSource, ToroidalTextLayout};

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Animated parts
    pub parts: usize,
    /// Instance pools across all parts
    pub pools: usize,
    /// Instances drawn by the last render
    pub visible_instances: usize,
}

/// Built scene
#[derive(Debug, Clone)]
pub struct Scene {
    background: Option<SpikedBackground>,
    scrollers: Vec<CircularTextLayout>,
    tori: Vec<ToroidalTextLayout>,
}

impl Scene {
    /// Build every part described by `config`
    ///
    /// Fails on the first part that cannot be built.
    pub fn build(config: &SceneConfig, source: &dyn GlyphSource) -> BuildResult<Self> {
        config.validate()?;
        let background = config.background.as_ref().map(SpikedBackground::new).transpose()?;
        let scrollers = config
            .scrollers
            .iter()
            .map(|scroller| CircularTextLayout::new(scroller, source))
            .collect::<BuildResult<Vec<_>>>()?;
        let tori = config
            .tori
            .iter()
            .map(|torus| ToroidalTextLayout::new(torus, source))
            .collect::<BuildResult<Vec<_>>>()?;
        log::info!(
            "Scene built: background {}, {} circular and {} toroidal marquees",
            if background.is_some() { "on" } else { "off" },
            scrollers.len(),
            tori.len()
        );
        Ok(Self {
            background,
            scrollers,
            tori,
        })
    }

    /// Spiked background, if configured
    pub fn background(&self) -> Option<&SpikedBackground> {
        self.background.as_ref()
    }

    /// Circular marquees
    pub fn scrollers(&self) -> &[CircularTextLayout] {
        &self.scrollers
    }

    /// Toroidal marquees
    pub fn tori(&self) -> &[ToroidalTextLayout] {
        &self.tori
    }

    /// Every part in draw order
    pub fn parts(&self) -> Vec<&dyn Animated> {
        let mut parts: Vec<&dyn Animated> = Vec::new();
        if let Some(background) = &self.background {
            parts.push(background);
        }
        parts.extend(self.scrollers.iter().map(|s| s as &dyn Animated));
        parts.extend(self.tori.iter().map(|t| t as &dyn Animated));
        parts
    }

    fn parts_mut(&mut self) -> Vec<&mut dyn Animated> {
        let mut parts: Vec<&mut dyn Animated> = Vec::new();
        if let Some(background) = &mut self.background {
            parts.push(background);
        }
        parts.extend(self.scrollers.iter_mut().map(|s| s as &mut dyn Animated));
        parts.extend(self.tori.iter_mut().map(|t| t as &mut dyn Animated));
        parts
    }

    /// Pose every part for `time`
    pub fn render(&mut self, time: f64) {
        for part in self.parts_mut() {
            part.render(time);
        }
    }

    /// Dirty pools of every part, flags cleared
    pub fn collect_uploads(&mut self) -> Vec<UploadBatch<'_>> {
        let pools: Vec<&mut InstancePool> = self
            .parts_mut()
            .into_iter()
            .flat_map(|part| part.pools_mut())
            .collect();
        collect_uploads(pools)
    }

    /// Every static mesh in the scene, for a one-time upload
    pub fn meshes(&self) -> Vec<(&str, &Mesh)> {
        self.parts().into_iter().flat_map(|part| part.meshes()).collect()
    }

    /// Counters for the last render
    pub fn stats(&self) -> SceneStats {
        let parts = self.parts();
        SceneStats {
            parts: parts.len(),
            pools: parts.iter().map(|part| part.pools().len()).sum(),
            visible_instances: parts.iter().map(|part| part.visible_count()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackgroundConfig, ScrollerConfig, TorusConfig};
    use crate::geometry::{icosahedron_triangle_count, FacetMode};
    use crate::text::FontData;

    #[test]
    fn test_default_scene_renders() {
        let mut scene =
            Scene::build(&SceneConfig::default(), &FontData::block_font()).expect("scene");
        scene.render(0.0);
        let stats = scene.stats();
        assert_eq!(stats.parts, 3);
        assert!(stats.visible_instances > icosahedron_triangle_count(1));
    }

    #[test]
    fn test_uploads_follow_render() {
        let config = SceneConfig {
            background: Some(BackgroundConfig {
                detail: 0,
                ..Default::default()
            }),
            scrollers: vec![ScrollerConfig::new("HI ")],
            tori: Vec::new(),
        };
        let mut scene = Scene::build(&config, &FontData::block_font()).expect("scene");
        assert!(scene.collect_uploads().is_empty());

        scene.render(500.0);
        let batches = scene.collect_uploads();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches.iter().find(|b| b.name == "facets").map(|b| b.instance_count), Some(20));
        assert!(scene.collect_uploads().is_empty());
    }

    #[test]
    fn test_every_pool_has_a_mesh() {
        let scene = Scene::build(&SceneConfig::default(), &FontData::block_font()).expect("scene");
        let meshes = scene.meshes();
        assert_eq!(meshes.len(), scene.stats().pools);
        for (name, mesh) in meshes {
            assert!(!name.is_empty());
            assert!(mesh.triangle_count() > 0);
            assert_eq!(mesh.vertex_bytes().len(), mesh.vertex_count() * 24);
        }
    }

    #[test]
    fn test_standalone_background_pools() {
        let config = SceneConfig {
            background: Some(BackgroundConfig {
                detail: 0,
                mode: FacetMode::Standalone,
                ..Default::default()
            }),
            scrollers: Vec::new(),
            tori: Vec::new(),
        };
        let mut scene = Scene::build(&config, &FontData::block_font()).expect("scene");
        scene.render(1.0);
        let stats = scene.stats();
        assert_eq!(stats.pools, 20);
        assert_eq!(stats.visible_instances, 20);
    }

    #[test]
    fn test_build_fails_on_bad_part() {
        let config = SceneConfig {
            background: None,
            scrollers: vec![ScrollerConfig::new("OK")],
            tori: vec![TorusConfig::new("   ")],
        };
        assert_eq!(
            Scene::build(&config, &FontData::block_font()).err(),
            Some(crate::error::BuildError::EmptyAngularPeriod)
        );
    }
}
