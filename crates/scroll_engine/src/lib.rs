//! # Scroll Engine
//!
//! Procedural scene parts for real-time demos: a spinning background of
//! tetrahedral spikes over a geodesic sphere, and text marquees that scroll
//! around a ring or wind around a torus tube.
//!
//! ## Features
//!
//! - **Spiked Background**: one instanced pyramid per icosahedron face
//! - **Circular Marquee**: repeating text on a ring, full coverage every frame
//! - **Toroidal Marquee**: the same text twisted around a tube
//! - **Instance Pools**: fixed-capacity per-glyph buffers with dirty tracking
//! - **Config Files**: TOML and RON scene descriptions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scroll_engine::prelude::*;
//!
//! fn main() -> Result<(), BuildError> {
//!     let mut scene = Scene::build(&SceneConfig::default(), &FontData::block_font())?;
//!     scene.render(16.0);
//!     for batch in scene.collect_uploads() {
//!         println!("{}: {} instances", batch.name, batch.instance_count);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::neg_cmp_op_on_partial_ord
)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod text;

pub use error::{BuildError, BuildResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{
            BackgroundConfig, BevelParams, Config, ConfigError, FontParams, SceneConfig,
            ScrollerConfig, SpinConfig, TorusConfig,
        },
        error::{BuildError, BuildResult},
        foundation::{
            math::{EulerOrder, Mat4, Quat, Transform, Vec3},
            time::{FixedStepClock, FrameClock},
        },
        geometry::{icosahedron, FacetGenerator, FacetMode, Mesh, SpikedBackground},
        render::{collect_uploads, InstanceData, InstancePool, UploadBatch},
        scene::{Animated, Scene, SceneStats},
        text::{CircularTextLayout, FontData, GlyphSource, ToroidalTextLayout},
    };
}
