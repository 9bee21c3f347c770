//! Scene assembly
//!
//! Every part is an [`Animated`] posed from elapsed time alone. A [`Scene`]
//! renders them together and hands dirty instance buffers to the renderer.

mod animated;
mod scroller_scene;

pub use animated::Animated;
pub use scroller_scene::{Scene, SceneStats};
