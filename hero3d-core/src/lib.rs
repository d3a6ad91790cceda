/// hero3d Core Library - Scene, animation and widget logic for the hero page
///
/// This library holds everything that does not touch a browser or a
/// terminal: geometry, scene assembly, pointer mapping, the per-frame
/// animation loop, viewport sync and the page widgets' state machines.

pub mod animation;
pub mod config;
pub mod controls;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod input;
pub mod projection;
pub mod renderer;
pub mod runtime;
pub mod scene;
pub mod shader;
pub mod stars;
pub mod transform;
pub mod viewport;
pub mod widgets;

// Re-export commonly used types
pub use animation::Animator;
pub use config::HeroConfig;
pub use controls::OrbitControls;
pub use error::{HeroError, HeroResult};
pub use frame_loop::{CancelHandle, Clock, FrameLoop, LoopControl, ManualClock};
pub use geometry::{LineSet, Mesh, Triangle, Vertex};
pub use input::{Bounds, InputState};
pub use projection::Camera;
pub use renderer::SceneRenderer;
pub use runtime::HeroRuntime;
pub use scene::{Geometry, HeroScene, Material, NodeId, SceneNode, Shading};
pub use stars::StarField;
pub use transform::{NodeTransform, RotationState, Transform};
