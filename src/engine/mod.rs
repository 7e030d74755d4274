pub mod camera;
pub mod interaction;
pub mod layout;
pub mod render;
mod surface;

pub use camera::{Camera, Viewport, ZoomLimits};
pub use interaction::{InteractionEvent, InteractionSettings, PointerEvent};
pub use layout::{LayoutKind, PositionedNode};
pub use render::{Canvas, RenderSettings, RenderStats};
pub use surface::{SkillGraphSurface, SurfaceListener};
