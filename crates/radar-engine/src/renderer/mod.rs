pub mod color;
pub mod recording;
pub mod scene;
pub mod surface;
pub mod theme;
#[cfg(feature = "vectors")]
pub mod vector;

// Re-export key types for convenient access
pub use color::Color;
pub use scene::SceneRenderer;
pub use surface::{ColorStop, Glow, RadialGradient, Stroke, Surface, TextStyle};
pub use theme::{RingStyle, Theme};
