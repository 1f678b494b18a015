pub mod api;
pub mod assets;
pub mod core;
pub mod error;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{DecorationConfig, LensConfig, OrbitConfig, RadarConfig, SweepConfig};
pub use api::types::{RevealMode, SizeClass};
pub use assets::catalog::{Catalog, CatalogEntry};
pub use crate::core::geometry::{SceneGeometry, SurfaceSize};
pub use crate::core::orbit::{EntityOrbitModel, OrbitingEntity};
pub use crate::core::rng::Rng;
pub use crate::core::scheduler::{CancelToken, FrameScheduler, DEFAULT_SEED};
pub use crate::core::time::{FixedTimestep, FrameClock};
pub use error::RadarError;
pub use renderer::color::Color;
pub use renderer::recording::{DrawCommand, RecordingSurface};
pub use renderer::scene::SceneRenderer;
pub use renderer::surface::{ColorStop, Glow, RadialGradient, Stroke, Surface, TextStyle};
pub use renderer::theme::Theme;
pub use systems::lens::{LensReveal, LensState};
pub use systems::reveal::{Reveal, RevealEngine};
pub use systems::sweep::SweepReveal;

#[cfg(feature = "vectors")]
pub use renderer::vector::{LabelInstance, TessellatedSurface, VectorVertex};
