//! Frame scheduler: owns the clock, the surface and the per-frame pipeline
//! (orbit advance, reveal step, draw). Hosts feed it frame timestamps and
//! resize notifications; it never schedules anything itself.

use std::cell::Cell;
use std::rc::Rc;

use crate::api::config::RadarConfig;
use crate::assets::catalog::Catalog;
use crate::core::geometry::{SceneGeometry, SurfaceSize};
use crate::core::orbit::EntityOrbitModel;
use crate::core::rng::Rng;
use crate::core::time::{FixedTimestep, FrameClock};
use crate::renderer::scene::SceneRenderer;
use crate::renderer::surface::Surface;
use crate::systems::reveal::RevealEngine;

/// Seed used when the config does not pin one and the host supplies none.
pub const DEFAULT_SEED: u64 = 42;

/// Shared stop flag. Cloned into host callbacks so a frame already in flight
/// can observe a `stop()` that happened after it was requested.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct FrameScheduler<S: Surface> {
    surface: Option<S>,
    model: EntityOrbitModel,
    reveal: RevealEngine,
    renderer: SceneRenderer,
    clock: FrameClock,
    /// `None` runs exactly one tick per frame.
    timestep: Option<FixedTimestep>,
    geometry: SceneGeometry,
    size: SurfaceSize,
    /// Latest resize notification, applied at the start of the next tick.
    pending_size: Option<SurfaceSize>,
    inset: f32,
    token: CancelToken,
    running: bool,
}

impl<S: Surface> FrameScheduler<S> {
    /// Build the scene for `catalog`. The scheduler stays idle until a surface
    /// is attached and `start` is called.
    pub fn new(catalog: &Catalog, config: &RadarConfig) -> Self {
        let mut rng = Rng::new(config.seed.unwrap_or(DEFAULT_SEED));
        let model = EntityOrbitModel::new(catalog, &config.orbit, &mut rng);
        let reveal = RevealEngine::new(config, rng.fork());
        let inset = config.decoration.inset;
        let size = SurfaceSize::default();

        Self {
            surface: None,
            model,
            reveal,
            renderer: SceneRenderer::new(config),
            clock: FrameClock::new(),
            timestep: config.ticks_per_second.map(FixedTimestep::from_rate),
            geometry: SceneGeometry::from_size(size, inset),
            size,
            pending_size: None,
            inset,
            token: CancelToken::new(),
            running: false,
        }
    }

    pub fn with_surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Attach (or replace) the drawing surface. Takes effect on the next `start`.
    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    /// Measure and configure the surface, then begin accepting ticks.
    ///
    /// Returns `false` without side effects when no surface is attached.
    /// Calling it while already running is a no-op.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return true;
        }
        let Some(surface) = self.surface.as_mut() else {
            log::debug!("radar: no surface attached, not starting");
            return false;
        };

        let size = surface.measure();
        surface.configure(size);
        self.pending_size = None;
        self.apply_size(size);
        self.reveal.on_activate(&self.geometry);

        self.token = CancelToken::new();
        self.running = true;
        log::info!(
            "radar: started ({:?}, {} entities, {}x{} @{}x)",
            self.reveal.mode(),
            self.model.len(),
            size.width,
            size.height,
            size.pixel_ratio
        );
        true
    }

    /// Stop accepting ticks. Safe to call any number of times, before or
    /// after `start`.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::info!("radar: stopped after {} ticks", self.clock.ticks());
        }
        self.token.cancel();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running && !self.token.is_cancelled()
    }

    /// Token for the current run. Cancelling it is equivalent to `stop`.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Record a new surface size. Nothing changes until the next tick.
    pub fn notify_resize(&mut self, size: SurfaceSize) {
        log::debug!("radar: resize to {}x{} @{}x", size.width, size.height, size.pixel_ratio);
        self.pending_size = Some(size);
    }

    /// Run one frame at host timestamp `now_ms`. Returns `false` once the
    /// scheduler is stopped, telling the host not to request another frame.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.running {
            return false;
        }
        if self.token.is_cancelled() {
            self.running = false;
            return false;
        }

        if let Some(size) = self.pending_size.take() {
            if let Some(surface) = self.surface.as_mut() {
                surface.configure(size);
            }
            self.apply_size(size);
        }

        self.clock.frame(now_ms);
        let ticks = match self.timestep.as_mut() {
            Some(timestep) => timestep.accumulate((self.clock.frame_dt_ms() / 1000.0) as f32),
            None => 1,
        };

        self.model.advance(ticks, &self.geometry);
        self.reveal.step(ticks, &self.geometry, self.clock.elapsed_secs());
        self.clock.add_ticks(ticks);

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        self.renderer.draw(
            surface,
            &self.geometry,
            &self.model,
            &self.reveal,
            self.clock.elapsed_ms(),
        );
        true
    }

    /// Drive frames from `timestamps` until it runs out or the scheduler is
    /// stopped. Returns the number of frames drawn.
    pub fn run(&mut self, timestamps: impl IntoIterator<Item = f64>) -> u64 {
        let mut frames = 0;
        for now_ms in timestamps {
            if !self.tick(now_ms) {
                break;
            }
            frames += 1;
        }
        frames
    }

    fn apply_size(&mut self, size: SurfaceSize) {
        self.size = size;
        self.geometry = SceneGeometry::from_size(size, self.inset);
        self.model.project(&self.geometry);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn model(&self) -> &EntityOrbitModel {
        &self.model
    }

    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}
