use std::cell::{Cell, RefCell};
use std::rc::Rc;

use radar_engine::{Catalog, FrameScheduler, RadarConfig, Surface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, Window};

use crate::surface::CanvasSurface;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Browser driver for one radar instance.
///
/// Wraps a `FrameScheduler<CanvasSurface>` with a `requestAnimationFrame`
/// loop and a window `resize` listener. Each demo keeps one of these in a
/// `thread_local!` (see `export_radar!`), because wasm-bindgen cannot export
/// generic structs directly.
pub struct WebRunner {
    canvas_id: String,
    scheduler: Rc<RefCell<FrameScheduler<CanvasSurface>>>,
    /// The rAF callback. It holds an `Rc` to this slot so it can re-request
    /// itself; `stop` empties the slot to break the cycle.
    frame: Rc<RefCell<Option<FrameCallback>>>,
    /// Id of the frame currently requested, if any.
    frame_id: Rc<Cell<Option<i32>>>,
    resize: Option<Closure<dyn FnMut(Event)>>,
}

impl WebRunner {
    /// Build the scene and try to bind `<canvas id=canvas_id>`. A missing
    /// canvas is not an error here; `start` retries the lookup.
    pub fn new(canvas_id: &str, catalog: &Catalog, config: &RadarConfig) -> Self {
        let mut scheduler = FrameScheduler::new(catalog, config);
        match CanvasSurface::from_canvas_id(canvas_id) {
            Ok(surface) => scheduler.attach(surface),
            Err(e) => log::debug!("radar: {e}"),
        }
        Self {
            canvas_id: canvas_id.to_string(),
            scheduler: Rc::new(RefCell::new(scheduler)),
            frame: Rc::new(RefCell::new(None)),
            frame_id: Rc::new(Cell::new(None)),
            resize: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.borrow().is_running()
    }

    /// Activate: measure the canvas, hook `resize`, request the first frame.
    /// Returns `false` (and schedules nothing) when no canvas is available.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return true;
        }
        let Some(window) = web_sys::window() else {
            log::debug!("radar: no window, not starting");
            return false;
        };

        {
            let mut scheduler = self.scheduler.borrow_mut();
            if scheduler.surface().is_none() {
                match CanvasSurface::from_canvas_id(&self.canvas_id) {
                    Ok(surface) => scheduler.attach(surface),
                    Err(e) => {
                        log::debug!("radar: {e}");
                        return false;
                    }
                }
            }
            if !scheduler.start() {
                return false;
            }
        }

        self.listen_resize(&window);
        self.schedule_frames(&window);
        true
    }

    /// Deactivate: cancel the pending frame and drop both callbacks.
    /// Idempotent and safe before `start`.
    pub fn stop(&mut self) {
        self.scheduler.borrow_mut().stop();

        if let Some(window) = web_sys::window() {
            if let Some(id) = self.frame_id.take() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::debug!("radar: cancelAnimationFrame failed: {e:?}");
                }
            }
            if let Some(on_resize) = self.resize.as_ref() {
                if let Err(e) = window
                    .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
                {
                    log::debug!("radar: removeEventListener failed: {e:?}");
                }
            }
        }

        self.resize = None;
        self.frame.borrow_mut().take();
    }

    /// Re-measure the canvas and queue the new size for the next frame. For
    /// hosts that observe the element directly (e.g. a `ResizeObserver`).
    pub fn resize(&self) {
        let mut scheduler = self.scheduler.borrow_mut();
        if let Some(size) = scheduler.surface().map(|s| s.measure()) {
            scheduler.notify_resize(size);
        }
    }

    fn listen_resize(&mut self, window: &Window) {
        let scheduler = Rc::clone(&self.scheduler);
        let on_resize = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let mut scheduler = scheduler.borrow_mut();
            if let Some(size) = scheduler.surface().map(|s| s.measure()) {
                scheduler.notify_resize(size);
            }
        });
        if let Err(e) =
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        {
            log::debug!("radar: addEventListener failed: {e:?}");
        }
        self.resize = Some(on_resize);
    }

    fn schedule_frames(&mut self, window: &Window) {
        let token = self.scheduler.borrow().token();
        let scheduler = Rc::clone(&self.scheduler);
        let slot = Rc::clone(&self.frame);
        let frame_id = Rc::clone(&self.frame_id);

        let callback = Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            frame_id.set(None);
            if token.is_cancelled() || !scheduler.borrow_mut().tick(now_ms) {
                return;
            }
            // Next frame is requested only after this one finished drawing.
            if let (Some(window), Some(callback)) = (web_sys::window(), slot.borrow().as_ref()) {
                frame_id.set(request_frame(&window, callback));
            }
        });

        self.frame_id.set(request_frame(window, &callback));
        *self.frame.borrow_mut() = Some(callback);
    }
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::debug!("radar: requestAnimationFrame failed: {e:?}");
            None
        }
    }
}

impl Drop for WebRunner {
    fn drop(&mut self) {
        self.stop();
    }
}
