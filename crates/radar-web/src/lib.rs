pub mod runner;
pub mod surface;

pub use runner::WebRunner;
pub use surface::CanvasSurface;

use radar_engine::{Catalog, RadarConfig, RadarError};

/// Parse the catalog and optional config JSON and build a runner bound to
/// `canvas_id`. Without a pinned seed, the wall clock seeds the scene so every
/// page load lays the orbit out differently.
pub fn init_runner(
    canvas_id: &str,
    catalog_json: &str,
    config_json: Option<&str>,
) -> Result<WebRunner, RadarError> {
    let catalog = Catalog::from_json(catalog_json)?;
    let mut config = match config_json {
        Some(json) if !json.trim().is_empty() => RadarConfig::from_json(json)?,
        _ => RadarConfig::default(),
    };
    if config.seed.is_none() {
        config.seed = Some(js_sys::Date::now() as u64);
    }
    Ok(WebRunner::new(canvas_id, &catalog, &config))
}

/// Generate the `#[wasm_bindgen]` activation exports for a radar widget.
///
/// Generates:
/// - `thread_local!` storage for the `WebRunner`
/// - `radar_init(canvas_id, config_json)`: parse, build and bind to the canvas
/// - `radar_start()` / `radar_stop()`: activation contract, both idempotent
/// - `radar_resize()`: re-measure the canvas on the next frame
/// - `radar_destroy()`: stop and drop the runner
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// radar_web::export_radar!("stock-radar", include_str!("../catalog.json"));
/// ```
///
/// # Arguments
///
/// - `$radar_name`: string literal used in log messages
/// - `$catalog_json`: `&str` expression holding the catalog JSON array
#[macro_export]
macro_rules! export_radar {
    ($radar_name:literal, $catalog_json:expr) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::WebRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::WebRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call radar_init() first", $radar_name);
                        None
                    }
                }
            })
        }

        #[wasm_bindgen]
        pub fn radar_init(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let runner = $crate::init_runner(canvas_id, $catalog_json, config_json.as_deref())
                .map_err(|e| JsValue::from_str(&e.to_string()))?;

            let previous = RUNNER.with(|cell| cell.borrow_mut().replace(runner));
            drop(previous);
            log::info!("{}: initialized on #{}", $radar_name, canvas_id);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn radar_start() -> bool {
            with_runner(|r| r.start()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn radar_stop() {
            with_runner(|r| r.stop());
        }

        #[wasm_bindgen]
        pub fn radar_resize() {
            with_runner(|r| r.resize());
        }

        #[wasm_bindgen]
        pub fn radar_is_running() -> bool {
            with_runner(|r| r.is_running()).unwrap_or(false)
        }

        #[wasm_bindgen]
        pub fn radar_destroy() {
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            drop(runner);
        }
    };
}
