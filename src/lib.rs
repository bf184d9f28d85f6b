use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod data;
pub mod error;
pub mod interaction;
pub mod split;
pub mod surface;

pub use error::SplitError;
pub use split::{SplitDriver, SplitParams};

use surface::CanvasSurface;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Split diagram bound to a canvas, exposed to JavaScript
///
/// The host calls `frame()` from `requestAnimationFrame` until it returns
/// false.
#[wasm_bindgen]
pub struct SplitDiagram {
    driver: SplitDriver<CanvasSurface>,
}

#[wasm_bindgen]
impl SplitDiagram {
    /// Create a diagram with default parameters
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<SplitDiagram, JsValue> {
        Self::build(&canvas, SplitParams::default()).map_err(to_js)
    }

    /// Create a diagram from YAML parameters
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> Result<SplitDiagram, JsValue> {
        let params = SplitParams::from_yaml(yaml).map_err(to_js)?;
        Self::build(&canvas, params).map_err(to_js)
    }

    fn build(canvas: &HtmlCanvasElement, params: SplitParams) -> error::Result<SplitDiagram> {
        params.validate()?;
        let surface = CanvasSurface::new(canvas)?.with_text_style(&params.font, &params.text_fill);
        Ok(Self {
            driver: SplitDriver::new(surface, params),
        })
    }

    /// Start a split pass; `depth` is the raw form-field text
    #[wasm_bindgen]
    pub fn split(&mut self, depth: &str) -> Result<(), JsValue> {
        self.driver.split_input(depth);
        self.present()
    }

    /// Advance every running split by one frame and repaint.
    /// Returns whether another frame is needed.
    #[wasm_bindgen]
    pub fn frame(&mut self) -> Result<bool, JsValue> {
        let running = self.driver.frame();
        self.present()?;
        Ok(running)
    }

    /// Clear the diagram
    #[wasm_bindgen]
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.driver.reset();
        self.present()
    }

    #[wasm_bindgen]
    pub fn leaf_count(&self) -> usize {
        self.driver.leaf_count()
    }

    #[wasm_bindgen]
    pub fn is_settled(&self) -> bool {
        self.driver.is_settled()
    }

    /// Hover lookup; returns disc info as JSON
    #[wasm_bindgen]
    pub fn on_mouse_move(&self, x: f64, y: f64) -> Option<String> {
        let id = self.driver.disc_at(x, y)?;
        let info = self.driver.info(id)?;
        serde_json::to_string(&info).ok()
    }

    /// Highlight leaves where proposition `index` holds (0-based)
    #[wasm_bindgen]
    pub fn highlight(&mut self, index: Option<u32>) -> Result<(), JsValue> {
        self.driver.highlight(index.map(|i| i as usize));
        self.present()
    }

    /// Set-theoretic notation of every leaf, in possibility order
    #[wasm_bindgen]
    pub fn possibilities(&self) -> js_sys::Array {
        self.driver
            .possibilities()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    fn present(&self) -> Result<(), JsValue> {
        self.driver.surface().present().map_err(to_js)
    }
}

fn to_js(err: SplitError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
