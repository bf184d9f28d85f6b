use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use crate::error::{Result, SplitError};
use super::{Scene, Shape, ShapeId, Surface};

/// A [`Scene`] painted onto a 2D canvas context
///
/// Mutations only touch the retained scene; [`CanvasSurface::present`]
/// repaints the whole canvas once per frame.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    scene: Scene,
    font: String,
    text_fill: String,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| SplitError::surface("Failed to get 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SplitError::surface("Context is not a CanvasRenderingContext2d"))?;

        Ok(Self {
            ctx,
            scene: Scene::new(canvas.width() as f64, canvas.height() as f64),
            font: "14px sans-serif".to_string(),
            text_fill: "black".to_string(),
        })
    }

    pub fn with_text_style(mut self, font: &str, fill: &str) -> Self {
        self.font = font.to_string();
        self.text_fill = fill.to_string();
        self
    }

    /// Clear the canvas and draw every circle, then every label on top
    pub fn present(&self) -> Result<()> {
        let (width, height) = self.scene.size();
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, width, height);

        for (_, shape) in self.scene.shapes() {
            if let Shape::Circle { x, y, radius, fill, stroke } = shape {
                ctx.begin_path();
                ctx.arc(*x, *y, *radius, 0.0, TAU).map_err(js_error)?;
                ctx.set_fill_style_str(fill);
                ctx.fill();
                ctx.set_stroke_style_str(stroke);
                ctx.stroke();
            }
        }

        ctx.set_font(&self.font);
        ctx.set_text_align("center");
        ctx.set_fill_style_str(&self.text_fill);
        for (_, shape) in self.scene.shapes() {
            if let Shape::Text { x, y, content } = shape {
                ctx.fill_text(content, *x, *y).map_err(js_error)?;
            }
        }

        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        self.scene.size()
    }

    fn create_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, stroke: &str) -> ShapeId {
        self.scene.create_circle(x, y, radius, fill, stroke)
    }

    fn create_text(&mut self, x: f64, y: f64, content: &str) -> ShapeId {
        self.scene.create_text(x, y, content)
    }

    fn set_position(&mut self, id: ShapeId, x: f64, y: Option<f64>) {
        self.scene.set_position(id, x, y);
    }

    fn set_fill(&mut self, id: ShapeId, fill: &str) {
        self.scene.set_fill(id, fill);
    }

    fn remove(&mut self, id: ShapeId) {
        self.scene.remove(id);
    }

    fn active_circle_ids(&self) -> Vec<ShapeId> {
        self.scene.active_circle_ids()
    }
}

fn js_error(value: JsValue) -> SplitError {
    SplitError::surface(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
