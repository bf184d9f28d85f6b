//! Drawing surfaces the split engine paints onto
//!
//! The engine only ever talks to the [`Surface`] trait. [`Scene`] keeps shapes
//! in memory; [`CanvasSurface`] mirrors a scene onto an HTML canvas.

pub mod scene;
pub mod canvas;

pub use scene::{Scene, Shape};
pub use canvas::CanvasSurface;

/// Token identifying a shape on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

/// Addressable 2D drawing surface of circles and text labels
pub trait Surface {
    /// Width and height in surface units
    fn size(&self) -> (f64, f64);

    fn create_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, stroke: &str) -> ShapeId;

    fn create_text(&mut self, x: f64, y: f64, content: &str) -> ShapeId;

    /// Move a shape. `y` of `None` keeps the current vertical position.
    fn set_position(&mut self, id: ShapeId, x: f64, y: Option<f64>);

    /// Change a circle's fill. Texts and unknown ids are ignored.
    fn set_fill(&mut self, id: ShapeId, fill: &str);

    /// Remove a shape. Unknown ids are ignored.
    fn remove(&mut self, id: ShapeId);

    /// Every circle currently on the surface, in creation order
    fn active_circle_ids(&self) -> Vec<ShapeId>;
}
