use std::collections::BTreeMap;
use super::{ShapeId, Surface};

/// A shape retained by a [`Scene`]
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: String,
        stroke: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
    },
}

impl Shape {
    pub fn position(&self) -> (f64, f64) {
        match self {
            Shape::Circle { x, y, .. } | Shape::Text { x, y, .. } => (*x, *y),
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle { .. })
    }
}

/// In-memory retained surface
///
/// Shapes are keyed by a monotonically increasing token, so iteration order
/// is creation order.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    shapes: BTreeMap<ShapeId, Shape>,
    next_id: u64,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn text_count(&self) -> usize {
        self.shapes.values().filter(|s| !s.is_circle()).count()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }
}

impl Surface for Scene {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn create_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, stroke: &str) -> ShapeId {
        self.insert(Shape::Circle {
            x,
            y,
            radius,
            fill: fill.to_string(),
            stroke: stroke.to_string(),
        })
    }

    fn create_text(&mut self, x: f64, y: f64, content: &str) -> ShapeId {
        self.insert(Shape::Text {
            x,
            y,
            content: content.to_string(),
        })
    }

    fn set_position(&mut self, id: ShapeId, new_x: f64, new_y: Option<f64>) {
        if let Some(Shape::Circle { x, y, .. } | Shape::Text { x, y, .. }) = self.shapes.get_mut(&id) {
            *x = new_x;
            if let Some(new_y) = new_y {
                *y = new_y;
            }
        }
    }

    fn set_fill(&mut self, id: ShapeId, new_fill: &str) {
        if let Some(Shape::Circle { fill, .. }) = self.shapes.get_mut(&id) {
            *fill = new_fill.to_string();
        }
    }

    fn remove(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
    }

    fn active_circle_ids(&self) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|(_, shape)| shape.is_circle())
            .map(|(id, _)| *id)
            .collect()
    }
}
