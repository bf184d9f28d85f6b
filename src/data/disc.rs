use std::collections::{BTreeMap, HashMap};
use serde::Serialize;
use crate::surface::ShapeId;

/// Identity of a disc, allocated from the owning [`DiscSet`]'s counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DiscId(pub u64);

/// Which way a child moves away from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Horizontal direction of travel
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Path bit for this side (left = false, right = true)
    pub fn bit(self) -> bool {
        matches!(self, Side::Right)
    }
}

/// Left/right choices from the root down to a disc
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DiscPath {
    bits: Vec<bool>,
}

impl DiscPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, side: Side) -> Self {
        let mut bits = self.bits.clone();
        bits.push(side.bit());
        Self { bits }
    }

    /// Generation of the disc at this path (root = 0)
    pub fn generation(&self) -> usize {
        self.bits.len()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn to_bitstring(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

/// One node of the split tree, drawn as a labeled circle
#[derive(Debug, Clone)]
pub struct Disc {
    pub id: DiscId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub label: String,
    /// How many more times this disc may split
    pub depth_remaining: u32,
    pub path: DiscPath,
    /// Surface token of the circle
    pub circle: ShapeId,
    /// Surface token of the text label
    pub text: ShapeId,
    /// False while the parent's split animation still owns this disc
    pub settled: bool,
}

impl Disc {
    pub fn generation(&self) -> usize {
        self.path.generation()
    }

    pub fn can_split(&self) -> bool {
        self.depth_remaining > 0
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.distance_squared(x, y) <= self.radius * self.radius
    }

    pub fn distance_squared(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        dx * dx + dy * dy
    }
}

/// Serializable snapshot of a disc for hover info
#[derive(Debug, Clone, Serialize)]
pub struct DiscInfo {
    pub id: DiscId,
    pub x: f64,
    pub y: f64,
    pub depth_remaining: u32,
    pub generation: usize,
    pub bitstring: String,
    pub notation: String,
}

/// The active (drawn) discs, keyed by id in creation order
#[derive(Debug, Default)]
pub struct DiscSet {
    discs: BTreeMap<DiscId, Disc>,
    by_circle: HashMap<ShapeId, DiscId>,
    next_id: u64,
}

impl DiscSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused id. Ids are never reused, even after `drain`.
    pub fn allocate_id(&mut self) -> DiscId {
        let id = DiscId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, disc: Disc) {
        self.by_circle.insert(disc.circle, disc.id);
        self.discs.insert(disc.id, disc);
    }

    pub fn remove(&mut self, id: DiscId) -> Option<Disc> {
        let disc = self.discs.remove(&id)?;
        self.by_circle.remove(&disc.circle);
        Some(disc)
    }

    pub fn get(&self, id: DiscId) -> Option<&Disc> {
        self.discs.get(&id)
    }

    pub fn get_mut(&mut self, id: DiscId) -> Option<&mut Disc> {
        self.discs.get_mut(&id)
    }

    pub fn contains(&self, id: DiscId) -> bool {
        self.discs.contains_key(&id)
    }

    /// Map a surface circle token back to the disc drawn with it
    pub fn resolve_circle(&self, circle: ShapeId) -> Option<DiscId> {
        self.by_circle.get(&circle).copied()
    }

    pub fn len(&self) -> usize {
        self.discs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Disc> {
        self.discs.values()
    }

    /// Remove every disc, returning them so their shapes can be erased
    pub fn drain(&mut self) -> Vec<Disc> {
        self.by_circle.clear();
        std::mem::take(&mut self.discs).into_values().collect()
    }
}
