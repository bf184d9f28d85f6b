use crate::data::{Disc, DiscId};

/// Information about a point-disc hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub disc: DiscId,
    /// Distance from the point to the disc center
    pub distance: f64,
}

/// Point picking against the active discs
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscPicker;

impl DiscPicker {
    pub fn new() -> Self {
        Self
    }

    /// Find the disc under a point, nearest center first
    pub fn pick<'a>(&self, discs: impl IntoIterator<Item = &'a Disc>, x: f64, y: f64) -> Option<HitInfo> {
        let mut closest: Option<HitInfo> = None;

        for disc in discs {
            if !disc.contains_point(x, y) {
                continue;
            }

            let distance = disc.distance_squared(x, y).sqrt();
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(HitInfo { disc: disc.id, distance });
            }
        }

        closest
    }
}
