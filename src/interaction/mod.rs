pub mod picking;

pub use picking::{DiscPicker, HitInfo};
