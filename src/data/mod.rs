pub mod disc;
pub mod possibility;

pub use disc::{Disc, DiscId, DiscInfo, DiscPath, DiscSet, Side};
pub use possibility::{Possibility, proposition_names};
