//! Recursive split-and-animate engine
//!
//! [`SplitDriver`] owns the disc tree and starts a split on every settled
//! leaf. Each [`SplitAnimation`] then runs frame by frame and splits its own
//! children once it settles, so generation `k + 1` only appears after
//! generation `k` has finished moving.

mod animator;
mod driver;
mod params;
mod scheduler;

pub use animator::{fill_for, run_frame, split_disc, SplitAnimation, SplitContext, SplitPhase};
pub use driver::SplitDriver;
pub use params::{parse_split_depth, SplitParams, MAX_SPLIT_DEPTH};
pub use scheduler::FrameQueue;
