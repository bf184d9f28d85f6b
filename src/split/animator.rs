//! Split animation state machine
//!
//! One [`SplitAnimation`] replaces a single disc with two children, slides
//! them apart over a fixed number of frames, then splits each child in turn:
//!
//! `Idle -> Replacing -> Animating -> Settled -> Recursed -> Terminal`
//!
//! Stale ids, exhausted depth and children still owned by a running split
//! all short-circuit to `Terminal`.

use crate::data::{Disc, DiscId, DiscPath, DiscSet, Possibility, Side};
use crate::surface::Surface;
use super::params::SplitParams;
use super::scheduler::FrameQueue;

/// Where a split currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPhase {
    Idle,
    Replacing,
    Animating { step: u32 },
    Settled,
    Recursed,
    Terminal,
}

/// Everything a split is allowed to touch while it runs
pub struct SplitContext<'a, S: Surface> {
    pub surface: &'a mut S,
    pub discs: &'a mut DiscSet,
    pub params: &'a SplitParams,
    pub queue: &'a mut FrameQueue<SplitAnimation>,
    /// Proposition currently highlighted, applied to newly created discs
    pub highlight: Option<usize>,
}

/// Fill color for a disc at `path` given an optional highlighted proposition
pub fn fill_for<'p>(params: &'p SplitParams, highlight: Option<usize>, path: &DiscPath) -> &'p str {
    match highlight.and_then(|index| Possibility::new(path).holds(index)) {
        Some(true) => &params.highlight_fill,
        Some(false) => &params.dimmed_fill,
        None => &params.fill,
    }
}

/// The children of one split, with the geometry they animate along
#[derive(Debug, Clone, Copy)]
struct SplitPair {
    children: [DiscId; 2],
    origin_x: f64,
    half_spread: f64,
}

/// A single in-flight split
#[derive(Debug, Clone)]
pub struct SplitAnimation {
    target: DiscId,
    phase: SplitPhase,
    pair: Option<SplitPair>,
}

impl SplitAnimation {
    pub fn new(target: DiscId) -> Self {
        Self {
            target,
            phase: SplitPhase::Idle,
            pair: None,
        }
    }

    pub fn phase(&self) -> SplitPhase {
        self.phase
    }

    /// Ids of the two children once the parent has been replaced
    pub fn children(&self) -> Option<[DiscId; 2]> {
        self.pair.map(|pair| pair.children)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, SplitPhase::Animating { .. })
    }

    /// Run the synchronous part of a split: resolve the target and, if it
    /// may split, replace it with two children at its position
    pub fn start<S: Surface>(&mut self, ctx: &mut SplitContext<'_, S>) -> SplitPhase {
        if self.phase != SplitPhase::Idle {
            return self.phase;
        }

        if !ctx.discs.contains(self.target) {
            tracing::debug!(disc = self.target.0, "split skipped: disc no longer active");
            self.phase = SplitPhase::Terminal;
            return self.phase;
        }
        self.phase = SplitPhase::Replacing;

        self.phase = match self.replace(ctx) {
            Some(pair) => {
                self.pair = Some(pair);
                SplitPhase::Animating { step: 0 }
            }
            None => SplitPhase::Terminal,
        };
        self.phase
    }

    fn replace<S: Surface>(&self, ctx: &mut SplitContext<'_, S>) -> Option<SplitPair> {
        let parent = ctx.discs.get(self.target)?;
        if !parent.settled {
            tracing::debug!(disc = self.target.0, "split skipped: parent split still animating");
            return None;
        }
        if !parent.can_split() {
            tracing::debug!(disc = self.target.0, "split skipped: no depth remaining");
            return None;
        }

        let parent = ctx.discs.remove(self.target)?;
        ctx.surface.remove(parent.circle);
        ctx.surface.remove(parent.text);

        let params = ctx.params;
        let mut children = [parent.id; 2];
        for (slot, side) in children.iter_mut().zip(Side::BOTH) {
            let path = parent.path.child(side);
            let circle = ctx.surface.create_circle(
                parent.x,
                parent.y,
                parent.radius,
                fill_for(params, ctx.highlight, &path),
                &params.stroke,
            );
            let text = ctx.surface.create_text(parent.x, parent.y + params.label_offset, &params.label);
            let id = ctx.discs.allocate_id();
            ctx.discs.insert(Disc {
                id,
                x: parent.x,
                y: parent.y,
                radius: parent.radius,
                label: params.label.clone(),
                depth_remaining: parent.depth_remaining - 1,
                path,
                circle,
                text,
                settled: false,
            });
            *slot = id;
        }

        tracing::debug!(
            disc = parent.id.0,
            generation = parent.generation(),
            depth_remaining = parent.depth_remaining,
            "disc split"
        );

        Some(SplitPair {
            children,
            origin_x: parent.x,
            half_spread: params.half_spread(parent.generation()),
        })
    }

    /// Advance by one frame. Returns true while more frames are needed.
    ///
    /// Once the step budget is spent the split settles and recurses into
    /// both children before returning.
    pub fn on_frame<S: Surface>(&mut self, ctx: &mut SplitContext<'_, S>) -> bool {
        let (SplitPhase::Animating { step }, Some(pair)) = (self.phase, self.pair) else {
            return false;
        };

        let step = step + 1;
        let steps = ctx.params.steps;
        if step > steps {
            self.settle(ctx, pair);
            return false;
        }

        let t = f64::from(step) / f64::from(steps);
        for (id, side) in pair.children.iter().zip(Side::BOTH) {
            if let Some(disc) = ctx.discs.get_mut(*id) {
                disc.x = pair.origin_x + side.sign() * pair.half_spread * t;
                ctx.surface.set_position(disc.circle, disc.x, None);
                ctx.surface.set_position(disc.text, disc.x, None);
            }
        }
        self.phase = SplitPhase::Animating { step };
        true
    }

    fn settle<S: Surface>(&mut self, ctx: &mut SplitContext<'_, S>, pair: SplitPair) {
        self.phase = SplitPhase::Settled;
        for id in pair.children {
            if let Some(disc) = ctx.discs.get_mut(id) {
                disc.settled = true;
            }
        }
        tracing::trace!(disc = self.target.0, "split settled");

        self.phase = SplitPhase::Recursed;
        for id in pair.children {
            split_disc(ctx, id);
        }
        self.phase = SplitPhase::Terminal;
    }
}

/// Split one disc: start its animation and schedule it if it has frames to run
pub fn split_disc<S: Surface>(ctx: &mut SplitContext<'_, S>, id: DiscId) -> SplitPhase {
    let mut animation = SplitAnimation::new(id);
    let phase = animation.start(ctx);
    if animation.is_animating() {
        ctx.queue.request(animation);
    }
    phase
}

/// Process one frame for every split that requested it
pub fn run_frame<S: Surface>(ctx: &mut SplitContext<'_, S>) {
    for mut animation in ctx.queue.take_due() {
        if animation.on_frame(ctx) {
            ctx.queue.request(animation);
        }
    }
}
