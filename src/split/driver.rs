use crate::data::{Disc, DiscId, DiscInfo, DiscPath, DiscSet, Possibility};
use crate::interaction::DiscPicker;
use crate::surface::Surface;
use super::animator::{fill_for, run_frame, split_disc, SplitAnimation, SplitContext};
use super::params::{parse_split_depth, SplitParams, MAX_SPLIT_DEPTH};
use super::scheduler::FrameQueue;

/// Owns the disc tree and drives split passes over its leaves
pub struct SplitDriver<S: Surface> {
    surface: S,
    params: SplitParams,
    discs: DiscSet,
    queue: FrameQueue<SplitAnimation>,
    highlight: Option<usize>,
    picker: DiscPicker,
}

impl<S: Surface> SplitDriver<S> {
    pub fn new(surface: S, params: SplitParams) -> Self {
        Self {
            surface,
            params,
            discs: DiscSet::new(),
            queue: FrameQueue::new(),
            highlight: None,
            picker: DiscPicker::new(),
        }
    }

    fn context(&mut self) -> SplitContext<'_, S> {
        SplitContext {
            surface: &mut self.surface,
            discs: &mut self.discs,
            params: &self.params,
            queue: &mut self.queue,
            highlight: self.highlight,
        }
    }

    /// Run one split pass with a depth read from user input
    pub fn split_input(&mut self, input: &str) {
        self.split(parse_split_depth(input));
    }

    /// Run one split pass over every settled leaf.
    ///
    /// Creates the root with `depth` remaining splits if nothing is drawn yet.
    /// Existing leaves split according to their own remaining depth, so calling
    /// this again once every leaf is exhausted changes nothing.
    pub fn split(&mut self, depth: u32) {
        if self.discs.is_empty() {
            let depth = self.params.clamp_depth(depth);
            self.create_root(depth);
        }

        // Snapshot first: children spawned by this pass are not revisited
        let leaves: Vec<DiscId> = self
            .surface
            .active_circle_ids()
            .into_iter()
            .filter_map(|circle| self.discs.resolve_circle(circle))
            .filter(|id| self.discs.get(*id).is_some_and(|disc| disc.settled))
            .collect();

        let mut ctx = self.context();
        for id in leaves {
            split_disc(&mut ctx, id);
        }
    }

    fn create_root(&mut self, depth: u32) {
        let (width, height) = self.surface.size();
        let (x, y) = (width / 2.0, height / 2.0);
        let path = DiscPath::root();
        let params = &self.params;

        let circle = self.surface.create_circle(
            x,
            y,
            params.radius,
            fill_for(params, self.highlight, &path),
            &params.stroke,
        );
        let text = self.surface.create_text(x, y + params.label_offset, &params.label);
        let id = self.discs.allocate_id();
        self.discs.insert(Disc {
            id,
            x,
            y,
            radius: params.radius,
            label: params.label.clone(),
            depth_remaining: depth,
            path,
            circle,
            text,
            settled: true,
        });

        tracing::info!(disc = id.0, x, y, depth, "root disc created");
    }

    /// Process one animation frame. Returns true while splits are still running.
    pub fn frame(&mut self) -> bool {
        run_frame(&mut self.context());
        !self.queue.is_empty()
    }

    /// Run frames until every split has settled, returning how many ran
    pub fn settle(&mut self) -> usize {
        let frames_per_generation = (self.params.steps as usize).saturating_add(1);
        let generations = self.params.max_depth.min(MAX_SPLIT_DEPTH) as usize + 1;
        let limit = generations.saturating_mul(frames_per_generation);

        let mut frames = 0;
        while !self.is_settled() && frames < limit {
            self.frame();
            frames += 1;
        }
        frames
    }

    pub fn is_settled(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove every disc and cancel in-flight splits
    pub fn reset(&mut self) {
        self.queue.clear();
        for disc in self.discs.drain() {
            self.surface.remove(disc.circle);
            self.surface.remove(disc.text);
        }
        tracing::info!("diagram reset");
    }

    /// Color leaves by whether proposition `index` holds; None clears it
    pub fn highlight(&mut self, index: Option<usize>) {
        self.highlight = index;
        for disc in self.discs.iter() {
            let fill = fill_for(&self.params, index, &disc.path);
            self.surface.set_fill(disc.circle, fill);
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.discs.len()
    }

    /// Active discs ordered left to right
    pub fn leaves(&self) -> Vec<&Disc> {
        let mut leaves: Vec<&Disc> = self.discs.iter().collect();
        leaves.sort_by(|a, b| a.x.total_cmp(&b.x));
        leaves
    }

    pub fn info(&self, id: DiscId) -> Option<DiscInfo> {
        let disc = self.discs.get(id)?;
        let possibility = Possibility::new(&disc.path);
        Some(DiscInfo {
            id: disc.id,
            x: disc.x,
            y: disc.y,
            depth_remaining: disc.depth_remaining,
            generation: disc.generation(),
            bitstring: possibility.bitstring(),
            notation: possibility.notation(&self.params.propositions),
        })
    }

    /// Set-theoretic notation of every leaf in possibility order
    ///
    /// Ordered by path rather than x, which only agree while `spread_decay`
    /// is at most 0.5.
    pub fn possibilities(&self) -> Vec<String> {
        let mut leaves: Vec<&Disc> = self.discs.iter().collect();
        leaves.sort_by(|a, b| a.path.cmp(&b.path));
        leaves
            .into_iter()
            .map(|disc| Possibility::new(&disc.path).notation(&self.params.propositions))
            .collect()
    }

    /// Disc under a surface point
    pub fn disc_at(&self, x: f64, y: f64) -> Option<DiscId> {
        self.picker.pick(self.discs.iter(), x, y).map(|hit| hit.disc)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Scene, Shape, ShapeId};

    const ROOT_X: f64 = 400.0;
    const ROOT_Y: f64 = 300.0;

    fn driver(steps: u32) -> SplitDriver<Scene> {
        let params = SplitParams {
            steps,
            ..Default::default()
        };
        SplitDriver::new(Scene::new(800.0, 600.0), params)
    }

    fn offsets(driver: &SplitDriver<Scene>) -> Vec<f64> {
        driver.leaves().iter().map(|d| d.x - ROOT_X).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn test_depth_zero_keeps_root() {
        let mut driver = driver(5);
        driver.split(0);
        driver.settle();

        assert_eq!(driver.leaf_count(), 1);
        let root = driver.leaves()[0];
        assert_eq!((root.x, root.y), (ROOT_X, ROOT_Y));
        assert_eq!(root.depth_remaining, 0);
        assert_eq!(root.label, "W");
    }

    #[test]
    fn test_depth_one_offsets() {
        let mut driver = driver(5);
        driver.split(1);
        driver.settle();

        assert_close(&offsets(&driver), &[-30.0, 30.0]);
        for disc in driver.leaves() {
            assert_eq!(disc.y, ROOT_Y);
            assert_eq!(disc.radius, 20.0);
            assert_eq!(disc.depth_remaining, 0);
        }
    }

    #[test]
    fn test_depth_two_offsets() {
        let mut driver = driver(5);
        driver.split(2);
        driver.settle();

        assert_close(&offsets(&driver), &[-45.0, -15.0, 15.0, 45.0]);
    }

    #[test]
    fn test_leaf_count_doubles_per_generation() {
        for depth in 0..=5u32 {
            let mut driver = driver(3);
            driver.split(depth);
            driver.settle();

            assert!(driver.is_settled());
            assert_eq!(driver.leaf_count(), 1 << depth);
            assert_eq!(driver.surface().active_circle_ids().len(), 1 << depth);
            assert_eq!(driver.surface().text_count(), 1 << depth);
            assert!(driver.leaves().iter().all(|d| d.depth_remaining == 0));
            assert!(driver.leaves().iter().all(|d| d.radius == 20.0 && d.label == "W"));
        }
    }

    #[test]
    fn test_settle_frame_count() {
        let mut driver = driver(4);
        driver.split(3);
        // Each generation moves for 4 frames and settles on the 5th
        assert_eq!(driver.settle(), 15);
    }

    #[test]
    fn test_generations_do_not_overlap() {
        let mut driver = driver(4);
        driver.split(2);

        // While the first split moves, no grandchildren exist
        for _ in 0..4 {
            assert!(driver.frame());
            assert_eq!(driver.leaf_count(), 2);
            assert!(driver.leaves().iter().all(|d| d.generation() == 1));
        }
        // Settle frame of generation 1 spawns generation 2 at the parents' spots
        assert!(driver.frame());
        assert_eq!(driver.leaf_count(), 4);
        assert_close(&offsets(&driver), &[-30.0, -30.0, 30.0, 30.0]);
    }

    #[test]
    fn test_repeat_pass_after_settle_is_noop() {
        let mut driver = driver(3);
        driver.split(2);
        driver.settle();
        let before = offsets(&driver);

        driver.split(2);
        assert!(driver.is_settled());
        driver.settle();
        assert_eq!(offsets(&driver), before);
        assert_eq!(driver.leaf_count(), 4);
    }

    #[test]
    fn test_pass_during_animation_skips_moving_children() {
        let mut driver = driver(3);
        driver.split(2);
        driver.frame();

        // Children belong to the running split, so this pass does nothing
        driver.split(2);
        assert_eq!(driver.leaf_count(), 2);

        driver.settle();
        assert_eq!(driver.leaf_count(), 4);
        assert_close(&offsets(&driver), &[-45.0, -15.0, 15.0, 45.0]);
    }

    #[test]
    fn test_stale_split_is_noop() {
        let mut driver = driver(2);
        driver.split(1);
        driver.settle();

        let mut ctx = driver.context();
        split_disc(&mut ctx, DiscId(0));
        split_disc(&mut ctx, DiscId(0));
        assert!(driver.is_settled());
        assert_eq!(driver.leaf_count(), 2);
    }

    #[test]
    fn test_input_coercion() {
        let mut driver = driver(2);
        driver.split_input("not a number");
        driver.settle();
        assert_eq!(driver.leaf_count(), 1);

        let mut driver = self::driver(2);
        driver.split_input("-3");
        driver.settle();
        assert_eq!(driver.leaf_count(), 1);

        let mut driver = self::driver(2);
        driver.split_input(" 3 ");
        driver.settle();
        assert_eq!(driver.leaf_count(), 8);
    }

    #[test]
    fn test_depth_is_clamped() {
        let params = SplitParams {
            steps: 1,
            max_depth: 2,
            ..Default::default()
        };
        let mut driver = SplitDriver::new(Scene::new(800.0, 600.0), params);
        driver.split(30);
        driver.settle();
        assert_eq!(driver.leaf_count(), 4);
    }

    #[test]
    fn test_reset_clears_surface() {
        let mut driver = driver(3);
        driver.split(2);
        driver.frame();
        driver.reset();

        assert_eq!(driver.leaf_count(), 0);
        assert!(driver.surface().is_empty());
        assert!(driver.is_settled());

        driver.split(1);
        driver.settle();
        assert_eq!(driver.leaf_count(), 2);
    }

    #[test]
    fn test_possibilities_left_to_right() {
        let mut driver = driver(2);
        driver.split(2);
        driver.settle();

        assert_eq!(
            driver.possibilities(),
            vec!["¬B1 ∩ ¬B2", "¬B1 ∩ B2", "B1 ∩ ¬B2", "B1 ∩ B2"]
        );
    }

    #[test]
    fn test_possibilities_follow_path_with_wide_spread() {
        let params = SplitParams {
            steps: 2,
            spread_decay: 0.9,
            ..Default::default()
        };
        let mut driver = SplitDriver::new(Scene::new(800.0, 600.0), params);
        driver.split(3);
        driver.settle();

        let bitstrings: Vec<String> = driver
            .possibilities()
            .iter()
            .map(|notation| {
                notation
                    .split(" ∩ ")
                    .map(|term| if term.starts_with('¬') { '0' } else { '1' })
                    .collect()
            })
            .collect();
        assert_eq!(
            bitstrings,
            vec!["000", "001", "010", "011", "100", "101", "110", "111"]
        );
    }

    #[test]
    fn test_depth_ignored_once_root_exists() {
        let mut driver = driver(2);
        driver.split(1);
        driver.settle();

        driver.split(500);
        assert!(driver.is_settled());
        driver.settle();
        assert_eq!(driver.leaf_count(), 2);
        assert_close(&offsets(&driver), &[-30.0, 30.0]);
    }

    #[test]
    fn test_highlight_applies_to_new_children() {
        let mut driver = driver(2);
        driver.highlight(Some(0));
        driver.split(1);

        let fill_of = |driver: &SplitDriver<Scene>, circle: ShapeId| match driver.surface().get(circle) {
            Some(Shape::Circle { fill, .. }) => fill.clone(),
            other => panic!("expected circle, got {:?}", other),
        };

        // Children are colored the moment they appear, before moving
        let mut fills: Vec<(String, String)> = driver
            .discs
            .iter()
            .map(|d| (d.path.to_bitstring(), fill_of(&driver, d.circle)))
            .collect();
        fills.sort();
        assert_eq!(
            fills,
            vec![
                ("0".to_string(), "lightgray".to_string()),
                ("1".to_string(), "gold".to_string()),
            ]
        );

        driver.settle();
        let settled: Vec<String> = driver.leaves().iter().map(|d| fill_of(&driver, d.circle)).collect();
        assert_eq!(settled, vec!["lightgray", "gold"]);
    }

    #[test]
    fn test_highlight_colors_leaves() {
        let mut driver = driver(2);
        driver.split(1);
        driver.settle();
        driver.highlight(Some(0));

        let fills: Vec<String> = driver
            .leaves()
            .iter()
            .map(|d| match driver.surface().get(d.circle) {
                Some(Shape::Circle { fill, .. }) => fill.clone(),
                other => panic!("expected circle, got {:?}", other),
            })
            .collect();
        assert_eq!(fills, vec!["lightgray", "gold"]);

        driver.highlight(None);
        let left = driver.leaves()[0].circle;
        assert!(matches!(
            driver.surface().get(left),
            Some(Shape::Circle { fill, .. }) if fill == "lightblue"
        ));
    }

    #[test]
    fn test_disc_at_and_info() {
        let mut driver = driver(2);
        driver.split(1);
        driver.settle();

        let id = driver.disc_at(ROOT_X + 30.0, ROOT_Y).unwrap();
        let info = driver.info(id).unwrap();
        assert_eq!(info.bitstring, "1");
        assert_eq!(info.notation, "B1");
        assert_eq!(info.generation, 1);

        assert!(driver.disc_at(ROOT_X, ROOT_Y - 100.0).is_none());
    }

    #[test]
    fn test_label_follows_disc() {
        let mut driver = driver(2);
        driver.split(1);
        driver.settle();

        for disc in driver.leaves() {
            let label = driver.surface().get(disc.text).unwrap();
            assert_eq!(label.position(), (disc.x, disc.y + 5.0));
        }
    }
}
