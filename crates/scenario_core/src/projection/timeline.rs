//! Cumulative-duration timeline.
//!
//! # Invariants
//! - Bars are ordered by act rank, then by position within the act.
//! - Intervals are half-open `[start, end)`, contiguous, starting at 0.
//! - A zero-duration scene yields a zero-width bar and does not break the scan.

use crate::model::id::EntityId;
use crate::model::scene::{Act, Scene};
use crate::search::filter::SceneFilter;

/// Minutes between vertical grid lines.
pub const TICK_MINUTES: f64 = 5.0;

/// Upper bound on grid lines; longer timelines widen the spacing instead.
pub const MAX_TICKS: usize = 1000;

/// One scene placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineBar {
    pub id: EntityId,
    pub title: String,
    pub act: Act,
    pub color: String,
    pub start: f64,
    pub end: f64,
}

impl TimelineBar {
    pub fn minutes(&self) -> f64 {
        self.end - self.start
    }
}

/// Timeline over the passing scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub bars: Vec<TimelineBar>,
    pub total: f64,
}

impl Timeline {
    /// Share of the full width taken by `bar`, in `[0, 1]`.
    ///
    /// The denominator never drops below one minute so an all-zero timeline
    /// still renders.
    pub fn width_fraction(&self, bar: &TimelineBar) -> f64 {
        let fraction = bar.minutes() / self.total.max(1.0);
        if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Grid line positions in minutes: `0, 5, 10, ...`, at least one line.
    ///
    /// Spacing stays a multiple of [`TICK_MINUTES`] and grows once the total
    /// would need more than [`MAX_TICKS`] lines.
    pub fn ticks(&self) -> Vec<f64> {
        if !self.total.is_finite() || self.total <= 0.0 {
            return vec![0.0];
        }
        let stride = (self.total / TICK_MINUTES / MAX_TICKS as f64).ceil().max(1.0);
        let step = TICK_MINUTES * stride;
        let count = ((self.total / step).ceil().max(1.0) as usize).min(MAX_TICKS);
        (0..count).map(|index| index as f64 * step).collect()
    }

    /// Axis labels in minutes: start, midpoint (rounded up) and end.
    pub fn axis_labels(&self) -> [f64; 3] {
        [0.0, (self.total / 2.0).ceil(), self.total]
    }
}

/// Builds the timeline for scenes passing `filter`.
pub fn timeline(scenes: &[Scene], filter: &SceneFilter) -> Timeline {
    let mut ordered = filter.apply(scenes);
    // Stable sort keeps sequence order within each act.
    ordered.sort_by_key(|scene| scene.act.rank());

    let mut cursor = 0.0;
    let bars = ordered
        .into_iter()
        .map(|scene| {
            let start = cursor;
            cursor += scene.minutes();
            TimelineBar {
                id: scene.id.clone(),
                title: scene.title.clone(),
                act: scene.act,
                color: scene.color.clone(),
                start,
                end: cursor,
            }
        })
        .collect();

    Timeline {
        bars,
        total: cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::{timeline, MAX_TICKS, TICK_MINUTES};
    use crate::model::id::EntityId;
    use crate::model::scene::{Act, Scene};
    use crate::search::filter::SceneFilter;

    fn scene(id: &str, act: Act, minutes: f64) -> Scene {
        let mut scene = Scene::with_id(EntityId::from(id));
        scene.act = act;
        scene.duration = minutes;
        scene
    }

    #[test]
    fn bars_follow_act_then_sequence_order() {
        let scenes = vec![
            scene("b1", Act::Act2, 6.0),
            scene("a1", Act::Act1, 5.0),
            scene("a2", Act::Act1, 4.0),
        ];
        let line = timeline(&scenes, &SceneFilter::default());
        let spans = line
            .bars
            .iter()
            .map(|bar| (bar.id.as_str(), bar.start, bar.end))
            .collect::<Vec<_>>();
        assert_eq!(
            spans,
            vec![("a1", 0.0, 5.0), ("a2", 5.0, 9.0), ("b1", 9.0, 15.0)]
        );
        assert_eq!(line.total, 15.0);
    }

    #[test]
    fn zero_duration_scene_is_zero_width() {
        let scenes = vec![
            scene("a", Act::Act1, 2.0),
            scene("b", Act::Act1, 0.0),
            scene("c", Act::Act1, 3.0),
        ];
        let line = timeline(&scenes, &SceneFilter::default());
        assert_eq!(line.bars[1].start, 2.0);
        assert_eq!(line.bars[1].end, 2.0);
        assert_eq!(line.bars[2].start, 2.0);
        assert_eq!(line.total, 5.0);
    }

    #[test]
    fn ticks_and_labels_scale_with_total() {
        let scenes = vec![scene("a", Act::Act1, 12.0)];
        let line = timeline(&scenes, &SceneFilter::default());
        assert_eq!(line.ticks(), vec![0.0, 5.0, 10.0]);
        assert_eq!(line.axis_labels(), [0.0, 6.0, 12.0]);
        assert_eq!(line.width_fraction(&line.bars[0]), 1.0);

        let empty = timeline(&[], &SceneFilter::default());
        assert_eq!(empty.ticks(), vec![0.0]);
        assert_eq!(empty.total, 0.0);
    }

    #[test]
    fn huge_totals_keep_the_tick_count_bounded() {
        let scenes = vec![scene("a", Act::Act1, 1e300)];
        let line = timeline(&scenes, &SceneFilter::default());
        let ticks = line.ticks();
        assert!(!ticks.is_empty());
        assert!(ticks.len() <= MAX_TICKS);
        assert_eq!(ticks[0], 0.0);
        assert!(ticks.iter().all(|tick| tick.is_finite() && *tick < line.total));
        assert_eq!(line.width_fraction(&line.bars[0]), 1.0);

        let long = timeline(&[scene("b", Act::Act2, 20_000.0)], &SceneFilter::default());
        let ticks = long.ticks();
        assert_eq!(ticks.len(), MAX_TICKS);
        assert_eq!(ticks[1], 4.0 * TICK_MINUTES);
    }

    #[test]
    fn overflowing_total_still_yields_one_tick() {
        let scenes = vec![
            scene("a", Act::Act1, f64::MAX),
            scene("b", Act::Act1, f64::MAX),
        ];
        let line = timeline(&scenes, &SceneFilter::default());
        assert!(line.total.is_infinite());
        assert_eq!(line.ticks(), vec![0.0]);
        assert!(line
            .bars
            .iter()
            .all(|bar| (0.0..=1.0).contains(&line.width_fraction(bar))));
    }
}
