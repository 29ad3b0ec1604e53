//! Act-partitioned Kanban columns.

use crate::model::scene::{Act, Scene};
use crate::search::filter::SceneFilter;

/// One Kanban column: the passing scenes of one act.
#[derive(Debug, Clone, PartialEq)]
pub struct KanbanColumn<'a> {
    pub act: Act,
    /// Passing scenes of `act`, in sequence order. With a filter active the
    /// index here is not the move index; use `collection::partition_index`.
    pub scenes: Vec<&'a Scene>,
}

impl KanbanColumn<'_> {
    pub fn count(&self) -> usize {
        self.scenes.len()
    }

    /// Sum of the column's durations in minutes.
    pub fn total_minutes(&self) -> f64 {
        self.scenes.iter().map(|scene| scene.minutes()).sum()
    }
}

/// Three columns, one per act, in act order.
pub fn kanban_columns<'a>(scenes: &'a [Scene], filter: &SceneFilter) -> [KanbanColumn<'a>; 3] {
    let passing = filter.apply(scenes);
    Act::ALL.map(|act| KanbanColumn {
        act,
        scenes: passing
            .iter()
            .copied()
            .filter(|scene| scene.act == act)
            .collect(),
    })
}
