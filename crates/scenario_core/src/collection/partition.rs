//! Act-scoped operations over scene sequences.
//!
//! A scene's rank inside its act column is its position among same-act
//! scenes in the full sequence. Reordering one column must therefore write
//! the column back into the slots its members already occupy, leaving every
//! other act's slots alone.

use super::sequence::update;
use crate::model::id::EntityId;
use crate::model::scene::{Act, Scene};

/// Scenes of `act` in sequence order.
pub fn partition_of(scenes: &[Scene], act: Act) -> Vec<&Scene> {
    scenes.iter().filter(|scene| scene.act == act).collect()
}

/// Column index of scene `id`: its position among scenes of its own act.
///
/// This is the index [`move_within_partition`] addresses, whatever filter a
/// view applies.
pub fn partition_index(scenes: &[Scene], id: &EntityId) -> Option<usize> {
    let act = scenes.iter().find(|scene| &scene.id == id)?.act;
    scenes
        .iter()
        .filter(|scene| scene.act == act)
        .position(|scene| &scene.id == id)
}

/// Moves the `from`-th scene of `act` to position `to` within that act.
///
/// `to` is clamped to the last column index. An out-of-range `from` leaves the
/// sequence unchanged. Scenes of other acts keep their absolute positions.
pub fn move_within_partition(scenes: &[Scene], act: Act, from: usize, to: usize) -> Vec<Scene> {
    let mut column = partition_of(scenes, act);
    if from >= column.len() {
        return scenes.to_vec();
    }

    let moved = column.remove(from);
    let target = to.min(column.len());
    column.insert(target, moved);

    let mut reordered = column.into_iter();
    scenes
        .iter()
        .map(|scene| {
            if scene.act == act {
                // Same count of slots as column members, so this never runs dry.
                reordered.next().unwrap_or(scene).clone()
            } else {
                scene.clone()
            }
        })
        .collect()
}

/// Moves scene `id` to `act` without changing its global position.
pub fn change_act(scenes: &[Scene], id: &EntityId, act: Act) -> Vec<Scene> {
    update(scenes, id, |scene| scene.act = act)
}

#[cfg(test)]
mod tests {
    use super::{change_act, move_within_partition, partition_index, partition_of};
    use crate::model::id::EntityId;
    use crate::model::scene::{Act, Scene};

    fn scene(id: &str, act: Act) -> Scene {
        let mut scene = Scene::with_id(EntityId::from(id));
        scene.act = act;
        scene
    }

    fn ids(scenes: &[Scene]) -> Vec<&str> {
        scenes.iter().map(|scene| scene.id.as_str()).collect()
    }

    fn interleaved() -> Vec<Scene> {
        vec![
            scene("a1", Act::Act1),
            scene("b1", Act::Act2),
            scene("a2", Act::Act1),
            scene("c1", Act::Act3),
            scene("a3", Act::Act1),
            scene("b2", Act::Act2),
        ]
    }

    #[test]
    fn move_writes_column_back_into_its_own_slots() {
        let out = move_within_partition(&interleaved(), Act::Act1, 0, 2);
        assert_eq!(ids(&out), vec!["a2", "b1", "a3", "c1", "a1", "b2"]);
    }

    #[test]
    fn move_clamps_target_to_column_end() {
        let out = move_within_partition(&interleaved(), Act::Act2, 0, 50);
        assert_eq!(ids(&out), vec!["a1", "b2", "a2", "c1", "a3", "b1"]);
    }

    #[test]
    fn move_with_out_of_range_source_is_a_no_op() {
        let base = interleaved();
        assert_eq!(move_within_partition(&base, Act::Act3, 1, 0), base);
        assert_eq!(move_within_partition(&[], Act::Act1, 0, 0), Vec::<Scene>::new());
    }

    #[test]
    fn change_act_keeps_global_position() {
        let out = change_act(&interleaved(), &EntityId::from("c1"), Act::Act1);
        assert_eq!(ids(&out), ids(&interleaved()));
        let column = partition_of(&out, Act::Act1)
            .into_iter()
            .map(|scene| scene.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(column, vec!["a1", "a2", "c1", "a3"]);
    }

    #[test]
    fn partition_index_counts_only_same_act_scenes() {
        let scenes = vec![
            scene("a1", Act::Act1),
            scene("b1", Act::Act2),
            scene("a2", Act::Act1),
            scene("b2", Act::Act2),
        ];
        assert_eq!(partition_index(&scenes, &EntityId::from("a2")), Some(1));
        assert_eq!(partition_index(&scenes, &EntityId::from("b2")), Some(1));
        assert_eq!(partition_index(&scenes, &EntityId::from("missing")), None);

        let moved = move_within_partition(&scenes, Act::Act2, 1, 0);
        assert_eq!(moved[1].id.as_str(), "b2");
    }
}
