//! Generic sequence operations shared by scenes and memos.

use super::{Entity, Patch};
use crate::model::id::EntityId;
use std::collections::HashSet;

/// Returns the position of `id` in `items`.
pub fn position_of<T: Entity>(items: &[T], id: &EntityId) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Prepends `entity`. The caller supplies a fresh id.
pub fn add<T: Entity>(items: &[T], entity: T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.push(entity);
    out.extend_from_slice(items);
    out
}

/// Substitutes the record sharing `entity`'s id, keeping its position.
///
/// An absent id means the target is already gone; the input is returned as is.
pub fn replace<T: Entity>(items: &[T], entity: T) -> Vec<T> {
    let mut out = items.to_vec();
    if let Some(index) = position_of(items, entity.id()) {
        out[index] = entity;
    }
    out
}

/// Applies `edit` to the record with `id`, keeping its position.
///
/// The edit must not change the record id.
pub fn update<T, F>(items: &[T], id: &EntityId, edit: F) -> Vec<T>
where
    T: Entity,
    F: FnOnce(&mut T),
{
    let mut out = items.to_vec();
    if let Some(index) = position_of(items, id) {
        edit(&mut out[index]);
        debug_assert_eq!(out[index].id(), id);
    }
    out
}

/// Shorthand for `replace(id, merge(existing, patch))`.
pub fn set_partial<T, P>(items: &[T], id: &EntityId, patch: &P) -> Vec<T>
where
    T: Entity,
    P: Patch<T>,
{
    update(items, id, |item| patch.merge_into(item))
}

/// Drops the record with `id`; the remainder keeps its relative order.
pub fn remove<T: Entity>(items: &[T], id: &EntityId) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.id() != id)
        .cloned()
        .collect()
}

/// Inserts a copy of the record with `id` right after it, under `new_id`.
pub fn duplicate<T: Entity>(items: &[T], id: &EntityId, new_id: EntityId) -> Vec<T> {
    let mut out = items.to_vec();
    if let Some(index) = position_of(items, id) {
        let copy = items[index].duplicated(new_id);
        out.insert(index + 1, copy);
    }
    out
}

/// Moves the record at `from` to `to` (clamped to the last position).
///
/// An out-of-range `from` leaves the sequence unchanged.
pub fn move_item<T: Entity>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() {
        return out;
    }
    let item = out.remove(from);
    let target = to.min(out.len());
    out.insert(target, item);
    out
}

/// Gives every repeated id after its first occurrence a fresh id.
///
/// Returns the repaired sequence and the number of reassigned records. Order
/// and every other field are kept.
pub fn dedupe_ids<T: Entity>(items: Vec<T>) -> (Vec<T>, usize) {
    let mut seen = HashSet::with_capacity(items.len());
    let mut reassigned = 0usize;
    let items = items
        .into_iter()
        .map(|mut item| {
            if !seen.insert(item.id().clone()) {
                let mut fresh = EntityId::generate();
                while seen.contains(&fresh) {
                    fresh = EntityId::generate();
                }
                item.reassign_id(fresh.clone());
                seen.insert(fresh);
                reassigned += 1;
            }
            item
        })
        .collect();
    (items, reassigned)
}

#[cfg(test)]
mod tests {
    use super::{add, dedupe_ids, duplicate, move_item, remove, replace, update};
    use crate::collection::COPY_SUFFIX;
    use crate::model::id::EntityId;
    use crate::model::memo::Memo;

    fn memo(id: &str) -> Memo {
        Memo {
            id: EntityId::from(id),
            title: id.to_uppercase(),
            body: String::new(),
            open: false,
        }
    }

    fn ids(items: &[Memo]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn add_prepends_and_remove_restores() {
        let base = vec![memo("a"), memo("b")];
        let added = add(&base, memo("n"));
        assert_eq!(ids(&added), vec!["n", "a", "b"]);
        assert_eq!(remove(&added, &EntityId::from("n")), base);
    }

    #[test]
    fn replace_with_unknown_id_is_a_no_op() {
        let base = vec![memo("a"), memo("b")];
        assert_eq!(replace(&base, memo("zzz")), base);

        let mut edited = memo("b");
        edited.body = "changed".to_string();
        let out = replace(&base, edited.clone());
        assert_eq!(out[1], edited);
        assert_eq!(out[0], base[0]);
    }

    #[test]
    fn update_keeps_position() {
        let base = vec![memo("a"), memo("b"), memo("c")];
        let out = update(&base, &EntityId::from("b"), |item| item.open = true);
        assert_eq!(ids(&out), vec!["a", "b", "c"]);
        assert!(out[1].open);
        assert!(!base[1].open);
    }

    #[test]
    fn duplicate_inserts_copy_after_source() {
        let base = vec![memo("a"), memo("b"), memo("c")];
        let out = duplicate(&base, &EntityId::from("b"), EntityId::from("b2"));
        assert_eq!(ids(&out), vec!["a", "b", "b2", "c"]);
        assert_eq!(out[2].title, format!("B{COPY_SUFFIX}"));

        let missing = duplicate(&base, &EntityId::from("x"), EntityId::from("x2"));
        assert_eq!(missing, base);
    }

    #[test]
    fn move_item_clamps_target_and_ignores_bad_source() {
        let base = vec![memo("a"), memo("b"), memo("c")];
        assert_eq!(ids(&move_item(&base, 0, 99)), vec!["b", "c", "a"]);
        assert_eq!(ids(&move_item(&base, 2, 0)), vec!["c", "a", "b"]);
        assert_eq!(move_item(&base, 3, 0), base);
    }

    #[test]
    fn dedupe_ids_keeps_first_occurrence_and_order() {
        let base = vec![memo("x"), memo("y"), memo("x"), memo("x")];
        let (out, reassigned) = dedupe_ids(base);
        assert_eq!(reassigned, 2);
        assert_eq!(out[0].id.as_str(), "x");
        assert_eq!(out[1].id.as_str(), "y");
        assert_eq!(out[2].title, "X");
        assert_ne!(out[2].id, out[3].id);
        assert!(out[2..].iter().all(|item| item.id.as_str() != "x"));
    }
}
