use scenario_core::model::defaults::default_scenes;
use scenario_core::persist::SCENES_SLOT;
use scenario_core::projection::timeline::MAX_TICKS;
use scenario_core::{
    kanban_columns, list_view, sidebar_entries, tag_universe, timeline, total_minutes, Act,
    EntityId, MemoryKeyValueStore, Scene, SceneFilter, SceneStore,
};

fn scene(id: &str, act: Act, minutes: f64) -> Scene {
    let mut scene = Scene::with_id(EntityId::from(id));
    scene.title = id.to_string();
    scene.act = act;
    scene.duration = minutes;
    scene
}

#[test]
fn query_matches_notes_when_title_does_not() {
    let scenes = default_scenes();
    let hits = list_view(&scenes, &SceneFilter::new("腕時計"));

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "再会");
    assert!(!hits[0].title.contains("腕時計"));
}

#[test]
fn timeline_runs_act_by_act_from_zero() {
    let scenes = vec![
        scene("s1", Act::Act1, 5.0),
        scene("s2", Act::Act1, 4.0),
        scene("s3", Act::Act2, 6.0),
    ];
    let line = timeline(&scenes, &SceneFilter::default());

    let spans = line
        .bars
        .iter()
        .map(|bar| (bar.start, bar.end))
        .collect::<Vec<_>>();
    assert_eq!(spans, vec![(0.0, 5.0), (5.0, 9.0), (9.0, 15.0)]);
    assert_eq!(line.total, 15.0);
    assert_eq!(line.ticks(), vec![0.0, 5.0, 10.0]);
}

#[test]
fn filtered_views_never_touch_the_base_sequence() {
    let scenes = default_scenes();
    let snapshot = scenes.clone();
    let filter = SceneFilter::new("主人公").with_tag("ドラマ");

    let columns = kanban_columns(&scenes, &filter);
    assert_eq!(columns[0].count(), 0);
    assert_eq!(columns[1].count(), 1);
    assert_eq!(columns[1].total_minutes(), 6.0);
    assert_eq!(scenes, snapshot);
}

#[test]
fn picked_scene_narrows_every_view() {
    let scenes = default_scenes();
    let picked = scenes[4].id.clone();
    let filter = SceneFilter::default().with_picked(picked.clone());

    assert_eq!(list_view(&scenes, &filter).len(), 1);
    let line = timeline(&scenes, &filter);
    assert_eq!(line.bars.len(), 1);
    assert_eq!(line.bars[0].start, 0.0);

    let entries = sidebar_entries(&scenes, Some(&picked));
    assert_eq!(entries.len(), scenes.len());
    assert_eq!(entries.iter().filter(|entry| entry.picked).count(), 1);
}

#[test]
fn tag_universe_and_totals_ignore_the_filter() {
    let mut scenes = default_scenes();
    scenes[0].tags.push("導入".to_string());
    scenes[1].tags.push(String::new());

    let tags = tag_universe(&scenes);
    assert_eq!(tags, vec!["導入", "道中", "ドラマ", "コンフリクト", "クライマックス"]);
    assert_eq!(total_minutes(&scenes), 33.0);
}

#[test]
fn extreme_durations_flow_through_every_projection() {
    let mut storage = MemoryKeyValueStore::new();
    storage.insert_raw(
        SCENES_SLOT,
        r#"[
            {"id":"huge","act":"ACT1","duration":1e300},
            {"id":"neg","act":"ACT1","duration":-7},
            {"id":"text","act":"ACT2","duration":"NaN"},
            {"id":"ok","act":"ACT3","duration":5}
        ]"#,
    );
    let mut store = SceneStore::open(storage);
    let mut broken = store.get(&EntityId::from("ok")).unwrap().clone();
    broken.duration = f64::NAN;
    assert!(store.replace(broken));

    let scenes = store.scenes();
    assert!(scenes[1..].iter().all(|scene| scene.duration == 0.0));
    assert_eq!(total_minutes(scenes), 1e300);

    let columns = kanban_columns(scenes, &SceneFilter::default());
    assert_eq!(columns[0].total_minutes(), 1e300);
    assert_eq!(columns[1].total_minutes(), 0.0);
    assert_eq!(columns[2].total_minutes(), 0.0);

    let line = timeline(scenes, &SceneFilter::default());
    assert_eq!(line.total, 1e300);
    let ticks = line.ticks();
    assert!(!ticks.is_empty() && ticks.len() <= MAX_TICKS);
    assert_eq!(ticks[0], 0.0);
    assert_eq!(line.bars[1].start, line.bars[1].end);
    assert!(line
        .bars
        .iter()
        .all(|bar| (0.0..=1.0).contains(&line.width_fraction(bar))));
}
