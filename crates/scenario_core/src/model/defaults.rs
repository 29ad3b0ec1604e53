//! First-run sample collections.
//!
//! Used whenever a storage slot is absent or cannot be decoded.

use crate::model::id::EntityId;
use crate::model::memo::Memo;
use crate::model::scene::{Act, Scene};

struct SceneSeed {
    title: &'static str,
    summary: &'static str,
    tags: &'static [&'static str],
    characters: &'static [&'static str],
    color: &'static str,
    minutes: f64,
    notes: &'static str,
    act: Act,
}

const SCENE_SEEDS: [SceneSeed; 5] = [
    SceneSeed {
        title: "招待状",
        summary: "**館の主**からの手紙が届く.\n\n- 行くかどうか迷う\n- 兄に相談する",
        tags: &["導入"],
        characters: &["主人公", "兄"],
        color: "#eef2ff",
        minutes: 5.0,
        notes: "> *電話のベル音* を入れる",
        act: Act::Act1,
    },
    SceneSeed {
        title: "出立",
        summary: "準備を整え、駅へ向かう。\n\n`雨` の描写。",
        tags: &["道中"],
        characters: &["主人公"],
        color: "#fefce8",
        minutes: 4.0,
        notes: "小道具：**傘**",
        act: Act::Act1,
    },
    SceneSeed {
        title: "再会",
        summary: "古い友人に遭遇。互いの近況を語る。\n\n- 伏線：腕時計\n- トーン: *ほの暗い*",
        tags: &["ドラマ"],
        characters: &["主人公", "友人"],
        color: "#ecfeff",
        minutes: 6.0,
        notes: "腕時計を**左**手首へ",
        act: Act::Act2,
    },
    SceneSeed {
        title: "対立",
        summary: "真相に近づくにつれ衝突が激化。",
        tags: &["コンフリクト"],
        characters: &["主人公", "友人"],
        color: "#fee2e2",
        minutes: 8.0,
        notes: "暗転で切る",
        act: Act::Act2,
    },
    SceneSeed {
        title: "決着",
        summary: "犯人との対峙。選択の時。",
        tags: &["クライマックス"],
        characters: &["主人公", "犯人"],
        color: "#f5f3ff",
        minutes: 10.0,
        notes: "音楽を強めに",
        act: Act::Act3,
    },
];

/// Sample scenes shown on first launch. Ids are freshly generated per call.
pub fn default_scenes() -> Vec<Scene> {
    SCENE_SEEDS
        .iter()
        .map(|seed| {
            let mut scene = Scene::with_id(EntityId::generate());
            scene.title = seed.title.to_string();
            scene.summary = seed.summary.to_string();
            scene.tags = seed.tags.iter().map(|tag| tag.to_string()).collect();
            scene.characters = seed.characters.iter().map(|name| name.to_string()).collect();
            scene.color = seed.color.to_string();
            scene.duration = seed.minutes;
            scene.notes = seed.notes.to_string();
            scene.act = seed.act;
            scene
        })
        .collect()
}

/// Sample memos shown on first launch.
pub fn default_memos() -> Vec<Memo> {
    vec![
        Memo {
            id: EntityId::generate(),
            title: "制作TODO".to_string(),
            body: "- BGM選定\n- ロケ地写真集め\n- 配役候補リスト".to_string(),
            open: true,
        },
        Memo {
            id: EntityId::generate(),
            title: "世界観メモ".to_string(),
            body: "> 海霧の街。\n\n- 年間降水量が多い\n- 灯台と貨物列車".to_string(),
            open: false,
        },
    ]
}
