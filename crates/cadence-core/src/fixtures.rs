use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::{
    authoring::{
        AuthoredContent, AuthoredNote, ElementDocument, SongDocument, measure_map_from_beats,
    },
    easing::Easing,
    time::NoteValue,
};

pub const DEMO_SONG_ID: Uuid = Uuid::from_u128(0x6c1f_04d2_8a4e_4b7a_9d35_2f0e_51c7_a902);

#[must_use]
pub fn demo_song() -> SongDocument {
    let fixed_timestamp = DateTime::<Utc>::from_timestamp(1_790_000_000, 0).unwrap_or_default();

    let mut song = SongDocument::new("Cadence Demo");
    song.id = DEMO_SONG_ID;
    song.created_at = fixed_timestamp;
    song.updated_at = fixed_timestamp;
    song.measures = measure_map_from_beats("demo-song", &[4.0, 4.0, 3.0, 4.0]);
    song.elements = vec![title_card(), backdrop_video()];
    song
}

fn title_card() -> ElementDocument {
    let quarter = |id: &str| AuthoredNote::new(id, NoteValue::Quarter);
    let content = vec![
        vec![
            quarter("title-m0-n0")
                .with_override("opacity", json!(0.0))
                .with_override("fontSize", json!({ "value": 24, "unit": "px" }))
                .with_override(
                    "textColor",
                    json!({ "mode": "color", "r": 255, "g": 0, "b": 0, "a": 1 }),
                ),
            quarter("title-m0-n1"),
            AuthoredNote::new("title-m0-n2", NoteValue::Half)
                .with_override("opacity", json!(1.0))
                .with_easing("opacity", Easing::Slow),
        ],
        vec![
            AuthoredNote::new("title-m1-n0", NoteValue::Whole)
                .with_override("fontSize", json!({ "value": 48, "unit": "px" }))
                .with_easing("fontSize", Easing::Fast)
                .with_override(
                    "textColor",
                    json!({
                        "type": "linear",
                        "angle": 45,
                        "colorStops": [
                            { "position": 0, "color": { "r": 0, "g": 0, "b": 255, "a": 1 } },
                            { "position": 100, "color": { "r": 255, "g": 255, "b": 255, "a": 1 } }
                        ]
                    }),
                ),
        ],
        vec![
            AuthoredNote::new("title-m2-n0", NoteValue::DottedHalf)
                .with_override("justifyText", json!(true))
                .with_override("textAlign", json!("center")),
        ],
    ];

    ElementDocument {
        id: "title-card".to_string(),
        measure_offset: 0,
        properties: [
            "opacity",
            "fontSize",
            "textColor",
            "textAlign",
            "justifyText",
            "translateX",
        ]
        .map(String::from)
        .to_vec(),
        events: AuthoredContent { content },
    }
}

fn backdrop_video() -> ElementDocument {
    let content = vec![
        vec![
            AuthoredNote::new("video-m1-n0", NoteValue::Half)
                .with_override("videoState", json!("playing"))
                .with_override("bgColor", json!("#102030")),
            AuthoredNote::new("video-m1-n1", NoteValue::Half)
                .with_override("translateX", json!({ "value": 10, "unit": "pw" })),
        ],
        vec![
            AuthoredNote::new("video-m2-n0", NoteValue::DottedHalf)
                .with_override("bgColor", json!({ "r": 250, "g": 250, "b": 250 }))
                .with_override("translateX", json!({ "value": 0, "unit": "pw" }))
                .with_easing("translateX", Easing::Slow),
        ],
    ];

    ElementDocument {
        id: "backdrop-video".to_string(),
        measure_offset: 1,
        properties: ["videoState", "videoSpeed", "bgColor", "translateX", "opacity"]
            .map(String::from)
            .to_vec(),
        events: AuthoredContent { content },
    }
}
