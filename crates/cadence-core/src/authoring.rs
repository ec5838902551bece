use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    easing::Easing,
    event::EventError,
    property::{easing_key, is_easing_key},
    time::NoteValue,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthoredContent {
    #[serde(default)]
    pub content: Vec<Vec<AuthoredNote>>,
}

impl AuthoredContent {
    #[must_use]
    pub fn flatten(&self) -> Vec<&AuthoredNote> {
        self.content.iter().flatten().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthoredNote {
    pub id: String,
    #[serde(rename = "type")]
    pub note_value: NoteValue,
    #[serde(default)]
    pub events: NoteEvents,
}

impl AuthoredNote {
    #[must_use]
    pub fn new(id: impl Into<String>, note_value: NoteValue) -> Self {
        Self {
            id: id.into(),
            note_value,
            events: NoteEvents::default(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, property_id: &str, value: Value) -> Self {
        self.events.enabled = true;
        self.events.values.insert(property_id.to_string(), value);
        self
    }

    #[must_use]
    pub fn with_easing(mut self, property_id: &str, easing: Easing) -> Self {
        self.events
            .values
            .insert(easing_key(property_id), Value::String(easing.name().to_string()));
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoteEvents {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

impl NoteEvents {
    #[must_use]
    pub fn override_for(&self, property_id: &str) -> Option<&Value> {
        if !self.enabled {
            return None;
        }
        self.values.get(property_id)
    }

    pub fn property_ids(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|key| !is_easing_key(key))
    }

    /// Easing authored for `property_id`; absent or null means linear and
    /// unknown names fall back to linear.
    pub fn easing_for(&self, property_id: &str) -> Result<Easing, EventError> {
        match self.values.get(&easing_key(property_id)) {
            None | Some(Value::Null) => Ok(Easing::Linear),
            Some(Value::String(name)) => Ok(Easing::from_name(name)),
            Some(other) => Err(EventError::InvalidEasing(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasureInfo {
    pub element_id: String,
    pub start_time: f64,
    pub duration: f64,
}

impl MeasureInfo {
    #[must_use]
    pub fn new(element_id: impl Into<String>, start_time: f64, duration: f64) -> Self {
        Self {
            element_id: element_id.into(),
            start_time,
            duration,
        }
    }
}

#[must_use]
pub fn measure_map_from_beats(element_id: &str, beats_per_measure: &[f64]) -> Vec<MeasureInfo> {
    let mut start_time = 0.0;
    beats_per_measure
        .iter()
        .map(|&duration| {
            let info = MeasureInfo::new(element_id, start_time, duration);
            start_time += duration;
            info
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementDocument {
    pub id: String,
    #[serde(default)]
    pub measure_offset: u32,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub events: AuthoredContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SongDocument {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub measures: Vec<MeasureInfo>,
    #[serde(default)]
    pub elements: Vec<ElementDocument>,
}

impl SongDocument {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            measures: Vec::new(),
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&ElementDocument> {
        self.elements.iter().find(|element| element.id == id)
    }
}
