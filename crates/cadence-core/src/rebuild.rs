use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    authoring::{AuthoredContent, AuthoredNote, ElementDocument, MeasureInfo},
    element::{AnyValue, ElementTimeline},
    event::EventError,
    payload::Payload,
    property::{is_easing_key, property_kind},
    time::{Position, beats_to_progress},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RebuildReport {
    pub inserted: usize,
    pub skipped_measures: Vec<u32>,
    pub unknown_properties: BTreeSet<String>,
    pub rejected_events: usize,
}

/// Replaces every keyframe of `timeline` with the events authored in
/// `content`, placing local measure `i` at global measure `measure_offset + i`.
#[instrument(
    skip(timeline, content, measure_map),
    fields(measures = content.content.len(), map_len = measure_map.len())
)]
pub fn rebuild_timeline(
    timeline: &mut ElementTimeline,
    content: &AuthoredContent,
    measure_map: &[MeasureInfo],
    measure_offset: u32,
) -> RebuildReport {
    let anchor = f64::from(measure_offset);
    for (_, value) in timeline.values_mut() {
        value.reset_events(anchor);
    }

    let mut report = RebuildReport::default();
    for (local_index, notes) in content.content.iter().enumerate() {
        let global_index = u32::try_from(local_index)
            .ok()
            .and_then(|local| local.checked_add(measure_offset));
        let Some(global_index) = global_index else {
            warn!(local_index, "measure index overflows the timeline");
            break;
        };
        let Some(measure) = measure_map.get(global_index as usize) else {
            debug!(measure = global_index, "measure missing from measure map; skipped");
            report.skipped_measures.push(global_index);
            continue;
        };

        let mut beat_offset = 0.0;
        for note in notes {
            if note.events.enabled {
                let progress = beats_to_progress(beat_offset, measure.duration);
                insert_note_events(timeline, note, global_index, progress, &mut report);
            }
            beat_offset += note.note_value.beats();
        }
    }

    info!(
        inserted = report.inserted,
        skipped_measures = report.skipped_measures.len(),
        unknown_properties = report.unknown_properties.len(),
        rejected = report.rejected_events,
        "timeline rebuilt"
    );
    report
}

#[must_use]
pub fn build_element_timeline(
    element: &ElementDocument,
    measure_map: &[MeasureInfo],
) -> (ElementTimeline, RebuildReport) {
    let mut timeline =
        ElementTimeline::with_properties(element.properties.iter().map(String::as_str));
    let report = rebuild_timeline(
        &mut timeline,
        &element.events,
        measure_map,
        element.measure_offset,
    );
    (timeline, report)
}

fn insert_note_events(
    timeline: &mut ElementTimeline,
    note: &AuthoredNote,
    measure_index: u32,
    progress: f64,
    report: &mut RebuildReport,
) {
    for (property_id, raw) in &note.events.values {
        if is_easing_key(property_id) {
            continue;
        }
        if property_kind(property_id).is_none() {
            warn!(
                property = %property_id,
                note = %note.id,
                "unknown property id; override ignored"
            );
            report.unknown_properties.insert(property_id.clone());
            continue;
        }
        let Some(value) = timeline.value_mut(property_id) else {
            continue;
        };

        match add_override(value, note, property_id, raw, measure_index, progress) {
            Ok(_) => report.inserted += 1,
            Err(error) => {
                warn!(%error, property = %property_id, note = %note.id, "override rejected");
                report.rejected_events += 1;
            }
        }
    }
}

fn add_override(
    value: &mut AnyValue,
    note: &AuthoredNote,
    property_id: &str,
    raw: &Value,
    measure_index: u32,
    progress: f64,
) -> Result<Uuid, EventError> {
    let easing = note.events.easing_for(property_id)?;
    let position = Position::new(measure_index, progress)?;
    let payload = Payload::decode(value.kind(), raw)?;
    value.add_payload_event(payload, easing, position)
}
